use crate::artifacts::ArtifactManager;
use crate::cli::ExpandArgs;
use crate::config::{self, AppConfig};
use crate::error::Result;
use crate::output;
use crate::string_db::StringClient;
use crate::utils::progress::CliProgressHandler;
use psdexplorer::{
    core::graph::NetworkGraph, engine::progress::ProgressReporter, workflows,
};
use tracing::{debug, info, warn};

pub fn run(args: ExpandArgs) -> Result<()> {
    info!("Merging configuration from file, environment and CLI arguments...");
    let config = config::build_config(&args, &config::process_env)?;
    debug!("Final configuration: {:?}", config);
    log_parameters(&config);

    let artifacts = ArtifactManager::new(&config.work_dir);
    artifacts.prepare()?;
    if args.no_clean {
        info!("Keeping files from earlier runs in {:?}", artifacts.work_dir());
    } else {
        artifacts.clean();
    }

    let client = StringClient::new(&config.string)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let mut graph = NetworkGraph::new();

    println!(
        "Expanding {} layer(s) around the seeds in {}...",
        config.core_config.layers,
        config.input_path.display()
    );
    info!("Invoking the core expansion workflow...");
    let result = workflows::expand::run(
        &config.input_path,
        &config.core_config,
        &client,
        &mut graph,
        &reporter,
    )?;

    for (index, layer) in result.layer_names().iter().enumerate() {
        println!("  Layer {}: {} protein(s)", index, layer.len());
    }
    if result.partition.layers().iter().skip(1).all(|layer| layer.is_empty()) {
        warn!("No protein passed the admission thresholds beyond the seed layer.");
    }

    let title = format!("PSD network ({} layers)", config.core_config.layers);
    output::write_graph(&graph, &config.output_path, &title)?;
    println!("✓ Network written to: {}", config.output_path.display());
    Ok(())
}

fn log_parameters(config: &AppConfig) {
    let schedule = &config.core_config.schedule;
    info!("Seed file: {:?}", config.input_path);
    info!("Output: {:?}", config.output_path);
    info!("Working directory: {:?}", config.work_dir);
    info!(
        "Layers: {}, per-layer thresholds: {:?} (fallback {})",
        config.core_config.layers,
        schedule.thresholds(),
        schedule.fallback()
    );
}
