use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "PSD Explorer Developers",
    version,
    about = "PSD Explorer CLI - Grows a layered protein interaction network around a set of seed proteins using the STRING database.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand the seed proteins into a layered interaction network and render it.
    Expand(ExpandArgs),
    /// Remove intermediate files left in the working directory by earlier runs.
    Clean(CleanArgs),
}

/// Arguments for the `expand` subcommand.
///
/// Every option left unset falls back to the `PSD_*` environment variables,
/// then to the configuration file, then to built-in defaults.
#[derive(Args, Debug, Default)]
pub struct ExpandArgs {
    // --- Core Arguments ---
    /// Number of expansion layers to build around the seed layer.
    #[arg(short = 'n', long, value_name = "INT")]
    pub layers: Option<usize>,

    /// Comma-separated minimum interaction counts per layer (e.g., '3,2,1').
    /// The last value is reused for deeper layers.
    #[arg(short, long, value_name = "LIST")]
    pub thresholds: Option<String>,

    /// Minimum interaction count used when no per-layer list is given.
    #[arg(long, value_name = "INT")]
    pub min_int: Option<usize>,

    /// Seed interaction file. Relative paths are resolved against the output directory.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file for the rendered network (.html, or .json for raw graph data).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for intermediate interaction files.
    #[arg(short, long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- STRING Overrides ---
    /// Number of best partners requested per frontier protein.
    #[arg(long, value_name = "INT")]
    pub partner_limit: Option<usize>,

    /// NCBI taxonomy identifier of the species (e.g., 9606 for human).
    #[arg(long, value_name = "TAXON")]
    pub species: Option<u32>,

    /// Base URL of the STRING API.
    #[arg(long, value_name = "URL")]
    pub string_url: Option<String>,

    /// Timeout for a single STRING request, in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    // --- Run Behaviour ---
    /// Do not write per-layer interaction files to the working directory.
    #[arg(long)]
    pub no_artifacts: bool,

    /// Keep intermediate files from earlier runs instead of removing them first.
    #[arg(long)]
    pub no_clean: bool,

    /// Set a specific configuration value, overriding every other source.
    /// Can be used multiple times. Example: -S string.partner-limit=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Directory to clean. Defaults to `PSD_WORK_DIR` or the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn expand_arguments_are_parsed() {
        let cli = Cli::parse_from([
            "psdx", "-vv", "expand", "-n", "3", "-t", "3,2", "-i", "seed.tsv", "-S",
            "string.species=10090", "--no-artifacts",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Expand(args) = cli.command else {
            panic!("expected the expand subcommand");
        };
        assert_eq!(args.layers, Some(3));
        assert_eq!(args.thresholds.as_deref(), Some("3,2"));
        assert_eq!(args.input, Some(PathBuf::from("seed.tsv")));
        assert_eq!(args.set_values, vec!["string.species=10090"]);
        assert!(args.no_artifacts);
        assert!(!args.no_clean);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["psdx", "-q", "-v", "clean"]).is_err());
    }
}
