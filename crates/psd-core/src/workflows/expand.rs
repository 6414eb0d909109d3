use crate::core::graph::{EdgeSpec, GraphBuilder, NodeSpec, layer_color};
use crate::core::io::traits::InteractionFile;
use crate::core::io::tsv::{InteractionTable, TsvFile};
use crate::core::registry::ProteinRegistry;
use crate::engine::admission::AdmissionEngine;
use crate::engine::config::ExpansionConfig;
use crate::engine::context::RunContext;
use crate::engine::error::EngineError;
use crate::engine::partition::LayerPartition;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::source::{FetchError, FetchMode, InteractionSource};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Layer 0 is built, no expansion has run yet.
    Seeded,
    /// The given layer is the frontier and more layers are due.
    Expanding(usize),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStats {
    pub layer: usize,
    pub threshold: usize,
    pub fetched_records: usize,
    pub candidates: usize,
    pub admitted: usize,
}

#[derive(Debug, Clone)]
pub struct ExpansionResult {
    pub registry: ProteinRegistry,
    pub partition: LayerPartition,
    pub interactions: InteractionTable,
    pub stats: Vec<LayerStats>,
}

impl ExpansionResult {
    /// Protein names per layer, seed layer first.
    pub fn layer_names(&self) -> Vec<Vec<String>> {
        self.partition
            .layers()
            .iter()
            .map(|layer| {
                layer
                    .iter()
                    .map(|id| self.registry.name(id).to_string())
                    .collect()
            })
            .collect()
    }
}

/// Grows the layer partition one expansion step at a time.
///
/// Each step fetches the best partners of the frontier, fetches the network
/// spanned by every admitted protein plus those partners, folds the answer
/// into the cumulative records and admits the next layer from them.
pub struct ExpansionDriver<'a, S, G>
where
    S: InteractionSource + ?Sized,
    G: GraphBuilder + ?Sized,
{
    config: &'a ExpansionConfig,
    source: &'a S,
    graph: &'a mut G,
    reporter: &'a ProgressReporter<'a>,
    context: RunContext,
    state: DriverState,
    stats: Vec<LayerStats>,
}

impl<'a, S, G> ExpansionDriver<'a, S, G>
where
    S: InteractionSource + ?Sized,
    G: GraphBuilder + ?Sized,
{
    /// Builds layer 0 from the seed records; every seed protein is admitted.
    pub fn seed(
        seed: &InteractionTable,
        config: &'a ExpansionConfig,
        source: &'a S,
        graph: &'a mut G,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        let mut driver = Self {
            config,
            source,
            graph,
            reporter,
            context: RunContext::new(),
            state: DriverState::Seeded,
            stats: Vec::new(),
        };

        driver.admit_layer(0, 0, seed);
        info!(
            "Seed layer built with {} protein(s).",
            driver.context.partition().total_proteins()
        );

        if config.layers == 0 {
            driver.state = DriverState::Done;
        }
        driver
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Runs one expansion step. Returns `None` once all layers are built.
    pub fn step(&mut self) -> Option<&LayerStats> {
        let layer = match self.state {
            DriverState::Done => return None,
            DriverState::Seeded => 1,
            DriverState::Expanding(frontier) => frontier + 1,
        };
        let threshold = self.config.schedule.threshold_for(layer);
        self.reporter
            .report(Progress::LayerStart { layer, threshold });
        info!(
            "Expanding to layer {} (minimum interactions: {}).",
            layer, threshold
        );

        let frontier = self.context.frontier_names();
        let partners = self
            .fetch(
                &frontier,
                FetchMode::BestPartners {
                    limit: self.config.partner_limit,
                },
            )
            .unwrap_or_else(|e| {
                warn!("Best-partner fetch for layer {} failed: {}", layer, e);
                self.reporter.report(Progress::Message(format!(
                    "No partners fetched for layer {}: {}",
                    layer, e
                )));
                InteractionTable::new()
            });
        debug!(
            "Frontier of {} protein(s) returned {} best-partner record(s).",
            frontier.len(),
            partners.len()
        );

        let whole_list = self.whole_list(&partners);
        let network = match self.fetch(&whole_list, FetchMode::Network) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    "Network fetch for layer {} failed: {}. Falling back to best-partner records.",
                    layer, e
                );
                partners.clone()
            }
        };

        self.write_artifact(&format!("up_to_layer_{}.tsv", layer), &partners);
        self.admit_layer(layer, threshold, &network);
        self.write_artifact(
            &format!("up_to_layer{}_cumulative.tsv", layer),
            self.context.interactions(),
        );
        self.log_partition();

        self.reporter.report(Progress::TaskIncrement);
        self.state = if layer >= self.config.layers {
            DriverState::Done
        } else {
            DriverState::Expanding(layer)
        };
        self.stats.last()
    }

    pub fn finish(self) -> ExpansionResult {
        let stats = self.stats;
        let (registry, partition, interactions) = self.context.into_parts();
        ExpansionResult {
            registry,
            partition,
            interactions,
            stats,
        }
    }

    fn fetch(
        &self,
        identifiers: &[String],
        mode: FetchMode,
    ) -> Result<InteractionTable, FetchError> {
        if identifiers.is_empty() {
            return Ok(InteractionTable::new());
        }
        self.source.fetch(identifiers, mode)
    }

    /// Every admitted protein followed by the new best partners.
    fn whole_list(&self, partners: &InteractionTable) -> Vec<String> {
        let mut seen = HashSet::new();
        self.context
            .admitted_names()
            .into_iter()
            .chain(partners.proteins().into_iter().map(str::to_string))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    fn admit_layer(&mut self, layer: usize, threshold: usize, fresh: &InteractionTable) {
        let candidates = self.context.accumulate(fresh);
        let outcome = AdmissionEngine::new(threshold).admit(
            &candidates,
            self.context.registry(),
            self.context.partition(),
            self.context.newly_observed(),
        );
        let admitted = outcome.layer.len();
        let rejected = outcome.scores.iter().filter(|s| !s.admitted).count();
        let index = self.context.commit(outcome.layer);
        debug_assert_eq!(index, layer);

        debug!(
            "Layer {}: {} candidate(s), {} admitted, {} below threshold.",
            index,
            candidates.len(),
            admitted,
            rejected
        );
        self.render_layer(index);
        self.stats.push(LayerStats {
            layer: index,
            threshold,
            fetched_records: fresh.len(),
            candidates: candidates.len(),
            admitted,
        });
        self.reporter.report(Progress::LayerFinish {
            layer: index,
            admitted,
        });
    }

    /// Hands the proteins of layer `index` and their edges to admitted
    /// proteins over to the graph builder.
    fn render_layer(&mut self, index: usize) {
        let registry = self.context.registry();
        let partition = self.context.partition();
        let Some(layer) = partition.layer(index) else {
            return;
        };
        let size = self.config.node_size(index);
        let color = layer_color(index);

        for id in layer.iter() {
            let name = registry.name(id);
            self.graph.add_node(NodeSpec {
                id: name.to_string(),
                label: name.to_string(),
                layer: index,
                size,
                color: color.to_string(),
            });
        }

        for id in layer.iter() {
            let Some(protein) = registry.get(id) else {
                continue;
            };
            let mut partners: Vec<_> = protein
                .interactions()
                .iter()
                .filter(|(partner, _)| partition.contains(**partner))
                .map(|(&partner, &score)| (registry.name(partner), score))
                .collect();
            partners.sort_by(|a, b| a.0.cmp(b.0));
            for (partner, score) in partners {
                self.graph
                    .add_edge(EdgeSpec::new(&protein.name, partner, score));
            }
        }
    }

    fn write_artifact(&self, file_name: &str, table: &InteractionTable) {
        let Some(dir) = &self.config.artifact_dir else {
            return;
        };
        let path = dir.join(file_name);
        match TsvFile::write_to_path(table, &path) {
            Ok(()) => debug!("Wrote {} record(s) to {:?}", table.len(), path),
            Err(e) => warn!("Could not write artifact {:?}: {}", path, e),
        }
    }

    fn log_partition(&self) {
        let partition = self.context.partition();
        info!("The number of layers is {}.", partition.len());
        for (index, layer) in partition.layers().iter().enumerate() {
            info!("Proteins in layer {}: {}", index, layer.len());
        }
        info!(
            "{} of {} observed protein(s) admitted.",
            partition.total_proteins(),
            self.context.registry().len()
        );
    }
}

/// Reads the seed interaction file.
///
/// # Errors
///
/// Returns [`EngineError::MissingSeedFile`] when `path` is not a file, and
/// [`EngineError::InteractionFile`] when it cannot be read.
pub fn load_seed(path: &Path) -> Result<InteractionTable, EngineError> {
    if !path.is_file() {
        return Err(EngineError::MissingSeedFile {
            path: path.to_path_buf(),
        });
    }
    TsvFile::read_from_path(path).map_err(|source| EngineError::InteractionFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs a complete expansion from the seed file at `seed_path`.
#[instrument(skip_all, name = "expansion_workflow")]
pub fn run<S, G>(
    seed_path: &Path,
    config: &ExpansionConfig,
    source: &S,
    graph: &mut G,
    reporter: &ProgressReporter,
) -> Result<ExpansionResult, EngineError>
where
    S: InteractionSource + ?Sized,
    G: GraphBuilder + ?Sized,
{
    reporter.report(Progress::PhaseStart {
        name: "Loading seed proteins",
    });
    info!("Loading seed interactions from {:?}", seed_path);
    let seed = load_seed(seed_path)?;
    reporter.report(Progress::PhaseFinish);

    Ok(run_from_table(&seed, config, source, graph, reporter))
}

/// Runs a complete expansion from already parsed seed records.
///
/// Always produces `config.layers + 1` layers; fetch failures only make
/// layers smaller.
pub fn run_from_table<S, G>(
    seed: &InteractionTable,
    config: &ExpansionConfig,
    source: &S,
    graph: &mut G,
    reporter: &ProgressReporter,
) -> ExpansionResult
where
    S: InteractionSource + ?Sized,
    G: GraphBuilder + ?Sized,
{
    let mut driver = ExpansionDriver::seed(seed, config, source, graph, reporter);

    reporter.report(Progress::TaskStart {
        total_steps: config.layers as u64,
    });
    while driver.step().is_some() {}
    reporter.report(Progress::TaskFinish);

    let result = driver.finish();
    info!(
        "Expansion complete: {} layer(s), {} admitted protein(s).",
        result.partition.len(),
        result.partition.total_proteins()
    );
    result
}
