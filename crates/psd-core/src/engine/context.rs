use super::partition::{Layer, LayerPartition};
use crate::core::io::tsv::InteractionTable;
use crate::core::models::ids::ProteinId;
use crate::core::registry::ProteinRegistry;

/// All state accumulated over one expansion run.
///
/// Besides the registry and the admitted layers, the context tracks which
/// proteins were first *observed* at each step (whether admitted or not) and
/// the cumulative interaction records every step builds on.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    registry: ProteinRegistry,
    partition: LayerPartition,
    observed: LayerPartition,
    interactions: InteractionTable,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ProteinRegistry {
        &self.registry
    }

    pub fn partition(&self) -> &LayerPartition {
        &self.partition
    }

    pub fn interactions(&self) -> &InteractionTable {
        &self.interactions
    }

    /// Appends `table` to the cumulative records and registers every protein
    /// of the combined set, opening the observation layer of this step.
    ///
    /// Returns the proteins of the combined set in first-seen order.
    pub(crate) fn accumulate(&mut self, table: &InteractionTable) -> Vec<ProteinId> {
        self.interactions.extend_from(table);
        let candidates = self.registry.ingest(&self.interactions);
        let first_seen = candidates
            .iter()
            .copied()
            .filter(|&id| !self.observed.contains(id))
            .collect();
        self.observed.push(Layer::new(first_seen));
        candidates
    }

    /// Proteins observed for the first time in the latest step.
    pub(crate) fn newly_observed(&self) -> &Layer {
        static EMPTY: Layer = Layer::empty();
        self.observed.frontier().unwrap_or(&EMPTY)
    }

    /// Freezes `layer` as the next partition layer and returns its index.
    pub(crate) fn commit(&mut self, layer: Layer) -> usize {
        let index = self.partition.push(layer);
        if let Some(frozen) = self.partition.layer(index) {
            for id in frozen.proteins() {
                self.registry.mark_admitted(*id, index);
            }
        }
        index
    }

    pub fn frontier_names(&self) -> Vec<String> {
        self.partition
            .frontier()
            .map(|layer| self.names(layer.iter()))
            .unwrap_or_default()
    }

    pub fn admitted_names(&self) -> Vec<String> {
        self.names(self.partition.iter_proteins())
    }

    fn names(&self, ids: impl Iterator<Item = ProteinId>) -> Vec<String> {
        ids.map(|id| self.registry.name(id).to_string()).collect()
    }

    pub fn into_parts(self) -> (ProteinRegistry, LayerPartition, InteractionTable) {
        (self.registry, self.partition, self.interactions)
    }
}
