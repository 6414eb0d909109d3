use crate::core::models::ids::ProteinId;
use std::collections::HashMap;
use tracing::warn;

/// Proteins first admitted during one expansion step, in admission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    proteins: Vec<ProteinId>,
}

impl Layer {
    pub(crate) fn new(proteins: Vec<ProteinId>) -> Self {
        Self { proteins }
    }

    pub(crate) const fn empty() -> Self {
        Self {
            proteins: Vec::new(),
        }
    }

    pub fn proteins(&self) -> &[ProteinId] {
        &self.proteins
    }

    pub fn iter(&self) -> impl Iterator<Item = ProteinId> + '_ {
        self.proteins.iter().copied()
    }

    pub fn contains(&self, id: ProteinId) -> bool {
        self.proteins.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }
}

/// Append-only sequence of disjoint layers; index 0 is the seed layer.
#[derive(Debug, Clone, Default)]
pub struct LayerPartition {
    layers: Vec<Layer>,
    membership: HashMap<ProteinId, usize>,
}

impl LayerPartition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `layer` as the new frontier and returns its index.
    ///
    /// Proteins already present in an earlier layer are dropped, so a protein
    /// never belongs to two layers.
    pub(crate) fn push(&mut self, layer: Layer) -> usize {
        let index = self.layers.len();
        let mut kept = Vec::with_capacity(layer.len());
        for id in layer.proteins {
            if self.membership.contains_key(&id) {
                warn!(
                    "Protein {:?} already belongs to a layer, not adding it to layer {}.",
                    id, index
                );
                continue;
            }
            self.membership.insert(id, index);
            kept.push(id);
        }
        self.layers.push(Layer::new(kept));
        index
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// The most recently appended layer.
    pub fn frontier(&self) -> Option<&Layer> {
        self.layers.last()
    }

    pub fn contains(&self, id: ProteinId) -> bool {
        self.membership.contains_key(&id)
    }

    pub fn layer_of(&self, id: ProteinId) -> Option<usize> {
        self.membership.get(&id).copied()
    }

    /// Number of layers, empty ones included.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn total_proteins(&self) -> usize {
        self.membership.len()
    }

    pub fn iter_proteins(&self) -> impl Iterator<Item = ProteinId> + '_ {
        self.layers.iter().flat_map(Layer::iter)
    }
}
