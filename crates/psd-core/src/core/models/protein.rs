use super::ids::ProteinId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Protein {
    pub name: String,                      // Display name as reported by the interaction source
    interactions: HashMap<ProteinId, f64>, // Partner -> combined score
    layer: Option<usize>,                  // Index of the layer that admitted this protein
}

impl Protein {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interactions: HashMap::new(),
            layer: None,
        }
    }

    pub fn interactions(&self) -> &HashMap<ProteinId, f64> {
        &self.interactions
    }

    pub fn interacts_with(&self, partner: ProteinId) -> bool {
        self.interactions.contains_key(&partner)
    }

    pub fn score_with(&self, partner: ProteinId) -> Option<f64> {
        self.interactions.get(&partner).copied()
    }

    pub fn layer(&self) -> Option<usize> {
        self.layer
    }

    pub fn is_admitted(&self) -> bool {
        self.layer.is_some()
    }

    /// Records a score towards `partner`.
    ///
    /// Until the protein is admitted the latest score wins; afterwards existing
    /// entries are frozen and only new partners are added.
    pub(crate) fn record_interaction(&mut self, partner: ProteinId, score: f64) {
        if self.is_admitted() {
            self.interactions.entry(partner).or_insert(score);
        } else {
            self.interactions.insert(partner, score);
        }
    }

    pub(crate) fn admit(&mut self, layer: usize) {
        if self.layer.is_none() {
            self.layer = Some(layer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn partner_ids(n: usize) -> Vec<ProteinId> {
        let mut arena: SlotMap<ProteinId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn new_protein_has_no_interactions_and_no_layer() {
        let protein = Protein::new("DLG4");
        assert_eq!(protein.name, "DLG4");
        assert!(protein.interactions().is_empty());
        assert_eq!(protein.layer(), None);
        assert!(!protein.is_admitted());
    }

    #[test]
    fn latest_score_wins_before_admission() {
        let ids = partner_ids(1);
        let mut protein = Protein::new("DLG4");
        protein.record_interaction(ids[0], 400.0);
        protein.record_interaction(ids[0], 700.0);
        assert_eq!(protein.score_with(ids[0]), Some(700.0));
    }

    #[test]
    fn existing_scores_are_frozen_after_admission() {
        let ids = partner_ids(2);
        let mut protein = Protein::new("DLG4");
        protein.record_interaction(ids[0], 400.0);
        protein.admit(0);

        protein.record_interaction(ids[0], 999.0);
        protein.record_interaction(ids[1], 150.0);

        assert_eq!(protein.score_with(ids[0]), Some(400.0));
        assert_eq!(protein.score_with(ids[1]), Some(150.0));
        assert!(protein.interacts_with(ids[1]));
    }

    #[test]
    fn admission_layer_is_set_once() {
        let mut protein = Protein::new("SHANK3");
        protein.admit(2);
        protein.admit(5);
        assert_eq!(protein.layer(), Some(2));
    }
}
