use crate::core::io::tsv::InteractionTable;
use crate::core::models::ids::ProteinId;
use crate::core::models::protein::Protein;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Run-wide arena of proteins, deduplicated by identifier.
///
/// The registry owns the only instance of every protein. Layers and graphs
/// refer to proteins through [`ProteinId`] keys, so an interaction recorded
/// after a protein was first seen is visible everywhere that protein is used.
#[derive(Debug, Clone, Default)]
pub struct ProteinRegistry {
    proteins: SlotMap<ProteinId, Protein>,
    by_name: HashMap<String, ProteinId>,
}

impl ProteinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the key for `name`, creating the protein on first sighting.
    pub fn get_or_create(&mut self, name: &str) -> ProteinId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = self.proteins.insert(Protein::new(name));
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn exists(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Option<ProteinId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: ProteinId) -> Option<&Protein> {
        self.proteins.get(id)
    }

    /// Name of a registered protein, or an empty string for a foreign key.
    pub fn name(&self, id: ProteinId) -> &str {
        self.proteins.get(id).map(|p| p.name.as_str()).unwrap_or("")
    }

    /// Records every interaction of `table` in both directions.
    ///
    /// Returns the proteins of the table in order of first appearance.
    pub fn ingest(&mut self, table: &InteractionTable) -> Vec<ProteinId> {
        for record in table {
            let query = self.get_or_create(&record.query);
            let partner = self.get_or_create(&record.partner);
            self.proteins[query].record_interaction(partner, record.score);
            self.proteins[partner].record_interaction(query, record.score);
        }

        table
            .proteins()
            .into_iter()
            .filter_map(|name| self.id_of(name))
            .collect()
    }

    pub(crate) fn mark_admitted(&mut self, id: ProteinId, layer: usize) {
        if let Some(protein) = self.proteins.get_mut(id) {
            protein.admit(layer);
        }
    }

    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProteinId, &Protein)> {
        self.proteins.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::tsv::InteractionRecord;

    fn table(records: &[(&str, &str, f64)]) -> InteractionTable {
        InteractionTable::from_records(
            records
                .iter()
                .map(|(a, b, s)| InteractionRecord::new(*a, *b, *s))
                .collect(),
        )
    }

    #[test]
    fn get_or_create_returns_the_same_instance_for_a_name() {
        let mut registry = ProteinRegistry::new();
        let first = registry.get_or_create("DLG4");
        let second = registry.get_or_create("DLG4");
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert!(registry.exists("DLG4"));
        assert!(!registry.exists("DLG3"));
    }

    #[test]
    fn ingest_records_both_directions() {
        let mut registry = ProteinRegistry::new();
        registry.ingest(&table(&[("A", "C", 500.0)]));

        let a = registry.id_of("A").unwrap();
        let c = registry.id_of("C").unwrap();
        assert_eq!(registry.get(a).unwrap().score_with(c), Some(500.0));
        assert_eq!(registry.get(c).unwrap().score_with(a), Some(500.0));
    }

    #[test]
    fn interaction_mapping_is_the_union_of_all_ingested_tables() {
        let mut registry = ProteinRegistry::new();
        registry.ingest(&table(&[("A", "B", 100.0)]));
        registry.ingest(&table(&[("A", "C", 200.0), ("D", "A", 300.0)]));

        let a = registry.get_or_create("A");
        let protein = registry.get(a).unwrap();
        assert_eq!(protein.interactions().len(), 3);
        for name in ["B", "C", "D"] {
            assert!(protein.interacts_with(registry.id_of(name).unwrap()));
        }
    }

    #[test]
    fn ingest_returns_proteins_in_first_seen_order() {
        let mut registry = ProteinRegistry::new();
        registry.get_or_create("Z");
        let ids = registry.ingest(&table(&[("B", "A", 1.0), ("A", "Z", 2.0)]));
        let names: Vec<_> = ids.iter().map(|&id| registry.name(id)).collect();
        assert_eq!(names, vec!["B", "A", "Z"]);
    }

    #[test]
    fn admitted_protein_keeps_its_first_scores() {
        let mut registry = ProteinRegistry::new();
        registry.ingest(&table(&[("A", "B", 100.0)]));
        let a = registry.id_of("A").unwrap();
        let b = registry.id_of("B").unwrap();
        registry.mark_admitted(a, 0);

        registry.ingest(&table(&[("A", "B", 900.0)]));

        assert_eq!(registry.get(a).unwrap().score_with(b), Some(100.0));
        assert_eq!(registry.get(b).unwrap().score_with(a), Some(900.0));
    }
}
