use super::partition::{Layer, LayerPartition};
use crate::core::models::ids::ProteinId;
use crate::core::models::protein::Protein;
use crate::core::registry::ProteinRegistry;
use std::collections::HashSet;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateScore {
    pub protein: ProteinId,
    pub count: usize,
    pub admitted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AdmissionOutcome {
    pub layer: Layer,
    pub scores: Vec<CandidateScore>,
}

/// Connectivity of `protein` to the proteins already admitted in `history`.
///
/// Every admitted partner counts once. On top of that, every partner that was
/// first observed in the current step (`newly_observed`) counts once more.
pub fn connection_count(
    protein: &Protein,
    history: &LayerPartition,
    newly_observed: &Layer,
) -> usize {
    let admitted_partners = protein
        .interactions()
        .keys()
        .filter(|&&partner| history.contains(partner))
        .count();

    // Partners first seen in this step count as well. See DESIGN.md, open question 1.
    let observed_partners = newly_observed
        .iter()
        .filter(|&q| protein.interacts_with(q))
        .count();

    admitted_partners + observed_partners
}

/// Decides which newly seen proteins enter the next layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionEngine {
    threshold: usize,
}

impl AdmissionEngine {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Builds the next layer from `candidates`, in candidate order.
    ///
    /// Candidates already in `history` are skipped and repeated candidates are
    /// considered once. While `history` holds no protein at all every candidate
    /// is admitted; otherwise a candidate needs a [`connection_count`] of at
    /// least the threshold.
    pub fn admit(
        &self,
        candidates: &[ProteinId],
        registry: &ProteinRegistry,
        history: &LayerPartition,
        newly_observed: &Layer,
    ) -> AdmissionOutcome {
        let unconditional = history.total_proteins() == 0;
        let mut seen = HashSet::new();
        let mut admitted = Vec::new();
        let mut scores = Vec::new();

        for &id in candidates {
            if history.contains(id) || !seen.insert(id) {
                continue;
            }
            let Some(protein) = registry.get(id) else {
                continue;
            };

            let count = if unconditional {
                0
            } else {
                connection_count(protein, history, newly_observed)
            };
            let accept = unconditional || count >= self.threshold;
            trace!(
                "Candidate {} has {} connection(s), threshold {}: {}",
                protein.name,
                count,
                self.threshold,
                if accept { "admitted" } else { "rejected" }
            );

            if accept {
                admitted.push(id);
            }
            scores.push(CandidateScore {
                protein: id,
                count,
                admitted: accept,
            });
        }

        AdmissionOutcome {
            layer: Layer::new(admitted),
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::tsv::{InteractionRecord, InteractionTable};

    struct Run {
        registry: ProteinRegistry,
        history: LayerPartition,
        observed: LayerPartition,
    }

    impl Run {
        fn new() -> Self {
            Self {
                registry: ProteinRegistry::new(),
                history: LayerPartition::new(),
                observed: LayerPartition::new(),
            }
        }

        fn step(&mut self, records: &[(&str, &str, f64)], threshold: usize) -> AdmissionOutcome {
            let candidates = self.registry.ingest(&table(records));
            self.observed.push(Layer::new(candidates.clone()));
            let outcome = AdmissionEngine::new(threshold).admit(
                &candidates,
                &self.registry,
                &self.history,
                self.observed.frontier().unwrap(),
            );
            self.history.push(outcome.layer.clone());
            outcome
        }

        fn names(&self, layer: &Layer) -> Vec<String> {
            layer
                .iter()
                .map(|id| self.registry.name(id).to_string())
                .collect()
        }
    }

    fn table(records: &[(&str, &str, f64)]) -> InteractionTable {
        InteractionTable::from_records(
            records
                .iter()
                .map(|(a, b, s)| InteractionRecord::new(*a, *b, *s))
                .collect(),
        )
    }

    const SEED: &[(&str, &str, f64)] = &[("A", "B", 900.0)];
    const LAYER_ONE: &[(&str, &str, f64)] = &[("A", "C", 500.0), ("B", "C", 600.0)];

    #[test]
    fn empty_history_admits_every_candidate_regardless_of_threshold() {
        let mut run = Run::new();
        let outcome = run.step(&[("A", "B", 1.0), ("C", "D", 1.0)], 50);
        assert_eq!(run.names(&outcome.layer), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn history_of_only_empty_layers_still_admits_unconditionally() {
        let mut run = Run::new();
        run.step(&[], 0);
        let outcome = run.step(&[("A", "B", 1.0)], 3);
        assert_eq!(outcome.layer.len(), 2);
    }

    #[test]
    fn candidate_connected_to_two_seeds_is_admitted_at_threshold_one() {
        let mut run = Run::new();
        run.step(SEED, 0);
        let outcome = run.step(LAYER_ONE, 1);
        assert_eq!(run.names(&outcome.layer), vec!["C"]);
        assert_eq!(outcome.scores[0].count, 2);
    }

    #[test]
    fn candidate_connected_to_two_seeds_is_rejected_at_threshold_three() {
        let mut run = Run::new();
        run.step(SEED, 0);
        let outcome = run.step(LAYER_ONE, 3);
        assert!(outcome.layer.is_empty());
        assert_eq!(run.history.len(), 2);
    }

    #[test]
    fn partners_first_seen_in_the_same_step_add_to_the_count() {
        let mut run = Run::new();
        run.step(SEED, 0);
        // C touches A (admitted) and D (new in this step): 1 + 1.
        let outcome = run.step(&[("A", "C", 500.0), ("C", "D", 400.0)], 2);
        assert_eq!(run.names(&outcome.layer), vec!["C"]);

        let c = run.registry.id_of("C").unwrap();
        let d = run.registry.id_of("D").unwrap();
        let counts: Vec<_> = outcome.scores.iter().map(|s| (s.protein, s.count)).collect();
        assert_eq!(counts, vec![(c, 2), (d, 1)]);
    }

    #[test]
    fn each_admitted_partner_counts_once() {
        let mut run = Run::new();
        run.step(SEED, 0);
        // Two records for the same pair still name a single partner.
        let outcome = run.step(&[("A", "C", 500.0), ("C", "A", 700.0)], 2);
        assert!(outcome.layer.is_empty());
        assert_eq!(outcome.scores[0].count, 1);
    }

    #[test]
    fn already_admitted_and_repeated_candidates_are_skipped() {
        let mut run = Run::new();
        run.step(SEED, 0);
        let mut candidates = run.registry.ingest(&table(LAYER_ONE));
        let c = run.registry.id_of("C").unwrap();
        candidates.push(c);
        let outcome = AdmissionEngine::new(0).admit(
            &candidates,
            &run.registry,
            &run.history,
            &Layer::default(),
        );
        assert_eq!(outcome.layer.proteins(), &[c]);
        assert_eq!(outcome.scores.len(), 1);
    }

    #[test]
    fn raising_the_threshold_never_grows_the_admitted_set() {
        let mut run = Run::new();
        run.step(&[("S1", "S2", 1.0), ("S3", "S1", 1.0)], 0);
        let records = [
            ("S1", "X", 1.0),
            ("S2", "X", 1.0),
            ("S3", "X", 1.0),
            ("S1", "Y", 1.0),
            ("S2", "Y", 1.0),
            ("X", "Y", 1.0),
            ("S3", "Z", 1.0),
            ("Z", "W", 1.0),
        ];
        let candidates = run.registry.ingest(&table(&records));
        run.observed.push(Layer::new(candidates.clone()));
        let observed = run.observed.frontier().unwrap();

        let mut previous: Option<HashSet<ProteinId>> = None;
        for threshold in 0..8 {
            let admitted: HashSet<_> = AdmissionEngine::new(threshold)
                .admit(&candidates, &run.registry, &run.history, observed)
                .layer
                .iter()
                .collect();
            if let Some(previous) = &previous {
                assert!(admitted.is_subset(previous), "threshold {}", threshold);
            }
            previous = Some(admitted);
        }
    }
}
