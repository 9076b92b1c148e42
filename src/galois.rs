//! Batch Galois-connection validation over antonym pairs.
//!
//! For two pairs `(v1, av1)` and `(v2, av2)` the duality condition is
//! `(av1 <= v2) == (v1 <= av2)`. Every pair is combined with itself and every
//! later pair, so the work is O(P²) in the pair count; fine for tens to low
//! hundreds of pairs.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::poset::Poset;
use crate::records::ValueRecord;
use crate::relations::AntonymPair;

/// Where the validator takes its antonym pairs from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairSource {
    /// Every non-anti record crossed with every anti record sharing its root.
    #[default]
    RootGroups,
    /// The extractor's `antonym_pairs` (root value, anti-value).
    Relations,
}

impl fmt::Display for PairSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootGroups => f.write_str("root_groups"),
            Self::Relations => f.write_str("relations"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairValidation {
    pub pair1: AntonymPair,
    pub pair2: AntonymPair,
    pub is_galois_connection: bool,
    /// `pair1.anti_value <= pair2.value`
    pub condition1: bool,
    /// `pair1.value <= pair2.anti_value`
    pub condition2: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_pairs: usize,
    /// Includes self-combinations that were skipped.
    pub total_pair_combinations: usize,
    pub valid_galois_connections: usize,
    pub invalid_galois_connections: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResults {
    pub summary: ValidationSummary,
    pub pair_validations: Vec<PairValidation>,
}

/// Group records by root value (first-appearance order) and pair each
/// non-anti member with each anti member of the same group.
pub fn root_group_pairs(records: &[ValueRecord]) -> Vec<AntonymPair> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ValueRecord>> = HashMap::new();
    for record in records {
        let root = record.root_value.as_str();
        groups
            .entry(root)
            .or_insert_with(|| {
                order.push(root);
                Vec::new()
            })
            .push(record);
    }

    let mut pairs = Vec::new();
    for root in order {
        let members = &groups[root];
        for value in members.iter().filter(|r| !r.is_anti_value) {
            for anti in members.iter().filter(|r| r.is_anti_value) {
                pairs.push(AntonymPair::new(value.name.clone(), anti.name.clone()));
            }
        }
    }
    pairs
}

pub fn validate_pair(poset: &Poset, pair1: &AntonymPair, pair2: &AntonymPair) -> PairValidation {
    let condition1 = poset.is_less_or_equal(&pair1.anti_value, &pair2.value);
    let condition2 = poset.is_less_or_equal(&pair1.value, &pair2.anti_value);
    PairValidation {
        pair1: pair1.clone(),
        pair2: pair2.clone(),
        is_galois_connection: condition1 == condition2,
        condition1,
        condition2,
    }
}

/// Validate each pair against itself and every later pair.
///
/// A combination whose two pairs are equal by value is counted but not
/// recorded, so duplicate pairs at different positions are skipped too.
pub fn validate_all_pairs(poset: &Poset, pairs: &[AntonymPair]) -> ValidationResults {
    let mut results = ValidationResults {
        summary: ValidationSummary {
            total_pairs: pairs.len(),
            ..ValidationSummary::default()
        },
        pair_validations: Vec::new(),
    };

    for (i, pair1) in pairs.iter().enumerate() {
        for pair2 in &pairs[i..] {
            results.summary.total_pair_combinations += 1;
            if pair1 == pair2 {
                continue;
            }
            let validation = validate_pair(poset, pair1, pair2);
            if validation.is_galois_connection {
                results.summary.valid_galois_connections += 1;
            } else {
                results.summary.invalid_galois_connections += 1;
            }
            results.pair_validations.push(validation);
        }
    }

    tracing::info!(
        pairs = results.summary.total_pairs,
        combinations = results.summary.total_pair_combinations,
        valid = results.summary.valid_galois_connections,
        invalid = results.summary.invalid_galois_connections,
        "validated antonym pairs"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ValueCategory;
    use crate::relations::RelationGraph;

    fn records() -> Vec<ValueRecord> {
        vec![
            ValueRecord::core("honesty"),
            ValueRecord::new("dishonesty", ValueCategory::Antonym, "honesty", true),
            ValueRecord::new("candor", ValueCategory::Synonym, "honesty", false),
            ValueRecord::core("courage"),
            ValueRecord::new("cowardice", ValueCategory::Antonym, "courage", true),
        ]
    }

    #[test]
    fn root_groups_cross_values_with_anti_values() {
        let pairs = root_group_pairs(&records());
        assert_eq!(
            pairs,
            vec![
                AntonymPair::new("honesty", "dishonesty"),
                AntonymPair::new("candor", "dishonesty"),
                AntonymPair::new("courage", "cowardice"),
            ]
        );
    }

    #[test]
    fn combinations_include_skipped_self_pairs() {
        let records = records();
        let poset = Poset::new(&RelationGraph::from_records(&records));
        let pairs = root_group_pairs(&records);
        let results = validate_all_pairs(&poset, &pairs);

        // 3 pairs: 3 self-combinations + 3 distinct combinations
        assert_eq!(results.summary.total_pairs, 3);
        assert_eq!(results.summary.total_pair_combinations, 6);
        assert_eq!(results.pair_validations.len(), 3);
        assert_eq!(
            results.summary.valid_galois_connections + results.summary.invalid_galois_connections,
            3
        );
    }

    #[test]
    fn duplicate_pairs_are_skipped_by_value() {
        let records = records();
        let poset = Poset::new(&RelationGraph::from_records(&records));
        let pair = AntonymPair::new("honesty", "dishonesty");
        let results = validate_all_pairs(&poset, &[pair.clone(), pair]);

        assert_eq!(results.summary.total_pair_combinations, 3);
        assert!(results.pair_validations.is_empty());
    }

    #[test]
    fn conditions_are_recorded() {
        let records = records();
        let poset = Poset::new(&RelationGraph::from_records(&records));
        let v = validate_pair(
            &poset,
            &AntonymPair::new("candor", "dishonesty"),
            &AntonymPair::new("honesty", "dishonesty"),
        );
        // dishonesty <= honesty; candor <= dishonesty is false
        assert!(v.condition1);
        assert!(!v.condition2);
        assert!(!v.is_galois_connection);

        let w = validate_pair(
            &poset,
            &AntonymPair::new("honesty", "dishonesty"),
            &AntonymPair::new("courage", "cowardice"),
        );
        assert!(!w.condition1 && !w.condition2);
        assert!(w.is_galois_connection);
    }
}
