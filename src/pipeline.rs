//! Stage functions: records -> taxonomy -> lattice flags -> validation report.
//!
//! Everything here is pure over its inputs; file I/O lives in the binary.

use crate::galois::{root_group_pairs, validate_all_pairs, PairSource};
use crate::lattice::{LatticeEvaluator, LatticeProperties};
use crate::poset::Poset;
use crate::records::{ValueRecord, ValueTable};
use crate::relations::{extract_relations, RelationGraph};
use crate::report::{ReportMetadata, ReportOptions, ValidationReport};
use crate::taxonomy::{FormalTaxonomy, PosetProperties};

/// Output of [`formalize`]: the artifact plus the graph it was derived from.
pub struct Formalized {
    pub taxonomy: FormalTaxonomy,
    pub graph: RelationGraph,
}

/// Extract relations from raw records and certify the resulting order.
pub fn formalize(records: &[ValueRecord]) -> Formalized {
    let values = ValueTable::from_records(records);
    let graph = RelationGraph::from_records(records);
    let relations = extract_relations(&graph, values.records());
    let evaluator = LatticeEvaluator::new(Poset::new(&graph), relations.antonym_pairs.clone());
    let poset_properties = PosetProperties::from_evaluator(&evaluator);

    Formalized {
        taxonomy: FormalTaxonomy {
            values,
            relations,
            poset_properties,
        },
        graph,
    }
}

/// Recompute lattice flags from the stored relations and write them back.
pub fn refresh_lattice_properties(taxonomy: &mut FormalTaxonomy) -> LatticeProperties {
    let evaluator = taxonomy.evaluator();
    let previous = taxonomy.poset_properties.lattice();
    taxonomy.poset_properties = PosetProperties::from_evaluator(&evaluator);
    let current = evaluator.properties();
    if previous != current {
        tracing::info!(?previous, ?current, "lattice properties changed on recompute");
    }
    current
}

/// Validate antonym pairs against the order stored in `taxonomy`.
///
/// `records` supplies the root-group pairs and the value count, as the
/// taxonomy and the raw value list may come from different files.
pub fn validate(
    records: &[ValueRecord],
    taxonomy: &FormalTaxonomy,
    opts: &ReportOptions,
) -> ValidationReport {
    let evaluator = taxonomy.evaluator();
    let pairs = match opts.pair_source {
        PairSource::RootGroups => root_group_pairs(records),
        PairSource::Relations => taxonomy.relations.antonym_pairs.clone(),
    };
    let validation_results = validate_all_pairs(evaluator.poset(), &pairs);

    ValidationReport {
        metadata: ReportMetadata {
            total_values: records.len(),
            total_nodes: evaluator.poset().len(),
            pair_source: opts.pair_source,
            taxonomy_file: opts.taxonomy_file.clone(),
            values_file: opts.values_file.clone(),
            taxonomy_hash: taxonomy.content_hash(),
        },
        lattice_properties: evaluator.properties(),
        validation_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ValueCategory;

    fn records() -> Vec<ValueRecord> {
        vec![
            ValueRecord::core("honesty"),
            ValueRecord::new("dishonesty", ValueCategory::Antonym, "honesty", true),
            ValueRecord::new("truthfulness", ValueCategory::Synonym, "honesty", false),
            ValueRecord::core("courage"),
            ValueRecord::new("cowardice", ValueCategory::Antonym, "courage", true),
            ValueRecord::new("virtue", ValueCategory::Hypernym, "courage", false),
        ]
    }

    #[test]
    fn formalize_fills_every_section() {
        let out = formalize(&records());
        let tax = &out.taxonomy;

        assert_eq!(tax.values.len(), 6);
        assert_eq!(out.graph.len(), 6);
        assert_eq!(tax.relations.antonym_pairs.len(), 2);
        assert_eq!(tax.relations.equivalence_classes.len(), 1);
        assert!(tax.poset_properties.is_reflexive);
        assert!(tax.poset_properties.has_minimal_elements);
        // honesty and courage share no upper bound
        assert!(!tax.poset_properties.is_lattice);
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut tax = formalize(&records()).taxonomy;
        let before = tax.poset_properties;
        let props = refresh_lattice_properties(&mut tax);
        assert_eq!(props, before.lattice());
        assert_eq!(tax.poset_properties, before);
    }

    #[test]
    fn validate_with_both_pair_sources() {
        let records = records();
        let tax = formalize(&records).taxonomy;

        let by_root = validate(&records, &tax, &ReportOptions::default());
        // honesty, truthfulness x dishonesty; courage, virtue x cowardice
        assert_eq!(by_root.validation_results.summary.total_pairs, 4);
        assert_eq!(by_root.validation_results.summary.total_pair_combinations, 10);
        assert_eq!(by_root.metadata.total_values, 6);
        assert_eq!(by_root.metadata.taxonomy_hash, tax.content_hash());

        let opts = ReportOptions {
            pair_source: PairSource::Relations,
            ..ReportOptions::default()
        };
        let by_relations = validate(&records, &tax, &opts);
        assert_eq!(by_relations.validation_results.summary.total_pairs, 2);
        assert_eq!(by_relations.validation_results.pair_validations.len(), 1);
        assert_eq!(by_relations.lattice_properties, by_root.lattice_properties);
    }
}
