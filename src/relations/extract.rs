//! Relation sets derived from the generalization graph.

use serde::{Deserialize, Serialize};

use crate::records::ValueRecord;

use super::graph::RelationGraph;

/// Above this many nodes the all-pairs incomparability scan gets expensive.
const INCOMPARABLE_WARN_NODES: usize = 2_000;

/// A strict `less <= greater` edge with no reverse edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderPair {
    pub less: String,
    pub greater: String,
}

/// A value and its negation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AntonymPair {
    pub value: String,
    pub anti_value: String,
}

impl AntonymPair {
    pub fn new(value: impl Into<String>, anti_value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            anti_value: anti_value.into(),
        }
    }
}

/// The four relation categories. Immutable once extracted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationSets {
    pub partial_order: Vec<OrderPair>,
    pub equivalence_classes: Vec<Vec<String>>,
    pub antonym_pairs: Vec<AntonymPair>,
    pub incomparable: Vec<(String, String)>,
}

/// Derive the relation sets.
///
/// `values` is the deduplicated value table in node order; only its records
/// contribute antonym pairs. The incomparability scan is O(V·(V+E)) for
/// reachability plus O(V²) pair enumeration and is meant for a few hundred
/// nodes.
pub fn extract_relations(graph: &RelationGraph, values: &[ValueRecord]) -> RelationSets {
    let relations = RelationSets {
        partial_order: strict_order(graph),
        equivalence_classes: equivalence_classes(graph),
        antonym_pairs: antonym_pairs(values),
        incomparable: incomparable_pairs(graph),
    };
    tracing::info!(
        partial_order = relations.partial_order.len(),
        equivalence_classes = relations.equivalence_classes.len(),
        antonym_pairs = relations.antonym_pairs.len(),
        incomparable = relations.incomparable.len(),
        "extracted relation sets"
    );
    relations
}

fn strict_order(graph: &RelationGraph) -> Vec<OrderPair> {
    graph
        .edges()
        .filter(|&(u, v)| !graph.has_edge(v, u))
        .map(|(u, v)| OrderPair {
            less: graph.name(u).to_string(),
            greater: graph.name(v).to_string(),
        })
        .collect()
}

/// Connected components of the undirected graph formed by bidirectional,
/// non-self edges. Nodes without such an edge belong to no class.
fn equivalence_classes(graph: &RelationGraph) -> Vec<Vec<String>> {
    let n = graph.len();
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (u, v) in graph.edges() {
        if u != v && graph.has_edge(v, u) {
            adj[u].push(v);
        }
    }

    let mut labels = vec![usize::MAX; n];
    let mut classes: Vec<Vec<usize>> = Vec::new();
    for start in 0..n {
        if labels[start] != usize::MAX || adj[start].is_empty() {
            continue;
        }
        let comp_id = classes.len();
        let mut members = vec![start];
        let mut stack = vec![start];
        labels[start] = comp_id;
        while let Some(u) = stack.pop() {
            for &v in &adj[u] {
                if labels[v] == usize::MAX {
                    labels[v] = comp_id;
                    members.push(v);
                    stack.push(v);
                }
            }
        }
        members.sort_unstable();
        classes.push(members);
    }

    classes
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .map(|idx| graph.name(idx).to_string())
                .collect()
        })
        .collect()
}

fn antonym_pairs(values: &[ValueRecord]) -> Vec<AntonymPair> {
    values
        .iter()
        .filter(|record| record.is_anti_value)
        .map(|record| AntonymPair::new(record.root_value.clone(), record.name.clone()))
        .collect()
}

fn incomparable_pairs(graph: &RelationGraph) -> Vec<(String, String)> {
    let n = graph.len();
    if n > INCOMPARABLE_WARN_NODES {
        tracing::warn!(
            nodes = n,
            "incomparability scan is quadratic in node count; expect a slow run"
        );
    }
    let reach = graph.reachability();
    let mut pairs = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if !reach[u][v] && !reach[v][u] {
                pairs.push((graph.name(u).to_string(), graph.name(v).to_string()));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ValueCategory, ValueTable};

    fn extract(records: &[ValueRecord]) -> RelationSets {
        let graph = RelationGraph::from_records(records);
        let table = ValueTable::from_records(records);
        extract_relations(&graph, table.records())
    }

    fn order(less: &str, greater: &str) -> OrderPair {
        OrderPair {
            less: less.to_string(),
            greater: greater.to_string(),
        }
    }

    #[test]
    fn honesty_synonym_and_antonym() {
        let relations = extract(&[
            ValueRecord::core("honesty"),
            ValueRecord::new("dishonesty", ValueCategory::Antonym, "honesty", true),
            ValueRecord::new("truthfulness", ValueCategory::Synonym, "honesty", false),
        ]);

        assert_eq!(
            relations.equivalence_classes,
            vec![vec!["honesty".to_string(), "truthfulness".to_string()]]
        );
        assert_eq!(
            relations.antonym_pairs,
            vec![AntonymPair::new("honesty", "dishonesty")]
        );
        assert_eq!(relations.partial_order, vec![order("dishonesty", "honesty")]);
        assert!(relations.incomparable.is_empty());
    }

    #[test]
    fn root_with_hypernym_and_synonym() {
        let relations = extract(&[
            ValueRecord::core("fairness"),
            ValueRecord::new("justice", ValueCategory::Hypernym, "fairness", false),
            ValueRecord::new("equity", ValueCategory::Synonym, "fairness", false),
        ]);

        assert_eq!(relations.partial_order, vec![order("fairness", "justice")]);
        assert_eq!(relations.equivalence_classes.len(), 1);
        assert_eq!(relations.equivalence_classes[0], vec!["fairness", "equity"]);
    }

    #[test]
    fn unrelated_core_values_are_pairwise_incomparable() {
        let relations = extract(&[
            ValueRecord::core("care"),
            ValueRecord::core("liberty"),
            ValueRecord::core("loyalty"),
        ]);

        assert_eq!(
            relations.incomparable,
            vec![
                ("care".to_string(), "liberty".to_string()),
                ("care".to_string(), "loyalty".to_string()),
                ("liberty".to_string(), "loyalty".to_string()),
            ]
        );
        assert!(relations.partial_order.is_empty());
        assert!(relations.equivalence_classes.is_empty());
    }

    #[test]
    fn synonym_chains_merge_into_one_class() {
        let relations = extract(&[
            ValueRecord::core("a"),
            ValueRecord::new("b", ValueCategory::Synonym, "a", false),
            ValueRecord::core("c"),
            ValueRecord::new("c", ValueCategory::Synonym, "b", false),
        ]);
        assert_eq!(relations.equivalence_classes, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn antonym_pairs_use_final_attributes_of_duplicates() {
        let relations = extract(&[
            ValueRecord::core("courage"),
            ValueRecord::new("cowardice", ValueCategory::Antonym, "courage", true),
            ValueRecord::new("cowardice", ValueCategory::Synonym, "fear", false),
        ]);
        assert!(relations.antonym_pairs.is_empty());
    }
}
