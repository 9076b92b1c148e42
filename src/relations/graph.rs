//! Directed generalization graph over value names.
//!
//! An edge `a -> b` reads "a is more specific than or equal to b". Nodes are
//! interned in first-appearance order and that order is the tie-break order
//! used everywhere downstream.

use std::collections::{HashMap, HashSet};

use crate::records::{ValueCategory, ValueRecord};

use super::extract::RelationSets;

#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    out: Vec<Vec<usize>>,
    edge_set: HashSet<(usize, usize)>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from raw records.
    ///
    /// - `record -> root_value` whenever they differ, except for hypernyms
    /// - `root_value -> record` for hypernyms only
    /// - both directions for synonyms
    ///
    /// Every row contributes edges, including repeated names. A root that is
    /// not itself a record becomes a node without attributes.
    pub fn from_records(records: &[ValueRecord]) -> Self {
        let mut graph = Self::new();
        for record in records {
            graph.add_node(&record.name);
        }
        let known = graph.len();

        for record in records {
            if record.is_root() {
                continue;
            }
            if !graph.contains(&record.root_value) {
                tracing::warn!(
                    value = %record.name,
                    root_value = %record.root_value,
                    "root value has no record; adding it as a bare node"
                );
            }
            match record.category {
                ValueCategory::Hypernym => {
                    graph.add_edge(&record.root_value, &record.name);
                }
                ValueCategory::Synonym => {
                    graph.add_edge(&record.name, &record.root_value);
                    graph.add_edge(&record.root_value, &record.name);
                }
                ValueCategory::Core | ValueCategory::Antonym => {
                    graph.add_edge(&record.name, &record.root_value);
                }
            }
        }

        tracing::debug!(
            nodes = graph.len(),
            dangling = graph.len() - known,
            edges = graph.edge_count(),
            "built relation graph"
        );
        graph
    }

    /// Rebuild a graph from serialized relation sets.
    ///
    /// Equivalence classes are re-expanded as bidirectional chains, which
    /// gives the same reachability as the bidirectional synonym edges.
    pub fn from_relations<'a>(
        names: impl IntoIterator<Item = &'a str>,
        relations: &RelationSets,
    ) -> Self {
        let mut graph = Self::new();
        for name in names {
            graph.add_node(name);
        }
        for pair in &relations.partial_order {
            graph.add_edge(&pair.less, &pair.greater);
        }
        for class in &relations.equivalence_classes {
            for window in class.windows(2) {
                graph.add_edge(&window[0], &window[1]);
                graph.add_edge(&window[1], &window[0]);
            }
        }
        graph
    }

    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.out.push(Vec::new());
        idx
    }

    /// Add `from -> to`. Self-loops are never stored. Returns whether the edge is new.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let u = self.add_node(from);
        let v = self.add_node(to);
        if u == v || !self.edge_set.insert((u, v)) {
            return false;
        }
        self.out[u].push(v);
        true
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_set.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out[idx]
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.edge_set.contains(&(u, v))
    }

    /// Edges ordered by source node, then insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.out
            .iter()
            .enumerate()
            .flat_map(|(u, targets)| targets.iter().map(move |&v| (u, v)))
    }

    /// Nodes reachable from `start`, `start` included.
    pub fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut seen = vec![false; self.len()];
        seen[start] = true;
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            for &v in &self.out[u] {
                if !seen[v] {
                    seen[v] = true;
                    stack.push(v);
                }
            }
        }
        seen
    }

    /// Reflexive reachability for every node: one DFS per source, O(V·(V+E)).
    pub fn reachability(&self) -> Vec<Vec<bool>> {
        (0..self.len()).map(|u| self.reachable_from(u)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_category_rules() {
        let records = vec![
            ValueRecord::core("honesty"),
            ValueRecord::new("dishonesty", ValueCategory::Antonym, "honesty", true),
            ValueRecord::new("truthfulness", ValueCategory::Synonym, "honesty", false),
            ValueRecord::new("integrity", ValueCategory::Hypernym, "honesty", false),
        ];
        let graph = RelationGraph::from_records(&records);
        let idx = |n: &str| graph.index_of(n).unwrap();

        assert_eq!(graph.len(), 4);
        assert!(graph.has_edge(idx("dishonesty"), idx("honesty")));
        assert!(graph.has_edge(idx("truthfulness"), idx("honesty")));
        assert!(graph.has_edge(idx("honesty"), idx("truthfulness")));
        // the hypernym generalizes its root, one direction only
        assert!(graph.has_edge(idx("honesty"), idx("integrity")));
        assert!(!graph.has_edge(idx("integrity"), idx("honesty")));
        assert!(!graph.has_edge(idx("honesty"), idx("honesty")));
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn dangling_root_becomes_trailing_node() {
        let records = vec![
            ValueRecord::core("care"),
            ValueRecord::new("kindness", ValueCategory::Synonym, "compassion", false),
        ];
        let graph = RelationGraph::from_records(&records);
        assert_eq!(graph.names(), &["care", "kindness", "compassion"]);
        assert!(graph.has_edge(1, 2));
        assert!(graph.has_edge(2, 1));
    }

    #[test]
    fn reachability_is_reflexive_and_transitive() {
        let mut graph = RelationGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_node("d");
        let reach = graph.reachability();

        assert!(reach[0][0] && reach[0][1] && reach[0][2]);
        assert!(!reach[2][0]);
        assert!(!reach[0][3] && reach[3][3]);
    }
}
