//! Reflexive-transitive order over value names.
//!
//! The closure is materialized once at construction and never mutated, so
//! `is_less_or_equal` is a table lookup. Cycles are allowed; elements on a
//! cycle are simply mutually `<=`.

use std::collections::HashMap;

use crate::relations::RelationGraph;

#[derive(Debug, Clone)]
pub struct Poset {
    names: Vec<String>,
    index: HashMap<String, usize>,
    /// `closure[a][b]` iff `a <= b`. Diagonal is always set.
    closure: Vec<Vec<bool>>,
}

impl Poset {
    /// Compute the reflexive transitive closure of `graph`: one DFS per node,
    /// O(V·(V+E)) time and V² space.
    pub fn new(graph: &RelationGraph) -> Self {
        let names = graph.names().to_vec();
        let index = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        let closure = graph.reachability();
        let poset = Self {
            names,
            index,
            closure,
        };
        tracing::debug!(
            nodes = poset.len(),
            relations = poset.relation_count(),
            "computed transitive closure"
        );
        poset
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
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

    /// Number of `(a, b)` pairs with `a <= b`, reflexive pairs included.
    pub fn relation_count(&self) -> usize {
        self.closure
            .iter()
            .map(|row| row.iter().filter(|&&le| le).count())
            .sum()
    }

    /// True iff `a == b` or `b` is reachable from `a`. Unknown names are
    /// only equal to themselves.
    pub fn is_less_or_equal(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => self.le(i, j),
            _ => false,
        }
    }

    pub(crate) fn le(&self, a: usize, b: usize) -> bool {
        self.closure[a][b]
    }

    /// All `x` with `a <= x`, `a` included, in node order.
    pub fn upper_set(&self, a: &str) -> Vec<&str> {
        match self.index_of(a) {
            Some(i) => self.upper_indices(i).map(|x| self.name(x)).collect(),
            None => Vec::new(),
        }
    }

    /// All `x` with `x <= a`, `a` included, in node order.
    pub fn lower_set(&self, a: &str) -> Vec<&str> {
        match self.index_of(a) {
            Some(i) => self.lower_indices(i).map(|x| self.name(x)).collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn upper_indices(&self, a: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&x| self.le(a, x))
    }

    pub(crate) fn lower_indices(&self, a: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&x| self.le(x, a))
    }

    /// Elements with nothing strictly below them. Members of a cycle with
    /// nothing else below count as minimal.
    pub fn minimal_elements(&self) -> Vec<&str> {
        (0..self.len())
            .filter(|&x| self.lower_indices(x).all(|y| self.le(x, y)))
            .map(|x| self.name(x))
            .collect()
    }

    /// Elements with nothing strictly above them.
    pub fn maximal_elements(&self) -> Vec<&str> {
        (0..self.len())
            .filter(|&x| self.upper_indices(x).all(|y| self.le(y, x)))
            .map(|x| self.name(x))
            .collect()
    }

    /// Distinct pairs `(a, b)` with `a <= b` and `b <= a`, listed once with
    /// `a` before `b` in node order.
    pub fn antisymmetry_violations(&self) -> Vec<(&str, &str)> {
        let n = self.len();
        let mut out = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                if self.le(a, b) && self.le(b, a) {
                    out.push((self.name(a), self.name(b)));
                }
            }
        }
        out
    }
}
