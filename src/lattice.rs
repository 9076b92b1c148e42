//! Join/meet evaluation and lattice certification over a [`Poset`].
//!
//! - `join(a, b)`: the unique minimal common upper bound, if any
//! - `meet(a, b)`: the unique maximal common lower bound, if any
//! - `is_lattice`: every pair has both, checked once at construction
//!
//! Results are cached per unordered pair on the evaluator instance. Each pair
//! is evaluated in one canonical orientation, later-declared element first,
//! which makes both operations commutative. When two elements are mutually
//! `<=`, `join` therefore resolves to the one declared earlier and `meet` to
//! the one declared later.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::poset::Poset;
use crate::relations::AntonymPair;

/// `is_complete_lattice` mirrors `is_lattice`: no arbitrary-subset
/// completeness check is performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeProperties {
    pub is_lattice: bool,
    pub is_complete_lattice: bool,
}

type PairCache = RefCell<HashMap<(usize, usize), Option<usize>>>;

pub struct LatticeEvaluator {
    poset: Poset,
    antonym_pairs: Vec<AntonymPair>,
    join_cache: PairCache,
    meet_cache: PairCache,
    properties: LatticeProperties,
}

impl LatticeEvaluator {
    /// Build the evaluator and eagerly certify the lattice property.
    ///
    /// The certification visits every unordered pair (self-pairs included)
    /// and stops at the first pair whose join or meet is undefined. Worst
    /// case O(V²) pairs, each O(V²) for the bound search.
    pub fn new(poset: Poset, antonym_pairs: Vec<AntonymPair>) -> Self {
        let mut evaluator = Self {
            poset,
            antonym_pairs,
            join_cache: RefCell::new(HashMap::new()),
            meet_cache: RefCell::new(HashMap::new()),
            properties: LatticeProperties::default(),
        };
        let is_lattice = evaluator.first_unbounded_pair().is_none();
        evaluator.properties = LatticeProperties {
            is_lattice,
            is_complete_lattice: is_lattice,
        };
        tracing::info!(
            nodes = evaluator.poset.len(),
            is_lattice,
            "evaluated lattice properties"
        );
        evaluator
    }

    pub fn poset(&self) -> &Poset {
        &self.poset
    }

    pub fn antonym_pairs(&self) -> &[AntonymPair] {
        &self.antonym_pairs
    }

    pub fn properties(&self) -> LatticeProperties {
        self.properties
    }

    pub fn is_lattice(&self) -> bool {
        self.properties.is_lattice
    }

    pub fn is_complete_lattice(&self) -> bool {
        self.properties.is_complete_lattice
    }

    pub fn is_less_or_equal(&self, a: &str, b: &str) -> bool {
        self.poset.is_less_or_equal(a, b)
    }

    /// Least upper bound of `a` and `b`, or `None` when no unique one exists.
    pub fn join<'a>(&'a self, a: &'a str, b: &'a str) -> Option<&'a str> {
        if a == b {
            return Some(a);
        }
        let (i, j) = self.indices(a, b)?;
        self.join_idx(i, j).map(|k| self.poset.name(k))
    }

    /// Greatest lower bound of `a` and `b`, or `None` when no unique one exists.
    pub fn meet<'a>(&'a self, a: &'a str, b: &'a str) -> Option<&'a str> {
        if a == b {
            return Some(a);
        }
        let (i, j) = self.indices(a, b)?;
        self.meet_idx(i, j).map(|k| self.poset.name(k))
    }

    /// The antonym partner of `a` from the first pair mentioning it.
    pub fn complementary_pair(&self, a: &str) -> Option<&str> {
        self.antonym_pairs.iter().find_map(|pair| {
            if pair.value == a {
                Some(pair.anti_value.as_str())
            } else if pair.anti_value == a {
                Some(pair.value.as_str())
            } else {
                None
            }
        })
    }

    /// Duality check through antonym complements:
    /// `(a' <= b) == (a <= b')`, false when either complement is missing.
    pub fn galois_connection(&self, a: &str, b: &str) -> bool {
        let (Some(a_comp), Some(b_comp)) = (self.complementary_pair(a), self.complementary_pair(b))
        else {
            return false;
        };
        self.poset.is_less_or_equal(a_comp, b) == self.poset.is_less_or_equal(a, b_comp)
    }

    /// First pair (in node order) lacking a join or a meet.
    pub fn first_unbounded_pair(&self) -> Option<(&str, &str)> {
        let n = self.poset.len();
        for i in 0..n {
            for j in i..n {
                if self.join_idx(i, j).is_none() || self.meet_idx(i, j).is_none() {
                    return Some((self.poset.name(i), self.poset.name(j)));
                }
            }
        }
        None
    }

    fn indices(&self, a: &str, b: &str) -> Option<(usize, usize)> {
        Some((self.poset.index_of(a)?, self.poset.index_of(b)?))
    }

    fn join_idx(&self, i: usize, j: usize) -> Option<usize> {
        if i == j {
            return Some(i);
        }
        let key = canonical(i, j);
        if let Some(hit) = self.join_cache.borrow().get(&key).copied() {
            return hit;
        }
        let result = self.compute_join(key.0, key.1);
        self.join_cache.borrow_mut().insert(key, result);
        result
    }

    fn meet_idx(&self, i: usize, j: usize) -> Option<usize> {
        if i == j {
            return Some(i);
        }
        let key = canonical(i, j);
        if let Some(hit) = self.meet_cache.borrow().get(&key).copied() {
            return hit;
        }
        let result = self.compute_meet(key.0, key.1);
        self.meet_cache.borrow_mut().insert(key, result);
        result
    }

    fn compute_join(&self, a: usize, b: usize) -> Option<usize> {
        let p = &self.poset;
        if p.le(a, b) {
            return Some(b);
        }
        if p.le(b, a) {
            return Some(a);
        }
        let common: Vec<usize> = p.upper_indices(a).filter(|&x| p.le(b, x)).collect();
        unique(
            common
                .iter()
                .copied()
                .filter(|&m| common.iter().all(|&t| t == m || !p.le(t, m))),
        )
    }

    fn compute_meet(&self, a: usize, b: usize) -> Option<usize> {
        let p = &self.poset;
        if p.le(a, b) {
            return Some(a);
        }
        if p.le(b, a) {
            return Some(b);
        }
        let common: Vec<usize> = p.lower_indices(a).filter(|&x| p.le(x, b)).collect();
        unique(
            common
                .iter()
                .copied()
                .filter(|&m| common.iter().all(|&q| q == m || !p.le(m, q))),
        )
    }
}

/// Unordered pair key, later-declared node first.
fn canonical(i: usize, j: usize) -> (usize, usize) {
    if i > j {
        (i, j)
    } else {
        (j, i)
    }
}

fn unique(mut candidates: impl Iterator<Item = usize>) -> Option<usize> {
    let first = candidates.next()?;
    match candidates.next() {
        None => Some(first),
        Some(_) => None,
    }
}
