//! The formal taxonomy artifact: values, relation sets and poset properties.
//!
//! This is what visualizers and the validation stage read back. Reloading it
//! and recomputing the lattice stage reproduces the stored flags because the
//! relation sets carry the full order (strict edges plus equivalence classes).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lattice::{LatticeEvaluator, LatticeProperties};
use crate::poset::Poset;
use crate::records::ValueTable;
use crate::relations::{RelationGraph, RelationSets};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosetProperties {
    pub is_reflexive: bool,
    /// Asserted, never checked. See [`Poset::antisymmetry_violations`].
    pub is_antisymmetric: bool,
    pub is_transitive: bool,
    pub has_minimal_elements: bool,
    pub has_maximal_elements: bool,
    pub is_lattice: bool,
    pub is_complete_lattice: bool,
}

impl PosetProperties {
    pub fn from_evaluator(evaluator: &LatticeEvaluator) -> Self {
        let poset = evaluator.poset();
        let violations = poset.antisymmetry_violations();
        if !violations.is_empty() {
            tracing::warn!(
                pairs = violations.len(),
                first = ?violations[0],
                "order has mutually comparable distinct values; is_antisymmetric is still reported as true"
            );
        }
        let lattice = evaluator.properties();
        Self {
            is_reflexive: true,
            is_antisymmetric: true,
            is_transitive: true,
            has_minimal_elements: !poset.minimal_elements().is_empty(),
            has_maximal_elements: !poset.maximal_elements().is_empty(),
            is_lattice: lattice.is_lattice,
            is_complete_lattice: lattice.is_complete_lattice,
        }
    }

    pub fn lattice(&self) -> LatticeProperties {
        LatticeProperties {
            is_lattice: self.is_lattice,
            is_complete_lattice: self.is_complete_lattice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormalTaxonomy {
    pub values: ValueTable,
    pub relations: RelationSets,
    #[serde(default)]
    pub poset_properties: PosetProperties,
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid taxonomy json: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormalTaxonomy {
    /// Rebuild the generalization graph from the stored relation sets.
    pub fn graph(&self) -> RelationGraph {
        RelationGraph::from_relations(self.values.names(), &self.relations)
    }

    /// Rebuild the poset and re-run lattice certification.
    pub fn evaluator(&self) -> LatticeEvaluator {
        LatticeEvaluator::new(
            Poset::new(&self.graph()),
            self.relations.antonym_pairs.clone(),
        )
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let taxonomy: Self = serde_json::from_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            values = taxonomy.values.len(),
            "loaded formal taxonomy"
        );
        Ok(taxonomy)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TaxonomyError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| TaxonomyError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// blake3 hex digest of the compact JSON encoding.
    pub fn content_hash(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        blake3::hash(&bytes).to_hex().to_string()
    }
}
