//! Relation extraction: value records in, generalization graph and relation sets out.
//!
//! Edge direction is "more specific -> more general". Synonyms become
//! equivalence classes, anti-value flags become antonym pairs, and everything
//! left unreachable in both directions is reported as incomparable.

pub mod extract;
pub mod graph;

pub use extract::{extract_relations, AntonymPair, OrderPair, RelationSets};
pub use graph::RelationGraph;
