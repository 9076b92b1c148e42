#![forbid(unsafe_code)]

//! # values-compass
//!
//! Turns a flat value/anti-value taxonomy into a checked order structure.
//!
//! Value records (core values with their synonyms, hypernyms and antonyms) are
//! read into a generalization graph, where an edge `a -> b` means "b is at least
//! as general as a". Its reflexive-transitive closure is treated as a partial
//! order. The lattice stage certifies whether every pair of values has a unique
//! least upper and greatest lower bound. The Galois stage checks, for each two
//! value/anti-value pairs, the duality condition `(av1 <= v2) == (v1 <= av2)`.
//!
//! Each stage writes a JSON artifact so the next one (or an external
//! visualizer) can pick it up without re-parsing the source CSV.

pub mod config;
pub mod dot;
pub mod galois;
pub mod lattice;
pub mod pipeline;
pub mod poset;
pub mod records;
pub mod relations;
pub mod report;
pub mod taxonomy;

pub use config::CompassConfig;
pub use galois::{validate_all_pairs, validate_pair, PairSource, ValidationResults};
pub use lattice::{LatticeEvaluator, LatticeProperties};
pub use pipeline::{formalize, refresh_lattice_properties, validate, Formalized};
pub use poset::Poset;
pub use records::{load_records, parse_records, RecordError, ValueCategory, ValueRecord, ValueTable};
pub use relations::{extract_relations, AntonymPair, OrderPair, RelationGraph, RelationSets};
pub use report::{render_report_markdown, ReportOptions, ValidationReport};
pub use taxonomy::{FormalTaxonomy, PosetProperties, TaxonomyError};
