//! Validation report generation.

use serde::{Deserialize, Serialize};

use crate::galois::{PairSource, ValidationResults};
use crate::lattice::LatticeProperties;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportOptions {
    pub pair_source: PairSource,
    pub taxonomy_file: Option<String>,
    pub values_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_values: usize,
    pub total_nodes: usize,
    pub pair_source: PairSource,
    pub taxonomy_file: Option<String>,
    pub values_file: Option<String>,
    pub taxonomy_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub metadata: ReportMetadata,
    pub lattice_properties: LatticeProperties,
    pub validation_results: ValidationResults,
}

/// Markdown summary; per-combination detail is capped at `max_rows`.
pub fn render_report_markdown(report: &ValidationReport, max_rows: usize) -> String {
    let meta = &report.metadata;
    let summary = &report.validation_results.summary;

    let mut out = String::new();
    out.push_str("# Galois Connection Validation\n\n");
    out.push_str(&format!("- Taxonomy hash: `{}`\n", meta.taxonomy_hash));
    if let Some(path) = &meta.taxonomy_file {
        out.push_str(&format!("- Taxonomy file: {}\n", path));
    }
    if let Some(path) = &meta.values_file {
        out.push_str(&format!("- Values file: {}\n", path));
    }
    out.push_str(&format!("- Total values: {}\n", meta.total_values));
    out.push_str(&format!("- Poset nodes: {}\n", meta.total_nodes));
    out.push_str(&format!("- Pair source: {}\n", meta.pair_source));
    out.push_str(&format!(
        "- Is lattice: {}\n",
        report.lattice_properties.is_lattice
    ));
    out.push_str(&format!(
        "- Is complete lattice: {}\n",
        report.lattice_properties.is_complete_lattice
    ));

    out.push_str("\n## Summary\n\n");
    out.push_str(&format!(
        "- Value/anti-value pairs: {}\n",
        summary.total_pairs
    ));
    out.push_str(&format!(
        "- Combinations examined: {}\n",
        summary.total_pair_combinations
    ));
    out.push_str(&format!(
        "- Valid/invalid Galois connections: {}/{}\n",
        summary.valid_galois_connections, summary.invalid_galois_connections
    ));

    let validations = &report.validation_results.pair_validations;
    if !validations.is_empty() {
        out.push_str("\n## Pair Validations\n\n");
        out.push_str("| pair 1 | pair 2 | anti1 <= value2 | value1 <= anti2 | galois |\n");
        out.push_str("|---|---|---|---|---|\n");
        for v in validations.iter().take(max_rows) {
            out.push_str(&format!(
                "| {} / {} | {} / {} | {} | {} | {} |\n",
                v.pair1.value,
                v.pair1.anti_value,
                v.pair2.value,
                v.pair2.anti_value,
                v.condition1,
                v.condition2,
                v.is_galois_connection
            ));
        }
        if validations.len() > max_rows {
            out.push_str(&format!(
                "\n_{} more combinations omitted._\n",
                validations.len() - max_rows
            ));
        }
    }

    out
}
