//! Graphviz DOT export of the generalization graph.
//!
//! Rendering to an image is left to external tools (`dot -Tpng`). Large
//! graphs are sampled down to core values and a few neighbors each.

use std::collections::HashSet;

use crate::records::{ValueCategory, ValueTable};
use crate::relations::RelationGraph;

/// Neighbors kept per core value, in each direction, when sampling.
const NEIGHBORS_PER_CORE: usize = 2;

#[derive(Debug, Clone)]
pub struct DotOptions {
    pub title: String,
    pub max_nodes: usize,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            title: "Values Lattice Structure".to_string(),
            max_nodes: 20,
        }
    }
}

pub fn render_dot(graph: &RelationGraph, values: &ValueTable, opts: &DotOptions) -> String {
    let nodes = select_nodes(graph, values, opts.max_nodes);
    let selected: HashSet<usize> = nodes.iter().copied().collect();

    let mut out = String::new();
    out.push_str("digraph values {\n");
    out.push_str("  rankdir=BT;\n");
    out.push_str(&format!("  label=\"{}\";\n", escape(&opts.title)));
    out.push_str("  node [style=filled, fontsize=10];\n");
    for &idx in &nodes {
        let name = graph.name(idx);
        out.push_str(&format!(
            "  \"{}\" [fillcolor={}];\n",
            escape(name),
            node_color(values, name)
        ));
    }
    for (u, v) in graph.edges() {
        if selected.contains(&u) && selected.contains(&v) {
            out.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                escape(graph.name(u)),
                escape(graph.name(v))
            ));
        }
    }
    out.push_str("}\n");
    out
}

/// All nodes when the graph is small enough; otherwise each core value
/// followed by up to two successors and two predecessors, truncated.
fn select_nodes(graph: &RelationGraph, values: &ValueTable, max_nodes: usize) -> Vec<usize> {
    if graph.len() <= max_nodes {
        return (0..graph.len()).collect();
    }

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); graph.len()];
    for (u, v) in graph.edges() {
        predecessors[v].push(u);
    }

    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    let cores = values
        .records()
        .iter()
        .filter(|r| r.category == ValueCategory::Core)
        .filter_map(|r| graph.index_of(&r.name));
    for core in cores {
        let succ = graph.successors(core).iter().take(NEIGHBORS_PER_CORE);
        let pred = predecessors[core].iter().take(NEIGHBORS_PER_CORE);
        for idx in std::iter::once(&core).chain(succ).chain(pred) {
            if seen.insert(*idx) {
                nodes.push(*idx);
            }
        }
        if nodes.len() >= max_nodes {
            break;
        }
    }
    nodes.truncate(max_nodes);
    nodes
}

fn node_color(values: &ValueTable, name: &str) -> &'static str {
    match values.get(name) {
        Some(record) if record.is_anti_value => "red",
        Some(record) if record.category == ValueCategory::Core => "green",
        Some(record) if record.category == ValueCategory::Synonym => "lightblue",
        _ => "orange",
    }
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
