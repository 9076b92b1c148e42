#![forbid(unsafe_code)]

use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use values_compass::dot::{render_dot, DotOptions};
use values_compass::galois::PairSource;
use values_compass::records::{load_records, ValueTable};
use values_compass::relations::RelationGraph;
use values_compass::report::{render_report_markdown, ReportOptions};
use values_compass::taxonomy::FormalTaxonomy;
use values_compass::{pipeline, CompassConfig};

#[derive(Parser)]
#[command(name = "compass", version, about = "Values taxonomy order-structure toolkit")]
struct Cli {
    /// Directory for default input and output paths
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract relations from a values CSV and write the formal taxonomy
    Formalize {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also write a Graphviz DOT file
        #[arg(long)]
        visualize: bool,
        #[arg(long)]
        viz_output: Option<PathBuf>,
    },
    /// Reload a formal taxonomy and recompute its lattice properties
    Lattice {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        visualize: bool,
        #[arg(long)]
        viz_output: Option<PathBuf>,
    },
    /// Check Galois-connection duality over value/anti-value pairs
    Validate {
        /// Values CSV supplying the pairs
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        taxonomy: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = CliPairSource::RootGroups)]
        pairs: CliPairSource,
        #[arg(long, value_enum, default_value_t = CliReportFormat::Json)]
        format: CliReportFormat,
        /// Pair-validation rows shown in Markdown output
        #[arg(long, default_value_t = 50)]
        max_rows: usize,
    },
}

/// CLI-facing pair source enum (clap::ValueEnum).
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliPairSource {
    RootGroups,
    Relations,
}

impl From<CliPairSource> for PairSource {
    fn from(p: CliPairSource) -> Self {
        match p {
            CliPairSource::RootGroups => PairSource::RootGroups,
            CliPairSource::Relations => PairSource::Relations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliReportFormat {
    Json,
    Md,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "compass failed");
            eprintln!("Error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = CompassConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Formalize {
            input,
            output,
            visualize,
            viz_output,
        } => {
            let input = input.unwrap_or_else(|| config.values_csv());
            let output = output.unwrap_or_else(|| config.formal_taxonomy());

            let records = load_records(&input)?;
            let formalized = pipeline::formalize(&records);
            let taxonomy = &formalized.taxonomy;
            ensure_parent(&output)?;
            taxonomy.save(&output)?;

            println!("Formal taxonomy written to {}", output.display());
            println!("  values: {}", taxonomy.values.len());
            println!("  order relations: {}", taxonomy.relations.partial_order.len());
            println!(
                "  equivalence classes: {}",
                taxonomy.relations.equivalence_classes.len()
            );
            println!("  antonym pairs: {}", taxonomy.relations.antonym_pairs.len());
            println!(
                "  incomparable pairs: {}",
                taxonomy.relations.incomparable.len()
            );
            println!("  is lattice: {}", taxonomy.poset_properties.is_lattice);

            if visualize {
                let path = viz_output.unwrap_or_else(|| output.with_extension("dot"));
                write_dot(&path, &formalized.graph, &taxonomy.values, &config)?;
            }
        }
        Commands::Lattice {
            input,
            output,
            visualize,
            viz_output,
        } => {
            let input = input.unwrap_or_else(|| config.formal_taxonomy());
            let output = output.unwrap_or_else(|| config.lattice_taxonomy());

            let mut taxonomy = FormalTaxonomy::load(&input)?;
            let props = pipeline::refresh_lattice_properties(&mut taxonomy);
            ensure_parent(&output)?;
            taxonomy.save(&output)?;

            println!("Lattice taxonomy written to {}", output.display());
            println!("  is lattice: {}", props.is_lattice);
            println!("  is complete lattice: {}", props.is_complete_lattice);

            if visualize {
                let path = viz_output.unwrap_or_else(|| output.with_extension("dot"));
                write_dot(&path, &taxonomy.graph(), &taxonomy.values, &config)?;
            }
        }
        Commands::Validate {
            input,
            taxonomy,
            output,
            pairs,
            format,
            max_rows,
        } => {
            let input = input.unwrap_or_else(|| config.values_csv());
            let taxonomy_path = taxonomy.unwrap_or_else(|| config.formal_taxonomy());
            let output = output.unwrap_or_else(|| config.validation_report());

            let records = load_records(&input)?;
            let taxonomy = FormalTaxonomy::load(&taxonomy_path)?;
            let opts = ReportOptions {
                pair_source: pairs.into(),
                taxonomy_file: Some(taxonomy_path.display().to_string()),
                values_file: Some(input.display().to_string()),
            };
            let report = pipeline::validate(&records, &taxonomy, &opts);

            ensure_parent(&output)?;
            match format {
                CliReportFormat::Json => write_json(&output, &report)?,
                CliReportFormat::Md => {
                    std::fs::write(&output, render_report_markdown(&report, max_rows))?
                }
            }

            let summary = &report.validation_results.summary;
            println!("Validation report written to {}", output.display());
            println!("  pairs: {}", summary.total_pairs);
            println!("  combinations: {}", summary.total_pair_combinations);
            println!(
                "  valid/invalid: {}/{}",
                summary.valid_galois_connections, summary.invalid_galois_connections
            );
        }
    }

    Ok(())
}

fn write_dot(
    path: &Path,
    graph: &RelationGraph,
    values: &ValueTable,
    config: &CompassConfig,
) -> Result<(), io::Error> {
    let opts = DotOptions {
        max_nodes: config.viz_max_nodes,
        ..DotOptions::default()
    };
    ensure_parent(path)?;
    std::fs::write(path, render_dot(graph, values, &opts))?;
    println!("Graph written to {}", path.display());
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), io::Error> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), io::Error> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    std::fs::write(path, json)
}
