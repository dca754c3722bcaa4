mod config;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, LabelConfig, MergeConfig};
use crate::pipeline::stage1_label::run_label;
use crate::pipeline::stage3_merge::run_merge;
use crate::report::json::{label_summary, merge_summary, write_summary};
use crate::report::text::{render_label_confirmation, render_merge_confirmation};

/// Expression-based sample labeling and clinical metadata merging.
#[derive(Debug, Parser)]
#[command(name = "kira-subgroups", version, about)]
struct Cli {
    /// TOML file with [label] and [merge] settings; flags override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Label samples enriched/not_enriched for one gene's expression.
    Label(LabelArgs),
    /// Merge patient and sample clinical tables with the label table.
    Merge(MergeArgs),
    /// Run label, then merge on its output.
    Run {
        /// Write a JSON summary of the label step here.
        #[arg(long)]
        label_summary: Option<PathBuf>,
        /// Write a JSON summary of the merge step here.
        #[arg(long)]
        merge_summary: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct LabelArgs {
    /// Genes-by-samples expression matrix (TSV, optionally .gz).
    #[arg(long)]
    input: Option<PathBuf>,
    /// Gene identifier to label on.
    #[arg(long)]
    gene: Option<String>,
    /// Quantile fraction in (0, 1) used as the enrichment threshold.
    #[arg(long)]
    quantile: Option<f64>,
    /// Destination CSV.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Header column that is an annotation, not a sample (repeatable).
    #[arg(long = "annotation-column")]
    annotation_columns: Vec<String>,
    /// Write a JSON summary of the run here.
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct MergeArgs {
    /// Patient-level clinical table (TSV).
    #[arg(long)]
    patient: Option<PathBuf>,
    /// Sample-level clinical table (TSV).
    #[arg(long)]
    sample: Option<PathBuf>,
    /// Label table written by the label step.
    #[arg(long)]
    labels: Option<PathBuf>,
    /// Destination CSV.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write a JSON summary of the run here.
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = Config::load_or_default(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Label(args) => {
            let summary = args.summary.clone();
            let cfg = apply_label_args(config.label, args);
            label_step(&cfg, summary.as_deref())
        }
        Command::Merge(args) => {
            let summary = args.summary.clone();
            let cfg = apply_merge_args(config.merge, args);
            merge_step(&cfg, summary.as_deref())
        }
        Command::Run {
            label_summary,
            merge_summary,
        } => run_pipeline(config, label_summary.as_deref(), merge_summary.as_deref()),
    }
}

/// Labels first, then merges against the label table just written.
fn run_pipeline(
    mut config: Config,
    label_summary: Option<&Path>,
    merge_summary: Option<&Path>,
) -> Result<(), String> {
    config.merge.labels = config.label.output.clone();
    label_step(&config.label, label_summary)?;
    merge_step(&config.merge, merge_summary)
}

fn label_step(cfg: &LabelConfig, summary: Option<&Path>) -> Result<(), String> {
    let set = run_label(cfg).map_err(|e| e.to_string())?;
    print!("{}", render_label_confirmation(&cfg.output, &set));
    if let Some(path) = summary {
        write_summary(path, &label_summary(cfg, &set)).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn merge_step(cfg: &MergeConfig, summary: Option<&Path>) -> Result<(), String> {
    let out = run_merge(cfg).map_err(|e| e.to_string())?;
    print!("{}", render_merge_confirmation(&cfg.output, &out));
    if let Some(path) = summary {
        write_summary(path, &merge_summary(cfg, &out)).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn apply_label_args(mut cfg: LabelConfig, args: LabelArgs) -> LabelConfig {
    if let Some(input) = args.input {
        cfg.input = input;
    }
    if let Some(gene) = args.gene {
        cfg.gene = gene;
    }
    if let Some(quantile) = args.quantile {
        cfg.quantile = quantile;
    }
    if let Some(out) = args.out {
        cfg.output = out;
    }
    if !args.annotation_columns.is_empty() {
        cfg.annotation_columns = args.annotation_columns;
    }
    cfg
}

fn apply_merge_args(mut cfg: MergeConfig, args: MergeArgs) -> MergeConfig {
    if let Some(patient) = args.patient {
        cfg.patient = patient;
    }
    if let Some(sample) = args.sample {
        cfg.sample = sample;
    }
    if let Some(labels) = args.labels {
        cfg.labels = labels;
    }
    if let Some(out) = args.out {
        cfg.output = out;
    }
    cfg
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
