use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::{LabelConfig, MergeConfig};
use crate::pipeline::stage1_label::LabelSet;
use crate::pipeline::stage3_merge::MergeOutput;

const TOOL_NAME: &str = "kira-subgroups";

#[derive(Debug, Clone, Serialize)]
pub struct LabelSummary {
    pub tool: &'static str,
    pub version: &'static str,
    pub step: &'static str,
    pub input: String,
    pub output: String,
    pub gene: String,
    pub quantile: f64,
    pub threshold: Option<f64>,
    pub n_samples: usize,
    pub n_enriched: usize,
    pub n_missing: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    pub tool: &'static str,
    pub version: &'static str,
    pub step: &'static str,
    pub patient: String,
    pub sample: String,
    pub labels: String,
    pub output: String,
    pub n_rows: usize,
    pub n_labeled: usize,
    pub columns: Vec<String>,
    pub label_columns: Vec<String>,
}

pub fn label_summary(cfg: &LabelConfig, set: &LabelSet) -> LabelSummary {
    LabelSummary {
        tool: TOOL_NAME,
        version: env!("CARGO_PKG_VERSION"),
        step: "label",
        input: cfg.input.display().to_string(),
        output: cfg.output.display().to_string(),
        gene: set.gene.clone(),
        quantile: set.quantile,
        threshold: (!set.threshold.is_nan()).then_some(set.threshold),
        n_samples: set.rows.len(),
        n_enriched: set.n_enriched(),
        n_missing: set.n_missing(),
    }
}

pub fn merge_summary(cfg: &MergeConfig, out: &MergeOutput) -> MergeSummary {
    MergeSummary {
        tool: TOOL_NAME,
        version: env!("CARGO_PKG_VERSION"),
        step: "merge",
        patient: cfg.patient.display().to_string(),
        sample: cfg.sample.display().to_string(),
        labels: cfg.labels.display().to_string(),
        output: cfg.output.display().to_string(),
        n_rows: out.table.n_rows(),
        n_labeled: out.n_labeled,
        columns: out.table.columns.clone(),
        label_columns: out.status_columns(),
    }
}

pub fn render_summary_json<T: Serialize>(summary: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(summary)?;
    json.push('\n');
    Ok(json)
}

pub fn write_summary<T: Serialize>(path: &Path, summary: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = render_summary_json(summary)?;
    fs::write(path, json)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
