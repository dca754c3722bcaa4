use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::MergeConfig;
use crate::input::InputError;
use crate::input::table::{ReadOptions, Table, read_table, write_csv};
use crate::model::sample_id::sample_key;
use crate::pipeline::join::{Suffixes, left_join};
use crate::pipeline::stage2_clinical::{SAMPLE_KEY, build_clinical, require_column};

pub const LABEL_KEY: &str = "sample_id";

#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("label table {} not found; run the label step first", path.display())]
    LabelsNotFound { path: PathBuf },
    #[error("missing column '{column}' in {table}")]
    MissingColumn { column: String, table: String },
}

#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub table: Table,
    /// Clinical rows that received a label.
    pub n_labeled: usize,
}

impl MergeOutput {
    pub fn status_columns(&self) -> Vec<String> {
        self.table
            .columns
            .iter()
            .filter(|c| c.ends_with("_status"))
            .cloned()
            .collect()
    }
}

pub fn load_labels(path: &Path) -> Result<Table, MergeError> {
    read_table(path, ReadOptions::csv()).map_err(|e| {
        if e.is_not_found() {
            MergeError::LabelsNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MergeError::Input(e)
        }
    })
}

/// Left-joins labels onto clinical rows by sample-level key. The clinical
/// `Sample_ID` column is replaced by its key, and the label-side
/// `sample_id` column is dropped from the result.
pub fn attach_labels(mut clinical: Table, mut labels: Table) -> Result<MergeOutput, MergeError> {
    let left_key = require_column(&clinical, SAMPLE_KEY, "merged clinical table")?;
    let right_key = require_column(&labels, LABEL_KEY, "label table")?;
    clinical.map_column(left_key, sample_key);
    labels.map_column(right_key, sample_key);

    let joined = left_join(&clinical, left_key, &labels, right_key, Suffixes::XY);
    let mut table = joined.table;
    table.drop_column(LABEL_KEY);

    Ok(MergeOutput {
        table,
        n_labeled: joined.matched_left_rows,
    })
}

pub fn compute_merge(cfg: &MergeConfig) -> Result<MergeOutput, MergeError> {
    tracing::info!(
        patient = %cfg.patient.display(),
        sample = %cfg.sample.display(),
        "loading clinical tables"
    );
    let clinical = build_clinical(&cfg.patient, &cfg.sample, &cfg.keep_columns)?;
    let labels = load_labels(&cfg.labels)?;
    let n_clinical = clinical.n_rows();
    let out = attach_labels(clinical, labels)?;

    let unlabeled = n_clinical.saturating_sub(out.n_labeled);
    if unlabeled > 0 {
        tracing::warn!(unlabeled, "clinical rows without a matching label");
    }
    tracing::info!(
        n_rows = out.table.n_rows(),
        n_labeled = out.n_labeled,
        "labels attached"
    );
    Ok(out)
}

pub fn run_merge(cfg: &MergeConfig) -> Result<MergeOutput, MergeError> {
    let out = compute_merge(cfg)?;
    write_csv(&out.table, &cfg.output)?;
    tracing::info!(output = %cfg.output.display(), "merged table written");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_merge.rs"]
mod tests;
