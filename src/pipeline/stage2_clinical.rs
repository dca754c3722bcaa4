use std::path::Path;

use crate::input::table::{ReadOptions, Table, read_table};
use crate::model::columns::normalize_columns;
use crate::pipeline::join::{Suffixes, left_join};
use crate::pipeline::stage3_merge::MergeError;

pub const PATIENT_KEY: &str = "Patient_ID";
pub const SAMPLE_KEY: &str = "Sample_ID";

const CLINICAL_SUFFIXES: Suffixes<'static> = Suffixes {
    left: "_sample",
    right: "_patient",
};

/// Loads a clinical table: `#` lines skipped, every cell kept as text,
/// header names normalized.
pub fn load_clinical(path: &Path) -> Result<Table, MergeError> {
    let mut table = read_table(path, ReadOptions::clinical_tsv())?;
    normalize_columns(&mut table);
    tracing::debug!(
        path = %path.display(),
        n_rows = table.n_rows(),
        n_columns = table.columns.len(),
        "clinical table loaded"
    );
    Ok(table)
}

pub fn require_column(table: &Table, column: &str, which: &str) -> Result<usize, MergeError> {
    table
        .column_index(column)
        .ok_or_else(|| MergeError::MissingColumn {
            column: column.to_string(),
            table: which.to_string(),
        })
}

/// Attaches patient attributes to every sample row. Sample rows whose
/// patient is unknown are kept with empty patient fields.
pub fn join_clinical(sample: &Table, patient: &Table) -> Result<Table, MergeError> {
    let left_key = require_column(sample, PATIENT_KEY, "sample table")?;
    let right_key = require_column(patient, PATIENT_KEY, "patient table")?;
    let joined = left_join(sample, left_key, patient, right_key, CLINICAL_SUFFIXES);

    let unmatched = sample.n_rows() - joined.matched_left_rows;
    if unmatched > 0 {
        tracing::warn!(unmatched, "sample rows without a matching patient row");
    }
    if joined.table.n_rows() > sample.n_rows() {
        tracing::warn!(
            extra_rows = joined.table.n_rows() - sample.n_rows(),
            "repeated Patient_ID in patient table multiplied sample rows"
        );
    }
    Ok(joined.table)
}

/// Keeps the allow-listed columns that exist, in allow-list order.
pub fn project_columns(table: &Table, keep: &[String]) -> Table {
    let projected = table.select(keep);
    let absent: Vec<&str> = keep
        .iter()
        .filter(|k| !table.has_column(k))
        .map(String::as_str)
        .collect();
    if !absent.is_empty() {
        tracing::debug!(?absent, "allow-listed columns not present");
    }
    projected
}

pub fn build_clinical(
    patient_path: &Path,
    sample_path: &Path,
    keep: &[String],
) -> Result<Table, MergeError> {
    let patient = load_clinical(patient_path)?;
    let sample = load_clinical(sample_path)?;
    let joined = join_clinical(&sample, &patient)?;
    Ok(project_columns(&joined, keep))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_clinical.rs"]
mod tests;
