use std::path::PathBuf;

use thiserror::Error;

use crate::config::LabelConfig;
use crate::input::InputError;
use crate::input::expression::{coerce_numeric, scan_gene_row};
use crate::input::table::{Table, write_csv};
use crate::model::sample_id::truncate_sample_id;
use crate::model::status::ExpressionStatus;
use crate::report::{format_expression, quantile_linear};

#[derive(Debug, Error)]
pub enum LabelError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("gene {gene} not found in {}", path.display())]
    GeneNotFound { gene: String, path: PathBuf },
    #[error("quantile must lie strictly between 0 and 1, got {0}")]
    InvalidQuantile(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelRow {
    pub sample_id: String,
    pub expression: f64,
    pub status: ExpressionStatus,
}

#[derive(Debug, Clone)]
pub struct LabelSet {
    pub gene: String,
    pub quantile: f64,
    pub threshold: f64,
    pub rows: Vec<LabelRow>,
}

impl LabelSet {
    pub fn expression_column(&self) -> String {
        format!("{}_expression", self.gene)
    }

    pub fn status_column(&self) -> String {
        format!("{}_status", self.gene)
    }

    pub fn n_enriched(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == ExpressionStatus::Enriched)
            .count()
    }

    pub fn n_missing(&self) -> usize {
        self.rows.iter().filter(|r| r.expression.is_nan()).count()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new(vec![
            "sample_id".to_string(),
            self.expression_column(),
            self.status_column(),
        ]);
        for row in &self.rows {
            let expression = format_expression(row.expression);
            table.push_row(vec![
                Some(row.sample_id.clone()),
                (!expression.is_empty()).then_some(expression),
                Some(row.status.as_str().to_string()),
            ]);
        }
        table
    }
}

/// Labels samples against the `quantile` of their own expression values.
/// Sample identifiers are cut to their sample-level prefix; repeats are
/// kept as separate rows.
pub fn build_labels(gene: &str, quantile: f64, samples: &[String], values: &[f64]) -> LabelSet {
    let threshold = quantile_linear(values, quantile);
    let rows = samples
        .iter()
        .zip(values)
        .map(|(sample, &expression)| LabelRow {
            sample_id: truncate_sample_id(sample),
            expression,
            status: ExpressionStatus::classify(expression, threshold),
        })
        .collect();
    LabelSet {
        gene: gene.to_string(),
        quantile,
        threshold,
        rows,
    }
}

pub fn compute_labels(cfg: &LabelConfig) -> Result<LabelSet, LabelError> {
    if !(cfg.quantile > 0.0 && cfg.quantile < 1.0) {
        return Err(LabelError::InvalidQuantile(cfg.quantile));
    }

    tracing::info!(
        input = %cfg.input.display(),
        gene = %cfg.gene,
        "scanning expression matrix"
    );
    let scan = scan_gene_row(&cfg.input, &cfg.gene, &cfg.annotation_columns)?;
    tracing::debug!(
        n_genes = scan.n_genes,
        n_samples = scan.n_samples,
        duplicate_rows = scan.duplicate_rows,
        gene_column = %scan.gene_column,
        "expression matrix scanned"
    );

    let Some(row) = scan.row else {
        return Err(LabelError::GeneNotFound {
            gene: cfg.gene.clone(),
            path: cfg.input.clone(),
        });
    };

    let values: Vec<f64> = row.raw_values.iter().map(|v| coerce_numeric(v)).collect();
    let set = build_labels(&cfg.gene, cfg.quantile, &row.samples, &values);

    let n_missing = set.n_missing();
    if n_missing > 0 {
        tracing::warn!(
            n_missing,
            "non-numeric expression values treated as missing and labeled not_enriched"
        );
    }
    tracing::info!(
        threshold = set.threshold,
        n_samples = set.rows.len(),
        n_enriched = set.n_enriched(),
        "labels computed"
    );
    Ok(set)
}

/// Computes the labels and writes them to `cfg.output`. Nothing is written
/// when the gene is absent.
pub fn run_label(cfg: &LabelConfig) -> Result<LabelSet, LabelError> {
    let set = compute_labels(cfg)?;
    write_csv(&set.to_table(), &cfg.output)?;
    tracing::info!(output = %cfg.output.display(), "labels written");
    Ok(set)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_label.rs"]
mod tests;
