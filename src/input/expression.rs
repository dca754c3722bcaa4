use std::path::Path;

use crate::input::{InputError, open_maybe_gz};

/// One gene's row pulled out of a genes-by-samples matrix.
#[derive(Debug, Clone)]
pub struct GeneRow {
    pub samples: Vec<String>,
    pub raw_values: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ExpressionScan {
    pub gene_column: String,
    pub n_samples: usize,
    pub n_genes: usize,
    pub duplicate_rows: usize,
    pub row: Option<GeneRow>,
}

/// Streams a tab-separated expression matrix and keeps only the first row
/// whose identifier equals `gene`. Header columns named in
/// `annotation_columns` are not samples and are left out of the row.
pub fn scan_gene_row(
    path: &Path,
    gene: &str,
    annotation_columns: &[String],
) -> Result<ExpressionScan, InputError> {
    let reader = open_maybe_gz(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = csv::StringRecord::new();
    let has_header = rdr
        .read_record(&mut record)
        .map_err(|e| InputError::csv(path, e))?;
    if !has_header || record.is_empty() {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }

    let gene_column = record.get(0).unwrap_or_default().to_string();
    let sample_cols: Vec<(usize, String)> = record
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, name)| !annotation_columns.iter().any(|a| a == name))
        .map(|(i, name)| (i, name.to_string()))
        .collect();
    if sample_cols.is_empty() {
        return Err(InputError::Parse(format!(
            "{}: header lists no sample columns",
            path.display()
        )));
    }

    let mut n_genes = 0usize;
    let mut duplicate_rows = 0usize;
    let mut row: Option<GeneRow> = None;

    while rdr
        .read_record(&mut record)
        .map_err(|e| InputError::csv(path, e))?
    {
        n_genes += 1;
        if record.get(0) != Some(gene) {
            continue;
        }
        if row.is_some() {
            duplicate_rows += 1;
            continue;
        }
        let raw_values = sample_cols
            .iter()
            .map(|(i, _)| record.get(*i).unwrap_or_default().to_string())
            .collect();
        row = Some(GeneRow {
            samples: sample_cols.iter().map(|(_, name)| name.clone()).collect(),
            raw_values,
        });
    }

    if duplicate_rows > 0 {
        tracing::warn!(
            gene,
            duplicate_rows,
            "gene appears more than once in {}; using the first row",
            path.display()
        );
    }

    Ok(ExpressionScan {
        gene_column,
        n_samples: sample_cols.len(),
        n_genes,
        duplicate_rows,
        row,
    })
}

/// Coerces a raw expression cell to `f64`. Anything that does not parse
/// becomes `NaN`.
pub fn coerce_numeric(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/expression.rs"]
mod tests;
