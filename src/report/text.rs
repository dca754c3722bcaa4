use std::path::{Path, PathBuf};

use crate::pipeline::stage1_label::LabelSet;
use crate::pipeline::stage3_merge::MergeOutput;
use crate::report::{format_quantile, format_sig4};

pub fn render_label_confirmation(output: &Path, set: &LabelSet) -> String {
    format!(
        "Saved labels -> {}\n   Gene={}, quantile={}, threshold={}\n",
        resolved(output).display(),
        set.gene,
        format_quantile(set.quantile),
        format_sig4(set.threshold)
    )
}

pub fn render_merge_confirmation(output: &Path, out: &MergeOutput) -> String {
    format!(
        "Saved merged clinical + labels -> {}\n   Rows: {}  with label cols: [{}]\n",
        resolved(output).display(),
        out.table.n_rows(),
        out.status_columns()
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

fn resolved(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
