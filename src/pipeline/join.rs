use std::collections::{HashMap, HashSet};

use crate::input::table::Table;

#[derive(Debug, Clone, Copy)]
pub struct Suffixes<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

impl Suffixes<'static> {
    pub const XY: Suffixes<'static> = Suffixes {
        left: "_x",
        right: "_y",
    };
}

#[derive(Debug, Clone)]
pub struct JoinOutput {
    pub table: Table,
    /// Left rows that found at least one partner.
    pub matched_left_rows: usize,
}

/// Left join of `left` and `right` on `left[left_key] == right[right_key]`.
///
/// Every left row is kept in order and repeated once per matching right
/// row. Unmatched rows get null right-hand cells, and null keys never
/// match. When both key columns share a name the right key is not
/// repeated. Other names present on both sides get the suffixes.
pub fn left_join(
    left: &Table,
    left_key: usize,
    right: &Table,
    right_key: usize,
    suffixes: Suffixes<'_>,
) -> JoinOutput {
    let same_key_name = left.columns[left_key] == right.columns[right_key];
    let right_cols: Vec<usize> = (0..right.columns.len())
        .filter(|&i| !(same_key_name && i == right_key))
        .collect();

    let left_names: HashSet<&str> = left.columns.iter().map(String::as_str).collect();
    let right_names: HashSet<&str> = right_cols
        .iter()
        .map(|&i| right.columns[i].as_str())
        .collect();

    let mut columns = Vec::with_capacity(left.columns.len() + right_cols.len());
    for (i, name) in left.columns.iter().enumerate() {
        let shared_key = same_key_name && i == left_key;
        if !shared_key && right_names.contains(name.as_str()) {
            columns.push(format!("{name}{}", suffixes.left));
        } else {
            columns.push(name.clone());
        }
    }
    for &i in &right_cols {
        let name = &right.columns[i];
        if left_names.contains(name.as_str()) {
            columns.push(format!("{name}{}", suffixes.right));
        } else {
            columns.push(name.clone());
        }
    }

    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (r, row) in right.rows.iter().enumerate() {
        if let Some(Some(key)) = row.get(right_key) {
            index.entry(key.as_str()).or_default().push(r);
        }
    }

    let mut table = Table::new(columns);
    let mut matched_left_rows = 0usize;
    let empty: Vec<usize> = Vec::new();
    for (r, row) in left.rows.iter().enumerate() {
        let partners = left
            .cell(r, left_key)
            .and_then(|k| index.get(k))
            .unwrap_or(&empty);
        if partners.is_empty() {
            let mut out = row.clone();
            out.extend(std::iter::repeat_n(None, right_cols.len()));
            table.rows.push(out);
            continue;
        }
        matched_left_rows += 1;
        for &r in partners {
            let mut out = row.clone();
            out.extend(right_cols.iter().map(|&i| right.rows[r][i].clone()));
            table.rows.push(out);
        }
    }

    JoinOutput {
        table,
        matched_left_rows,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/join.rs"]
mod tests;
