use crate::input::table::Table;

/// Cleans a raw header name so both clinical tables agree on column keys:
/// trim, spaces to `_`, drop non-ASCII, hyphens to `_`.
///
/// Dropping non-ASCII characters can expose tabs or newlines at the ends
/// (`"é\té"`), so the result is trimmed once more. That makes the output a
/// fixed point: normalizing it again returns it unchanged.
pub fn normalize_column_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(char::is_ascii)
        .map(|c| if c == '-' { '_' } else { c })
        .collect();
    cleaned.trim().to_string()
}

pub fn normalize_columns(table: &mut Table) {
    table.rename_columns(normalize_column_name);
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/columns.rs"]
mod tests;
