use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::input::{InputError, cell_from_raw, open_maybe_gz};

/// Text table with nullable cells. Every value stays a string; numeric
/// coercion happens at the call sites that need it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub delimiter: u8,
    pub skip_comment_lines: bool,
}

impl ReadOptions {
    pub fn clinical_tsv() -> Self {
        Self {
            delimiter: b'\t',
            skip_comment_lines: true,
        }
    }

    pub fn csv() -> Self {
        Self {
            delimiter: b',',
            skip_comment_lines: false,
        }
    }
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn rename_columns(&mut self, f: impl Fn(&str) -> String) {
        for name in &mut self.columns {
            *name = f(name);
        }
    }

    pub fn map_column(&mut self, col: usize, f: impl Fn(&str) -> String) {
        for row in &mut self.rows {
            if let Some(Some(value)) = row.get_mut(col) {
                *value = f(value);
            }
        }
    }

    /// Returns the columns of `names` present in this table, in the order
    /// given by `names`. Absent names are skipped.
    pub fn select(&self, names: &[String]) -> Table {
        let picked: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        let columns = picked.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| picked.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Table { columns, rows }
    }

    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }
}

/// Reads a delimited text file into a [`Table`]. The first record is the
/// header. With `skip_comment_lines`, records whose first byte is `#` are
/// ignored wherever they occur.
pub fn read_table(path: &Path, opts: ReadOptions) -> Result<Table, InputError> {
    let reader = open_maybe_gz(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(opts.skip_comment_lines.then_some(b'#'))
        .from_reader(reader);

    let mut records = rdr.records();
    let header = match records.next() {
        Some(rec) => rec.map_err(|e| InputError::csv(path, e))?,
        None => {
            return Err(InputError::Empty {
                path: path.to_path_buf(),
            });
        }
    };
    let mut table = Table::new(header.iter().map(|s| s.to_string()).collect());
    let width = table.columns.len();

    for (idx, rec) in records.enumerate() {
        let rec = rec.map_err(|e| InputError::csv(path, e))?;
        if rec.len() == 1 && rec.get(0).is_some_and(str::is_empty) {
            continue;
        }
        if rec.len() > width && rec.iter().skip(width).any(|f| !f.is_empty()) {
            return Err(InputError::Parse(format!(
                "{}: data row {} has {} fields, header has {}",
                path.display(),
                idx + 1,
                rec.len(),
                width
            )));
        }
        let row = rec.iter().take(width).map(cell_from_raw).collect();
        table.push_row(row);
    }

    Ok(table)
}

/// Writes `table` as comma-separated text with a header row, creating the
/// parent directory when missing. Null cells are written empty.
pub fn write_csv(table: &Table, path: &Path) -> Result<(), InputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| InputError::io(parent, e))?;
        }
    }
    let file = File::create(path).map_err(|e| InputError::io(path, e))?;
    let mut w = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(file));

    w.write_record(&table.columns)
        .map_err(|e| InputError::csv(path, e))?;
    for row in &table.rows {
        w.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))
            .map_err(|e| InputError::csv(path, e))?;
    }
    w.flush().map_err(|e| InputError::io(path, e))?;
    Ok(())
}
