//! Slice-height key file parsing.
//!
//! The key file is the delimited export of the measurement sheet: a header
//! line naming at least the `FileName` and `Z'` columns, then one row per
//! scan. Columns are discovered by header name, so their order and any extra
//! columns are irrelevant.

use std::fs;
use std::path::Path;

use crate::errors::{Result, SliceError};
use crate::float_types::Real;

const FILE_NAME_COLUMN: &str = "FileName";
const HEIGHT_COLUMN: &str = "Z'";

/// Read `(name, height)` rows from a key file.
///
/// Rows are returned in file order with no deduplication; feeding them to
/// [`crate::heights::build_height_map`] applies the first-occurrence-wins
/// policy. Blank lines are skipped, short or unparseable rows are errors.
pub fn read_height_rows(path: &Path) -> Result<Vec<(String, Real)>> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| key_error(path, "file is empty".to_string()))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    let name_column = find_column(&columns, FILE_NAME_COLUMN)
        .ok_or_else(|| key_error(path, format!("missing \"{FILE_NAME_COLUMN}\" column")))?;
    let height_column = find_column(&columns, HEIGHT_COLUMN)
        .ok_or_else(|| key_error(path, format!("missing \"{HEIGHT_COLUMN}\" column")))?;

    let mut rows = Vec::new();
    for (line_number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let name = fields.get(name_column).copied().ok_or_else(|| {
            key_error(path, format!("line {}: too few fields", line_number + 1))
        })?;
        let height = fields
            .get(height_column)
            .and_then(|field| field.parse::<Real>().ok())
            .ok_or_else(|| {
                key_error(path, format!("line {}: unparseable height", line_number + 1))
            })?;
        rows.push((name.to_string(), height));
    }

    Ok(rows)
}

fn find_column(columns: &[&str], name: &str) -> Option<usize> {
    columns.iter().position(|&column| column == name)
}

fn key_error(path: &Path, message: String) -> SliceError {
    SliceError::MalformedKeyFile {
        path: path.to_path_buf(),
        message,
    }
}
