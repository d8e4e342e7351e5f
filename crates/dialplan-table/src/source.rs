//! Area-code source table
//!
//! One row per code with at least a code column and an area column. Codes are
//! trimmed; area names are kept as written.

use std::io::Read;
use std::path::Path;

use dialplan_core::index::check_code;
use dialplan_core::{AreaCodeIndex, ColumnConfig, RecordError};

use crate::error::TableError;
use crate::fs;

/// Load the area-code table at `path`
pub fn load_area_codes(path: &Path, columns: &ColumnConfig) -> Result<AreaCodeIndex, TableError> {
    let index = read_area_codes(fs::open(path)?, columns)?;
    tracing::info!(path = %path.display(), codes = index.len(), "loaded area codes");
    Ok(index)
}

/// Read an area-code table from any reader
///
/// Stops at the first row with a missing or malformed code.
pub fn read_area_codes<R: Read>(reader: R, columns: &ColumnConfig) -> Result<AreaCodeIndex, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let code_col = column_position(&headers, &columns.phone_code)?;
    let area_col = column_position(&headers, &columns.area)?;

    let mut entries = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let code = record
            .get(code_col)
            .ok_or_else(|| RecordError::MalformedRow {
                line,
                reason: format!("missing '{}' value", columns.phone_code),
            })?
            .trim();
        check_code(code).map_err(|reason| RecordError::MalformedRow { line, reason })?;

        let area = record.get(area_col).ok_or_else(|| RecordError::MalformedRow {
            line,
            reason: format!("missing '{}' value", columns.area),
        })?;

        entries.push((code.to_string(), area.to_string()));
    }

    let rows = entries.len();
    let index = AreaCodeIndex::build(entries)?;
    if index.len() < rows {
        tracing::debug!(rows, codes = index.len(), "duplicate area codes overwritten");
    }

    Ok(index)
}

/// Position of a named column in the header row
pub(crate) fn column_position(headers: &csv::StringRecord, name: &str) -> Result<usize, RecordError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| RecordError::MissingColumn {
            column: name.to_string(),
        })
}
