//! Area relocation of arbitrary tables
//!
//! Every column is copied verbatim except the area column, which is replaced
//! by the area resolved from the phone-number column.

use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use dialplan_core::{ColumnConfig, Diagnostic, DiagnosticCode, Location, RecordError, Severity, UNKNOWN_AREA};
use dialplan_engine::AreaResolver;

use crate::error::TableError;
use crate::fs;
use crate::source::column_position;

/// Rows between progress events
const PROGRESS_INTERVAL: u64 = 100_000;

/// Row-level diagnostics kept per run; counts keep going past it
pub const MAX_DIAGNOSTICS: usize = 1_000;

/// Outcome of a relocation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relocation {
    /// Data rows processed (header excluded)
    pub rows: u64,

    /// Rows whose number matched an area code
    pub resolved: u64,

    /// Rows that fell back to "Unknown"
    pub unknown: u64,

    /// Rows whose area value was rewritten to something different
    pub changed: u64,

    /// Findings for unknown and changed rows, capped at [`MAX_DIAGNOSTICS`]
    pub diagnostics: Vec<Diagnostic>,

    findings: u64,
}

impl Relocation {
    /// Whether any diagnostics were dropped because of the cap
    pub fn is_truncated(&self) -> bool {
        self.findings > self.diagnostics.len() as u64
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        self.findings += 1;
        if self.diagnostics.len() < MAX_DIAGNOSTICS {
            self.diagnostics.push(diagnostic);
        }
    }
}

/// Relocate `input` into `output`
///
/// `source_name` labels diagnostic locations.
pub fn relocate<R: Read, W: Write>(
    resolver: &AreaResolver<'_>,
    columns: &ColumnConfig,
    input: R,
    output: W,
    source_name: &str,
) -> Result<Relocation, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let mut wtr = csv::Writer::from_writer(output);

    let headers = rdr.headers()?.clone();
    let number_col = column_position(&headers, &columns.phone_number)?;
    let area_col = column_position(&headers, &columns.area)?;
    wtr.write_record(&headers)?;

    let started = Instant::now();
    let mut relocation = Relocation::default();
    let mut fields: Vec<String> = Vec::with_capacity(headers.len());

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let raw_number = record.get(number_col).ok_or_else(|| RecordError::MalformedRow {
            line,
            reason: format!("missing '{}' value", columns.phone_number),
        })?;

        let area = resolver.resolve(raw_number);
        let previous = record.get(area_col).unwrap_or_default();

        relocation.rows += 1;
        if area == UNKNOWN_AREA {
            relocation.unknown += 1;
            relocation.push(
                Diagnostic::new(
                    DiagnosticCode::AreaUnknown,
                    Severity::Info,
                    format!("No area code matches '{}'", raw_number),
                )
                .with_location(Location::with_line(source_name, line).in_column(columns.phone_number.as_str())),
            );
        } else {
            relocation.resolved += 1;
        }

        if area != previous {
            relocation.changed += 1;
            if area != UNKNOWN_AREA {
                relocation.push(
                    Diagnostic::new(
                        DiagnosticCode::AreaChanged,
                        Severity::Warn,
                        format!("Area for '{}' rewritten", raw_number),
                    )
                    .with_location(Location::with_line(source_name, line).in_column(columns.area.as_str()))
                    .with_comparison(previous, area),
                );
            }
        }

        fields.clear();
        fields.extend(record.iter().map(str::to_string));
        if fields.len() <= area_col {
            fields.resize(area_col + 1, String::new());
        }
        fields[area_col] = area.to_string();
        wtr.write_record(&fields)?;

        if relocation.rows % PROGRESS_INTERVAL == 0 {
            tracing::debug!(rows = relocation.rows, unknown = relocation.unknown, "updating locations");
        }
    }

    wtr.flush()?;

    tracing::info!(
        rows = relocation.rows,
        resolved = relocation.resolved,
        unknown = relocation.unknown,
        changed = relocation.changed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "relocation finished"
    );

    Ok(relocation)
}

/// Relocate the table at `input` into a new table at `output`
///
/// `output` is left untouched when the input has a bad row.
pub fn relocate_file(
    resolver: &AreaResolver<'_>,
    columns: &ColumnConfig,
    input: &Path,
    output: &Path,
) -> Result<Relocation, TableError> {
    let reader = fs::open(input)?;
    let source_name = input.display().to_string();
    fs::write_atomically(output, |writer| relocate(resolver, columns, reader, writer, &source_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialplan_core::AreaCodeIndex;
    use pretty_assertions::assert_eq;

    fn run(input: &str) -> (Relocation, String) {
        let index = AreaCodeIndex::build([("20", "London"), ("207", "Soho")]).unwrap();
        let resolver = AreaResolver::new(&index);
        let mut out = Vec::new();
        let relocation = relocate(&resolver, &ColumnConfig::default(), input.as_bytes(), &mut out, "numbers.csv").unwrap();
        (relocation, String::from_utf8(out).unwrap())
    }

    #[test]
    fn rewrites_area_and_keeps_other_columns() {
        let (relocation, out) = run(
            "Name,Phone Number,Area,Notes\n\
             Ada,20712345,,first\n\
             Bob,(20) 199-2345,Somewhere,\"a, b\"\n\
             Cy,0800 123,London,\n",
        );

        assert_eq!(
            out,
            "Name,Phone Number,Area,Notes\n\
             Ada,20712345,Soho,first\n\
             Bob,(20) 199-2345,London,\"a, b\"\n\
             Cy,0800 123,Unknown,\n"
        );
        assert_eq!(relocation.rows, 3);
        assert_eq!(relocation.resolved, 2);
        assert_eq!(relocation.unknown, 1);
        assert_eq!(relocation.changed, 3);
    }

    #[test]
    fn unchanged_rows_produce_no_diagnostics() {
        let (relocation, out) = run("Phone Number,Area\n2019912345,London\n2071234567,Soho\n");

        assert_eq!(out, "Phone Number,Area\n2019912345,London\n2071234567,Soho\n");
        assert_eq!(relocation.changed, 0);
        assert!(relocation.diagnostics.is_empty());
    }

    #[test]
    fn diagnostics_carry_row_locations() {
        let (relocation, _) = run("Phone Number,Area\n2019912345,Soho\n9999,London\n");

        assert_eq!(relocation.diagnostics.len(), 2);

        let changed = &relocation.diagnostics[0];
        assert_eq!(changed.code, DiagnosticCode::AreaChanged);
        assert_eq!(changed.location, Some(Location::with_line("numbers.csv", 2).in_column("Area")));
        assert_eq!(changed.expected.as_deref(), Some("Soho"));
        assert_eq!(changed.actual.as_deref(), Some("London"));

        let unknown = &relocation.diagnostics[1];
        assert_eq!(unknown.code, DiagnosticCode::AreaUnknown);
        assert_eq!(unknown.location.as_ref().and_then(|l| l.line), Some(3));
        assert!(!relocation.is_truncated());
    }

    #[test]
    fn missing_area_column_is_a_record_error() {
        let index = AreaCodeIndex::build([("20", "London")]).unwrap();
        let resolver = AreaResolver::new(&index);
        let err = relocate(
            &resolver,
            &ColumnConfig::default(),
            "Phone Number\n2019912345\n".as_bytes(),
            Vec::new(),
            "numbers.csv",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TableError::Record(RecordError::MissingColumn { ref column }) if column == "Area"
        ));
    }

    #[test]
    fn missing_number_column_is_a_record_error() {
        let index = AreaCodeIndex::build([("20", "London")]).unwrap();
        let resolver = AreaResolver::new(&index);
        let err = relocate(
            &resolver,
            &ColumnConfig::default(),
            "Number,Area\n2019912345,London\n".as_bytes(),
            Vec::new(),
            "numbers.csv",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TableError::Record(RecordError::MissingColumn { ref column }) if column == "Phone Number"
        ));
    }

    #[test]
    fn row_without_a_number_reports_its_line() {
        let index = AreaCodeIndex::build([("20", "London")]).unwrap();
        let resolver = AreaResolver::new(&index);
        let err = relocate(
            &resolver,
            &ColumnConfig::default(),
            "Area,Phone Number\nLondon,2019912345\nSoho\n".as_bytes(),
            Vec::new(),
            "numbers.csv",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TableError::Record(RecordError::MalformedRow { line: 3, ref reason }) if reason.contains("Phone Number")
        ));
    }
}
