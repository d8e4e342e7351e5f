//! Row-by-row table comparison
//!
//! Two tables are identical when every row pair matches field for field and
//! both have the same number of rows (header included). Raw file contents
//! are fingerprinted with SHA-256 while they are read.

use std::io::{self, Read};
use std::path::Path;

use dialplan_core::{Diagnostic, DiagnosticCode, Location, Severity};
use sha2::{Digest, Sha256};

use crate::error::TableError;
use crate::fs;

/// First pair of rows that differ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMismatch {
    /// 1-based row number, header is row 1
    pub row: u64,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// Result of comparing two tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableComparison {
    pub left_rows: u64,
    pub right_rows: u64,
    pub first_mismatch: Option<RowMismatch>,

    /// Hex SHA-256 of the left input bytes
    pub left_digest: String,

    /// Hex SHA-256 of the right input bytes
    pub right_digest: String,
}

impl TableComparison {
    pub fn is_identical(&self) -> bool {
        self.first_mismatch.is_none() && self.left_rows == self.right_rows
    }

    /// Byte-for-byte equality of the inputs
    pub fn same_bytes(&self) -> bool {
        self.left_digest == self.right_digest
    }

    /// Error diagnostics describing every difference found
    pub fn diagnostics(&self, left_name: &str, right_name: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if let Some(mismatch) = &self.first_mismatch {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::TableRowMismatch,
                    Severity::Error,
                    format!("Row {} of {} differs from {}", mismatch.row, right_name, left_name),
                )
                .with_location(Location::with_line(right_name, mismatch.row))
                .with_comparison(mismatch.left.join(","), mismatch.right.join(",")),
            );
        }

        if self.left_rows != self.right_rows {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::TableRowCountMismatch,
                    Severity::Error,
                    format!("{} and {} have different row counts", left_name, right_name),
                )
                .with_location(Location::new(right_name))
                .with_comparison(self.left_rows.to_string(), self.right_rows.to_string()),
            );
        }

        diagnostics
    }
}

/// Reader that hashes every byte passing through it
struct DigestReader<R> {
    inner: R,
    hasher: Sha256,
}

impl<R: Read> DigestReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Drain the rest of the input and return the hex digest
    fn finish(mut self) -> io::Result<String> {
        io::copy(&mut self, &mut io::sink())?;
        Ok(hex::encode(self.hasher.finalize()))
    }
}

impl<R: Read> Read for DigestReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// Compare two tables read from any readers
pub fn compare_tables<L: Read, R: Read>(left: L, right: R) -> Result<TableComparison, TableError> {
    let mut left_rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(DigestReader::new(left));
    let mut right_rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(DigestReader::new(right));

    let mut left_record = csv::StringRecord::new();
    let mut right_record = csv::StringRecord::new();
    let mut left_rows = 0u64;
    let mut right_rows = 0u64;
    let mut first_mismatch = None;

    loop {
        let left_more = left_rdr.read_record(&mut left_record)?;
        let right_more = right_rdr.read_record(&mut right_record)?;

        match (left_more, right_more) {
            (true, true) => {
                left_rows += 1;
                right_rows += 1;
                if first_mismatch.is_none() && left_record.iter().ne(right_record.iter()) {
                    first_mismatch = Some(RowMismatch {
                        row: left_rows,
                        left: left_record.iter().map(str::to_string).collect(),
                        right: right_record.iter().map(str::to_string).collect(),
                    });
                }
            }
            (true, false) => left_rows += 1,
            (false, true) => right_rows += 1,
            (false, false) => break,
        }
    }

    let comparison = TableComparison {
        left_rows,
        right_rows,
        first_mismatch,
        left_digest: left_rdr.into_inner().finish()?,
        right_digest: right_rdr.into_inner().finish()?,
    };

    tracing::debug!(
        left_rows,
        right_rows,
        identical = comparison.is_identical(),
        "compared tables"
    );

    Ok(comparison)
}

/// Compare the tables at two paths
pub fn compare_files(left: &Path, right: &Path) -> Result<TableComparison, TableError> {
    compare_tables(fs::open(left)?, fs::open(right)?)
}
