//! Generated number table ("Phone Number", "Area")

use std::io::Write;
use std::path::Path;

use dialplan_core::{ColumnConfig, ConfigurationError};
use dialplan_engine::GeneratedRecord;

use crate::error::TableError;
use crate::fs;

/// Records between progress events
const PROGRESS_INTERVAL: u64 = 100_000;

/// Streams generated records to a CSV writer, header first
pub struct NumberWriter<W: Write> {
    writer: csv::Writer<W>,
    written: u64,
}

impl<W: Write> NumberWriter<W> {
    pub fn new(inner: W, columns: &ColumnConfig) -> Result<Self, TableError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record([columns.phone_number.as_str(), columns.area.as_str()])?;
        Ok(Self { writer, written: 0 })
    }

    pub fn write(&mut self, record: &GeneratedRecord) -> Result<(), TableError> {
        self.writer
            .write_record([record.phone_number.as_str(), record.area.as_str()])?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the number of records written
    pub fn finish(mut self) -> Result<u64, TableError> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// Write every record from a generator, stopping at the first error
pub fn write_generated<W, I>(inner: W, columns: &ColumnConfig, records: I) -> Result<u64, TableError>
where
    W: Write,
    I: IntoIterator<Item = Result<GeneratedRecord, ConfigurationError>>,
{
    let mut writer = NumberWriter::new(inner, columns)?;

    for record in records {
        writer.write(&record?)?;
        if writer.written() % PROGRESS_INTERVAL == 0 {
            tracing::debug!(written = writer.written(), "writing phone numbers");
        }
    }

    writer.finish()
}

/// Write every record from a generator to `path`
///
/// Nothing is left at `path` when the generator fails part way through.
pub fn write_generated_file<I>(path: &Path, columns: &ColumnConfig, records: I) -> Result<u64, TableError>
where
    I: IntoIterator<Item = Result<GeneratedRecord, ConfigurationError>>,
{
    fs::write_atomically(path, |writer| write_generated(writer, columns, records))
}
