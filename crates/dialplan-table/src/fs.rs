//! File helpers that keep the path in the error

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::TableError;

/// Open a table for buffered reading
pub fn open(path: &Path) -> Result<BufReader<File>, TableError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TableError::File {
            path: path.display().to_string(),
            source,
        })
}

/// Write a table through a temporary file next to `path`
///
/// `path` is only replaced once `write` succeeds. On error the temporary
/// file is removed and whatever was at `path` stays as it was.
pub fn write_atomically<T, F>(path: &Path, write: F) -> Result<T, TableError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T, TableError>,
{
    let file_error = |source: std::io::Error| TableError::File {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(file_error)?;

    let value = {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let value = write(&mut writer)?;
        writer.into_inner().map_err(|e| file_error(e.into_error()))?;
        value
    };

    tmp.persist(path).map_err(|e| file_error(e.error))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn replaces_target_on_success() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old\n").unwrap();

        let rows = write_atomically(&path, |w| {
            w.write_all(b"Phone Number,Area\n")?;
            Ok(1)
        })
        .unwrap();

        assert_eq!(rows, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Phone Number,Area\n");
    }

    #[test]
    fn failed_write_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let err = write_atomically(&path, |w| -> Result<(), TableError> {
            w.write_all(b"Phone Number,Area\n")?;
            Err(dialplan_core::RecordError::MissingColumn { column: "Area".to_string() }.into())
        })
        .unwrap_err();

        assert!(matches!(err, TableError::Record(_)));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_write_keeps_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old\n").unwrap();

        let result = write_atomically(&path, |_| -> Result<(), TableError> {
            Err(std::io::Error::other("interrupted").into())
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
    }
}
