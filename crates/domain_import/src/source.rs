//! Row sources
//!
//! A row source is any iterator of `Result<SourceRow, RowError>`. An `Err`
//! item is a record the source could not decode; it fails that row only.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{FieldError, ImportError, RowError};
use crate::normalize::{self, Cell};

/// One source row: column name to raw cell
///
/// A column that is absent reads exactly like an empty cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRow {
    cells: HashMap<String, Cell>,
}

impl SourceRow {
    /// Creates an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell setter
    pub fn with(mut self, column: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.insert(column, cell);
        self
    }

    /// Sets a cell, replacing any previous value
    pub fn insert(&mut self, column: impl Into<String>, cell: impl Into<Cell>) {
        self.cells.insert(column.into(), cell.into());
    }

    /// Removes a cell
    pub fn remove(&mut self, column: &str) -> Option<Cell> {
        self.cells.remove(column)
    }

    /// Raw cell of a column
    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn text(&self, column: &'static str) -> Option<String> {
        normalize::text(self.cell(column))
    }

    pub fn integer<T: TryFrom<i64>>(&self, column: &'static str) -> Result<Option<T>, FieldError> {
        normalize::integer(column, self.cell(column))
    }

    pub fn decimal(&self, column: &'static str) -> Result<Option<Decimal>, FieldError> {
        normalize::decimal(column, self.cell(column))
    }

    pub fn date(&self, column: &'static str) -> Result<Option<NaiveDate>, FieldError> {
        normalize::date(column, self.cell(column))
    }

    pub fn boolean(&self, column: &'static str) -> Option<bool> {
        normalize::boolean(self.cell(column))
    }
}

impl<K, V> FromIterator<(K, V)> for SourceRow
where
    K: Into<String>,
    V: Into<Cell>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = SourceRow::new();
        for (column, cell) in iter {
            row.insert(column, cell);
        }
        row
    }
}

/// Rows of a CSV file with a header row
///
/// Every cell is delivered as text. Header names are trimmed.
pub struct CsvRowSource {
    reader: csv::Reader<File>,
    headers: Vec<String>,
    path: PathBuf,
}

impl CsvRowSource {
    /// Opens the file and reads its header row
    ///
    /// # Errors
    ///
    /// `ImportError::FatalSource` if the file cannot be opened or has no
    /// readable header row.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref().to_path_buf();
        let fatal = |source| ImportError::FatalSource {
            path: path.clone(),
            source,
        };

        let mut reader = csv::Reader::from_path(&path).map_err(fatal)?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(fatal)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() {
            let empty = io::Error::new(io::ErrorKind::UnexpectedEof, "no header row");
            return Err(fatal(csv::Error::from(empty)));
        }

        debug!(path = %path.display(), columns = headers.len(), "Opened CSV source");

        Ok(Self {
            reader,
            headers,
            path,
        })
    }

    /// Column names from the header row
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for CsvRowSource {
    type Item = Result<SourceRow, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(false) => None,
            Ok(true) => Some(Ok(self
                .headers
                .iter()
                .zip(record.iter())
                .map(|(column, value)| (column.clone(), value))
                .collect())),
            Err(err) => Some(Err(RowError::from(err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_absent_column_reads_as_empty() {
        let row = SourceRow::new().with("age", "");
        assert_eq!(row.text("age"), None);
        assert_eq!(row.text("insured_sex"), None);
        assert_eq!(row.integer::<i32>("insured_zip"), Ok(None));
    }

    #[test]
    fn test_csv_rows_are_keyed_by_header() {
        let file = write_csv("age, insured_sex ,auto_year\n48,MALE,2004\n42,FEMALE,\n");
        let source = CsvRowSource::open(file.path()).unwrap();
        assert_eq!(source.headers(), &["age", "insured_sex", "auto_year"]);

        let rows: Vec<_> = source.collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].integer::<i32>("age"), Ok(Some(48)));
        assert_eq!(rows[0].text("insured_sex"), Some("MALE".to_string()));
        assert_eq!(rows[1].integer::<i32>("auto_year"), Ok(None));
    }

    #[test]
    fn test_record_with_wrong_field_count_fails_only_that_row() {
        let file = write_csv("age,insured_sex\n48,MALE\n1,2,3\n42,FEMALE\n");
        let items: Vec<_> = CsvRowSource::open(file.path()).unwrap().collect();

        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(RowError::Source { .. })));
        assert!(items[2].is_ok());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = CsvRowSource::open("/nonexistent/claims.csv");
        assert!(matches!(result, Err(ImportError::FatalSource { .. })));
    }

    #[test]
    fn test_empty_file_is_fatal() {
        let file = write_csv("");
        let result = CsvRowSource::open(file.path());

        match result {
            Err(err @ ImportError::FatalSource { .. }) => {
                assert!(err.to_string().contains("no header row"));
            }
            other => panic!("expected fatal source error, got {:?}", other.map(|s| s.headers().to_vec())),
        }
    }
}
