//! CSV table reader
//!
//! Wraps the `csv` crate with the column contract every loader shares:
//! a header row is mandatory, required columns must be present and non-blank
//! on every row (fail-fast), and optional columns fall back to `None` when
//! the column is absent or the cell is blank.

use crate::error::{IngestError, IngestResult};
use std::path::Path;

/// A fully-read CSV file with resolved headers
#[derive(Debug)]
pub struct CsvTable {
    file_name: String,
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl CsvTable {
    /// Read a CSV file and verify its required columns up front
    pub fn read(path: &Path, required_columns: &[&str]) -> IngestResult<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| IngestError::Csv {
                file: file_name.clone(),
                source,
            })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| IngestError::Csv {
                file: file_name.clone(),
                source,
            })?
            .iter()
            // Excel exports lead with a UTF-8 BOM on the first header
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        for column in required_columns {
            if !headers.iter().any(|h| h == column) {
                return Err(IngestError::MissingColumn {
                    file: file_name,
                    column: column.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record.map_err(|source| IngestError::Csv {
                file: file_name.clone(),
                source,
            })?);
        }

        Ok(Self {
            file_name,
            headers,
            records,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Iterate data rows with 1-based data line numbers
    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.records.iter().enumerate().map(move |(i, record)| CsvRow {
            table: self,
            // header occupies line 1 of the file
            line: i + 2,
            record,
        })
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }
}

/// One data row of a [`CsvTable`]
pub struct CsvRow<'a> {
    table: &'a CsvTable,
    line: usize,
    record: &'a csv::StringRecord,
}

impl CsvRow<'_> {
    /// File line number of this row (header is line 1)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get a required field; blank cells are an error
    pub fn required(&self, column: &str) -> IngestResult<String> {
        match self.raw(column) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(IngestError::MissingField {
                file: self.table.file_name.clone(),
                line: self.line,
                column: column.to_string(),
            }),
        }
    }

    /// Get an optional field; absent columns and blank cells become `None`
    pub fn optional(&self, column: &str) -> Option<String> {
        self.raw(column)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Parse a required integer field
    pub fn required_i64(&self, column: &str) -> IngestResult<i64> {
        let value = self.required(column)?;
        value.parse().map_err(|_| IngestError::InvalidValue {
            file: self.table.file_name.clone(),
            line: self.line,
            column: column.to_string(),
            message: format!("'{}' is not an integer", value),
        })
    }

    /// Parse an optional integer field
    pub fn optional_i64(&self, column: &str) -> IngestResult<Option<i64>> {
        match self.optional(column) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| IngestError::InvalidValue {
                    file: self.table.file_name.clone(),
                    line: self.line,
                    column: column.to_string(),
                    message: format!("'{}' is not an integer", value),
                }),
            None => Ok(None),
        }
    }

    /// Parse an optional floating-point field
    pub fn optional_f64(&self, column: &str) -> IngestResult<Option<f64>> {
        match self.optional(column) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| IngestError::InvalidValue {
                    file: self.table.file_name.clone(),
                    line: self.line,
                    column: column.to_string(),
                    message: format!("'{}' is not a number", value),
                }),
            None => Ok(None),
        }
    }

    fn raw(&self, column: &str) -> Option<&str> {
        self.table
            .column_index(column)
            .and_then(|i| self.record.get(i))
            .map(str::trim)
    }
}
