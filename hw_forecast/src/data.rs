//! Series loading from CSV files

use crate::error::{ForecastError, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column read by default, matching `timestamp,value` files
pub const DEFAULT_VALUE_COLUMN: usize = 1;

/// Loader for single-column numeric series
#[derive(Debug, Clone)]
pub struct SeriesLoader {
    column: usize,
    has_header: bool,
}

impl Default for SeriesLoader {
    fn default() -> Self {
        Self {
            column: DEFAULT_VALUE_COLUMN,
            has_header: true,
        }
    }
}

impl SeriesLoader {
    /// Loader for the default value column of a file with a header row
    pub fn new() -> Self {
        Self::default()
    }

    /// Read values from the zero-based `column`
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    /// Whether the first row is a header to skip
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Load the series from a CSV file
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<Vec<f64>> {
        let file = File::open(path)?;
        self.load_reader(file)
    }

    /// Load the series from any CSV source
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<f64>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut series = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let field = record.get(self.column).ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Line {} has no column {} ({} fields)",
                    line,
                    self.column,
                    record.len()
                ))
            })?;

            let value = field.parse::<f64>().map_err(|e| {
                ForecastError::DataError(format!(
                    "Invalid value '{}' at line {}: {}",
                    field, line, e
                ))
            })?;
            series.push(value);
        }

        if series.is_empty() {
            return Err(ForecastError::DataError(
                "No data found in file".to_string(),
            ));
        }

        Ok(series)
    }
}
