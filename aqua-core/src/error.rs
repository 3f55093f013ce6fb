/// Error types for loading region catalogues
use crate::stress::UnknownStressLevel;
use thiserror::Error;

/// Failure while parsing or validating a region catalogue.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// Could not read the catalogue file
    #[error("Failed to read region catalogue: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Header row does not name the expected columns in order
    #[error("Unexpected header '{found}', expected '{expected}'")]
    UnexpectedHeader { expected: String, found: String },

    /// A row is shorter than the header
    #[error("Row {row}: missing field '{field}'")]
    MissingField { row: usize, field: &'static str },

    /// A numeric column holds something that is not a number
    #[error("Row {row}: invalid number '{value}' for '{field}'")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// Stress column is not one of low/medium/high/critical/emergency
    #[error("Row {row}: {source}")]
    StressLevel {
        row: usize,
        #[source]
        source: UnknownStressLevel,
    },

    /// A percentage split does not add up to 100
    #[error("Region {id}: {split} split sums to {total}, expected 100")]
    SplitMismatch {
        id: String,
        split: &'static str,
        total: u64,
    },

    /// Two rows share the same region id
    #[error("Duplicate region id: {0}")]
    DuplicateId(String),
}

/// Type alias for Results using CatalogueError
pub type Result<T> = std::result::Result<T, CatalogueError>;
