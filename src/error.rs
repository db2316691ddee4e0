//! Error types for reading count files and exporting reports.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsdError {
    /// File could not be opened, read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in a count file
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Requested percentile outside of [0, 100]
    #[error("Invalid percentile {0}: must lie within [0, 100]")]
    InvalidPercentile(f64),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JsdError>;

impl JsdError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JsdError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the contents of an input file.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, JsdError::Parse { .. })
    }
}
