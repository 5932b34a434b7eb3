use std::path::PathBuf;
use thiserror::Error;

/// Error type for climatology and catalog operations.
#[derive(Error, Debug)]
pub enum CordexError {
    #[error("At least 12 monthly time steps are required, got {time_steps}")]
    InsufficientData { time_steps: usize },
    #[error("Shape mismatch along {axis}: expected {expected}, got {got}")]
    ShapeMismatch {
        axis: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("Least squares solve failed: {0}")]
    LeastSquares(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Folder name {0:?} does not follow the CORDEX dataset naming pattern")]
    InvalidDatasetName(String),
    #[error("Invalid catalog configuration: {0}")]
    Config(String),
    #[error("Missing data: {0}")]
    MissingData(String),
}

impl CordexError {
    /// Wrap an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CordexError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type for `Result<T, CordexError>`.
pub type CordexResult<T> = Result<T, CordexError>;
