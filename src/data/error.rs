use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while turning a file into a [`HousingDataset`].
///
/// [`HousingDataset`]: super::model::HousingDataset
#[derive(Debug, Error)]
pub enum DataError {
    /// The file does not exist. The session cache recovers from this one by
    /// switching to synthetic data; every other variant is surfaced.
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("malformed Arrow record batch")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        message: String,
    },
}

impl DataError {
    /// Map an I/O error on `path`, keeping "file not found" distinguishable.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::NotFound(path)
        } else {
            DataError::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_keeps_not_found() {
        let err = DataError::from_io(
            "housing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "housing.csv not found");
    }

    #[test]
    fn test_from_io_other_kinds() {
        let err = DataError::from_io(
            "housing.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(!err.is_not_found());
        assert!(matches!(err, DataError::Io { .. }));
    }
}
