//! Error types and context helpers for engine operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all engine operations
#[derive(Debug)]
pub enum EngineError {
    /// Region geometry could not be fetched or parsed
    ///
    /// Fatal for INIT: no partial universe is ever published.
    WorldLoad {
        /// Location the geometry was requested from
        location: String,
        /// Description of what went wrong
        reason: String,
    },

    /// Optional distance matrix could not be fetched or parsed
    MatrixLoad {
        /// Location the matrix was requested from
        location: String,
        /// Description of what went wrong
        reason: String,
    },

    /// A data source holds nothing for the requested location
    MissingResource {
        /// Location that could not be resolved
        location: String,
    },

    /// Region geometry cannot be normalized
    InvalidGeometry {
        /// Identifier of the offending region
        region: String,
        /// Explanation of the defect
        reason: String,
    },

    /// A clue references a region outside the loaded universe
    UnknownRegion {
        /// The unresolved region identifier
        id: String,
    },

    /// A filter request arrived before any successful INIT
    NotLoaded,

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The engine worker thread is no longer reachable
    WorkerUnavailable {
        /// What was being attempted
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorldLoad { location, reason } => {
                write!(f, "Failed to load map data from '{location}': {reason}")
            }
            Self::MatrixLoad { location, reason } => {
                write!(f, "Failed to load distance matrix from '{location}': {reason}")
            }
            Self::MissingResource { location } => {
                write!(f, "No data available at '{location}'")
            }
            Self::InvalidGeometry { region, reason } => {
                write!(f, "Invalid geometry for region '{region}': {reason}")
            }
            Self::UnknownRegion { id } => write!(f, "Unknown region '{id}'"),
            Self::NotLoaded => write!(f, "Data not loaded"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::WorkerUnavailable { reason } => {
                write!(f, "Engine worker unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, EngineError>;

/// Attaches a path and operation to raw I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into a [`EngineError::FileSystem`] naming the path
    ///
    /// # Errors
    ///
    /// Propagates the original error with path context applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| EngineError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EngineError {
    EngineError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid geometry error for a region
pub fn invalid_geometry(region: &impl ToString, reason: &impl ToString) -> EngineError {
    EngineError::InvalidGeometry {
        region: region.to_string(),
        reason: reason.to_string(),
    }
}
