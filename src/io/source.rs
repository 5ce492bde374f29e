//! Resolution of INIT locations into document text

use crate::io::error::{EngineError, Result, WithPath};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Fetches the text behind a location named in an INIT request
pub trait DataSource {
    /// Read the whole document at `location`
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be resolved or read
    fn fetch(&self, location: &str) -> Result<String>;
}

/// Reads locations from the local file system
///
/// Accepts plain paths and `file://` URLs. Relative paths resolve against
/// the configured root, or the working directory when none is set.
#[derive(Clone, Debug, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    /// Resolve relative locations against the working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locations against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Path a location maps to
    pub fn resolve(&self, location: &str) -> PathBuf {
        let raw = Path::new(location.strip_prefix("file://").unwrap_or(location));
        match &self.root {
            Some(root) if raw.is_relative() => root.join(raw),
            _ => raw.to_path_buf(),
        }
    }
}

impl DataSource for FileSource {
    fn fetch(&self, location: &str) -> Result<String> {
        let path = self.resolve(location);
        std::fs::read_to_string(&path).with_path(&path, "read")
    }
}

/// Serves documents registered in memory, for embedding hosts and tests
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under a location
    #[must_use]
    pub fn with_document(mut self, location: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(location.into(), text.into());
        self
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, location: &str) -> Result<String> {
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| EngineError::MissingResource {
                location: location.to_string(),
            })
    }
}
