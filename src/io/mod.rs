//! Input/output operations, configuration and error handling

/// Command-line interface
pub mod cli;
/// Engine constants and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// GeoJSON feature collection parsing and emission
pub mod geojson;
/// Precomputed distance matrix artifact
pub mod matrix;
/// Generation progress reporting
pub mod progress;
/// Document sources for INIT locations
pub mod source;
