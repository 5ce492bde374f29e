//! Mathematical utilities for the engine

/// Great-circle distances, bearings and point-to-arc distances
pub mod geodesy;
