//! Geodesic distance engine for deducing an unknown region from distance clues
//!
//! The system precomputes a symmetric pairwise minimum-distance matrix between
//! regions offline, and at runtime narrows the region universe to the subset
//! consistent with every clue, falling back to on-demand geometric computation
//! backed by a runtime memo.

#![forbid(unsafe_code)]

/// Distance computation, caching, candidate filtering and matrix generation
pub mod algorithm;
/// Message-driven engine with a serialized request worker
pub mod engine;
/// Input/output operations, configuration and error handling
pub mod io;
/// Spherical geometry utilities
pub mod math;
/// Region model, mainland derivation and simplification
pub mod spatial;

pub use io::error::{EngineError, Result};
