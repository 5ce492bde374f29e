//! Region model and derived geometry
//!
//! This module contains region-level functionality including:
//! - Region identity and the loaded region universe
//! - Mainland derivation for territory exclusion
//! - Geometry simplification for offline batch work

/// Mainland selection and the per-world mainland side table
pub mod mainland;
/// Region identity, attributes and the region universe
pub mod region;
/// Douglas-Peucker polygon simplification
pub mod simplify;

pub use mainland::{MainlandTable, TerritoryMode};
pub use region::{Region, RegionId, World};
