/// Two-tier distance resolution with a runtime memo
pub mod cache;
/// Candidate membership bitset over a region universe
pub mod candidates;
/// Minimum geodesic distance between region geometries
pub mod distance;
/// Clue-driven candidate filtering
pub mod filter;
/// Offline pairwise distance matrix generation
pub mod generator;
