//! Engine constants and runtime configuration defaults

// Candidate filtering
/// Minimum tolerance applied to every non-zero clue, in kilometers
pub const DEFAULT_TOLERANCE_FLOOR_KM: f64 = 50.0;
/// Relative tolerance applied to the declared clue distance
pub const DEFAULT_TOLERANCE_RATIO: f64 = 0.05;

// Sentinel shared by the runtime cache and the offline matrix so both tiers agree
/// Distance reported for a pair whose every boundary sample failed
pub const UNKNOWN_DISTANCE_KM: f64 = 99_999.0;

// Offline matrix generation
/// Douglas-Peucker tolerance in degrees (roughly 16 km at the equator)
pub const DEFAULT_SIMPLIFY_TOLERANCE_DEG: f64 = 0.15;
/// Rows between progress log lines during generation
pub const PROGRESS_LOG_INTERVAL: usize = 10;
/// Width of the generation progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Region identity resolution, in precedence order after the feature `id`
/// Property keys holding a stable short code
pub const ID_PROPERTY_KEYS: &[&str] = &["ISO_A3", "iso_a3", "ADM0_A3"];
/// Property keys holding a display name
pub const NAME_PROPERTY_KEYS: &[&str] = &["name", "NAME", "ADMIN"];
/// Placeholder code Natural Earth uses for regions without an assigned code
pub const MISSING_CODE_PLACEHOLDER: &str = "-99";

// File defaults
/// Default distance matrix file name
pub const DEFAULT_MATRIX_FILE: &str = "distances.json";
