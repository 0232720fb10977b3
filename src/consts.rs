//! Sentinel values and tolerances shared across the sweep-line engine.

/// 64-bit signed integer coordinate type. A `usingz`-enabled build still
/// uses this for X/Y; only the optional Z payload is a separate field.
pub type CInt = i64;

/// Dx sentinel for a horizontal edge. Chosen so it can never collide with a
/// real slope (`delta.x as f64 / delta.y as f64`); prefer [`crate::edge::TEdge::is_horizontal`]
/// over comparing against this directly.
pub const HORIZONTAL: f64 = -3.4e38;

/// Tolerance for near-zero floating point comparisons in area/slope checks.
pub const TOLERANCE: f64 = 1.0e-20;

/// Coordinates within `LO_RANGE` use plain `i64` slope-equality math.
pub const LO_RANGE: CInt = 0x3FFF_FFFF;
/// Coordinates up to `HI_RANGE` are accepted but force 128-bit slope math.
pub const HI_RANGE: CInt = 0x3FFF_FFFF_FFFF_FFFF;

pub(crate) const SCALE: f64 = 1e7;
