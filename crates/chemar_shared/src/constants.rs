//! # Presentation Constants
//!
//! Defaults for how atoms are placed relative to their markers.
//! Every value here can be overridden through the scene configuration.

// =============================================================================
// PLACEMENT
// =============================================================================

/// Distance above a marker, along its local up axis, at which an atom floats (metres).
pub const VERTICAL_OFFSET: f32 = 0.1;

/// Uniform scale applied to freshly spawned atoms.
pub const ATOM_SCALE: f32 = 0.5;

// =============================================================================
// ELECTRON ORBIT
// =============================================================================

/// Local yaw given to an atom's electron orbit so it reads top-down (degrees).
pub const ORBIT_YAW_DEG: f32 = 90.0;

/// Electron orbit speed (degrees per second).
pub const ORBIT_SPEED_DEG_PER_SEC: f32 = 50.0;
