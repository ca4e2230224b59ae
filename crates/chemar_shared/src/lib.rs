//! # CHEMAR Shared
//!
//! Common types used by the reaction core and by the AR host feeding it.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a rendering or tracking engine.
//! Hosts translate their engine types into these before calling the core.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod element;
pub mod marker;
pub mod math;

pub use constants::{ATOM_SCALE, ORBIT_SPEED_DEG_PER_SEC, ORBIT_YAW_DEG, VERTICAL_OFFSET};
pub use element::{ElementKind, ElementTable};
pub use marker::{MarkerEvent, MarkerId, MarkerSample, TrackingFrame, TrackingState};
pub use math::{Pose, Quaternion, Vec3};
