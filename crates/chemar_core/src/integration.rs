//! # Integration Traits
//!
//! Traits the AR host implements so the core can drive its scene graph.
//!
//! ```text
//! Core defines:         Host implements:
//! ┌───────────────┐    ┌───────────────────┐
//! │ EntityFactory │ ←─ │ prefab instancing │
//! │ ProductSpawner│ ←─ │ CO2 model         │
//! │ ReadinessSink │ ←─ │ React button      │
//! │ AudioCue      │ ←─ │ audio source      │
//! └───────────────┘    └───────────────────┘
//! ```
//!
//! The core never inspects an entity beyond its handle and element tag.

use chemar_shared::{ElementKind, Pose, Quaternion};

use crate::entity::EntityId;

/// Everything the host needs to instantiate one atom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomSpawn {
    /// Element to instantiate.
    pub kind: ElementKind,
    /// World pose, already raised above the marker.
    pub pose: Pose,
    /// Uniform scale.
    pub scale: f32,
    /// Local rotation of the electron orbit child.
    pub orbit_rotation: Quaternion,
}

// ============================================================================
// ATOMS
// ============================================================================

/// Creates, moves, hides and destroys atom entities.
pub trait EntityFactory: Send {
    /// Returns true if a visual is configured for `kind`.
    ///
    /// Kinds without a template are treated like unknown markers.
    fn has_template(&self, kind: ElementKind) -> bool;

    /// Instantiates an atom and returns its handle.
    fn spawn_atom(&mut self, spawn: &AtomSpawn) -> EntityId;

    /// Moves an existing atom.
    fn move_entity(&mut self, entity: EntityId, pose: Pose);

    /// Shows or hides an existing atom without destroying it.
    fn set_visible(&mut self, entity: EntityId, visible: bool);

    /// Destroys an atom. The handle is dead afterwards.
    fn destroy(&mut self, entity: EntityId);
}

// ============================================================================
// REACTION OUTPUTS
// ============================================================================

/// Instantiates the reaction product. Fire-and-forget.
pub trait ProductSpawner: Send {
    /// Spawns the product at `pose`.
    fn spawn_product(&mut self, pose: Pose);
}

/// Receives readiness transitions, e.g. to enable a button.
pub trait ReadinessSink: Send {
    /// Called only when readiness actually flips.
    fn readiness_changed(&mut self, ready: bool);
}

/// Plays the reaction sound.
pub trait AudioCue: Send {
    /// Called once per successful reaction.
    fn play_reaction(&mut self);
}

/// Sink that ignores readiness changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ReadinessSink for NullSink {
    fn readiness_changed(&mut self, _ready: bool) {}
}

/// Silent audio.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl AudioCue for Silence {
    fn play_reaction(&mut self) {}
}
