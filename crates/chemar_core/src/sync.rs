//! # Marker-Entity Synchronizer
//!
//! Turns the tracker's add/update/remove stream into a stable set of atom
//! entities, one per marker.
//!
//! ## Guarantees
//!
//! - At most one live entity per marker ID.
//! - Losing tracking hides an atom but keeps it, so a hand passing over a
//!   card does not make the atom (and the reaction button) flicker.
//! - Only `Added` and `Removed` change reaction-set membership; visibility
//!   never does.
//!
//! Tracker noise is absorbed, not reported: unknown labels, duplicate adds
//! and events for unknown markers all resolve to a [`SyncOutcome`].
//!
//! An entry whose atom is no longer in the coordinator (consumed by a
//! reaction that was not followed by [`MarkerSynchronizer::release`]) is
//! stale: the next event for its marker drops it and sees an unmapped marker.

use chemar_shared::{
    ElementKind, ElementTable, MarkerEvent, MarkerId, MarkerSample, Pose, Quaternion,
    TrackingState,
};
use std::collections::BTreeMap;

use crate::config::SceneConfig;
use crate::entity::EntityId;
use crate::integration::{AtomSpawn, EntityFactory};
use crate::reaction::ReactionCoordinator;

/// An atom bound to a marker.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedEntity {
    /// Marker the atom follows.
    pub marker: MarkerId,
    /// Host handle.
    pub entity: EntityId,
    /// Element, fixed at creation.
    pub kind: ElementKind,
    /// Current pose, offset already applied.
    pub pose: Pose,
    /// Whether the atom is currently shown.
    pub visible: bool,
}

/// Why an event produced no change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The label is not in the element table.
    UnknownLabel,
    /// The element has no visual configured in the host.
    MissingTemplate,
    /// Update or removal for a marker with no atom.
    UnmappedMarker,
    /// The tracker reported a NaN or infinite pose.
    InvalidPose,
}

/// What a single marker event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new atom was created.
    Spawned(EntityId),
    /// An existing atom was moved and shown.
    Moved(EntityId),
    /// An existing atom was hidden.
    Hidden(EntityId),
    /// An atom was destroyed.
    Removed(EntityId),
    /// Nothing happened.
    Ignored(IgnoreReason),
}

/// How atoms are placed relative to their marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Stand-off along the marker's up axis (metres).
    pub vertical_offset: f32,
    /// Uniform atom scale.
    pub atom_scale: f32,
    /// Electron orbit local rotation.
    pub orbit_rotation: Quaternion,
}

impl Placement {
    /// Placement described by a scene config.
    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            vertical_offset: config.vertical_offset,
            atom_scale: config.atom_scale,
            orbit_rotation: Quaternion::from_yaw_degrees(config.orbit_yaw_deg),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

/// Marker ID → atom bookkeeping.
#[derive(Debug)]
pub struct MarkerSynchronizer {
    labels: ElementTable,
    placement: Placement,
    entities: BTreeMap<MarkerId, TrackedEntity>,
}

impl MarkerSynchronizer {
    /// Creates an empty synchronizer.
    #[must_use]
    pub fn new(labels: ElementTable, placement: Placement) -> Self {
        Self {
            labels,
            placement,
            entities: BTreeMap::new(),
        }
    }

    /// Creates an empty synchronizer from a scene config.
    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.labels.clone(), Placement::from_config(config))
    }

    /// Dispatches one event.
    pub fn handle(
        &mut self,
        event: &MarkerEvent,
        factory: &mut dyn EntityFactory,
        coordinator: &mut ReactionCoordinator,
    ) -> SyncOutcome {
        match event {
            MarkerEvent::Added(sample) => self.on_added(sample, factory, coordinator),
            MarkerEvent::Updated(sample, state) => {
                self.on_updated(sample, *state, factory, coordinator)
            }
            MarkerEvent::Removed(sample) => self.on_removed(sample, factory, coordinator),
        }
    }

    /// A marker was detected.
    ///
    /// A duplicate add for a mapped marker behaves like a tracked update.
    pub fn on_added(
        &mut self,
        sample: &MarkerSample,
        factory: &mut dyn EntityFactory,
        coordinator: &mut ReactionCoordinator,
    ) -> SyncOutcome {
        if self.forget_if_stale(&sample.marker, coordinator) {
            return self.on_updated(sample, TrackingState::Tracking, factory, coordinator);
        }
        if !sample.pose.is_finite() {
            tracing::debug!("Ignoring marker {} with non-finite pose", sample.marker);
            return SyncOutcome::Ignored(IgnoreReason::InvalidPose);
        }

        let Some(kind) = self.labels.resolve(&sample.label) else {
            tracing::debug!(
                "Ignoring marker {} with unknown label {:?}",
                sample.marker,
                sample.label
            );
            return SyncOutcome::Ignored(IgnoreReason::UnknownLabel);
        };
        if !factory.has_template(kind) {
            tracing::debug!("Ignoring marker {}: no template for {}", sample.marker, kind);
            return SyncOutcome::Ignored(IgnoreReason::MissingTemplate);
        }

        let pose = sample.pose.raised(self.placement.vertical_offset);
        let entity = factory.spawn_atom(&AtomSpawn {
            kind,
            pose,
            scale: self.placement.atom_scale,
            orbit_rotation: self.placement.orbit_rotation,
        });
        self.entities.insert(
            sample.marker.clone(),
            TrackedEntity {
                marker: sample.marker.clone(),
                entity,
                kind,
                pose,
                visible: true,
            },
        );
        coordinator.add(entity, kind, pose);

        tracing::info!(
            "Spawned {} atom {} for marker {} at ({:.3}, {:.3}, {:.3})",
            kind,
            entity,
            sample.marker,
            pose.position.x,
            pose.position.y,
            pose.position.z
        );
        SyncOutcome::Spawned(entity)
    }

    /// A marker moved or changed tracking quality.
    ///
    /// Losing tracking hides the atom and keeps its last pose; the atom still
    /// counts toward readiness.
    pub fn on_updated(
        &mut self,
        sample: &MarkerSample,
        state: TrackingState,
        factory: &mut dyn EntityFactory,
        coordinator: &mut ReactionCoordinator,
    ) -> SyncOutcome {
        if !self.forget_if_stale(&sample.marker, coordinator) {
            tracing::trace!("Update for unmapped marker {}", sample.marker);
            return SyncOutcome::Ignored(IgnoreReason::UnmappedMarker);
        }
        let Some(tracked) = self.entities.get_mut(&sample.marker) else {
            return SyncOutcome::Ignored(IgnoreReason::UnmappedMarker);
        };

        if state.is_tracking() {
            if !sample.pose.is_finite() {
                tracing::debug!("Ignoring non-finite pose for marker {}", sample.marker);
                return SyncOutcome::Ignored(IgnoreReason::InvalidPose);
            }
            let pose = sample.pose.raised(self.placement.vertical_offset);
            tracked.pose = pose;
            factory.move_entity(tracked.entity, pose);
            if !tracked.visible {
                tracked.visible = true;
                factory.set_visible(tracked.entity, true);
                tracing::debug!("Marker {} reacquired, showing {}", sample.marker, tracked.entity);
            }
            coordinator.update_pose(tracked.entity, pose);
            SyncOutcome::Moved(tracked.entity)
        } else {
            if tracked.visible {
                tracked.visible = false;
                factory.set_visible(tracked.entity, false);
                tracing::debug!("Marker {} lost, hiding {}", sample.marker, tracked.entity);
            }
            SyncOutcome::Hidden(tracked.entity)
        }
    }

    /// A marker is gone: its atom leaves the reaction set and is destroyed.
    pub fn on_removed(
        &mut self,
        sample: &MarkerSample,
        factory: &mut dyn EntityFactory,
        coordinator: &mut ReactionCoordinator,
    ) -> SyncOutcome {
        if !self.forget_if_stale(&sample.marker, coordinator) {
            tracing::trace!("Removal for unmapped marker {}", sample.marker);
            return SyncOutcome::Ignored(IgnoreReason::UnmappedMarker);
        }
        let Some(tracked) = self.entities.remove(&sample.marker) else {
            return SyncOutcome::Ignored(IgnoreReason::UnmappedMarker);
        };

        coordinator.remove(tracked.entity);
        factory.destroy(tracked.entity);
        tracing::info!(
            "Removed {} atom {} for marker {}",
            tracked.kind,
            tracked.entity,
            sample.marker
        );
        SyncOutcome::Removed(tracked.entity)
    }

    /// Returns true if `marker` maps to an atom the coordinator still holds.
    ///
    /// A stale entry is dropped without touching the factory; its atom was
    /// already destroyed by whoever consumed it.
    fn forget_if_stale(&mut self, marker: &MarkerId, coordinator: &ReactionCoordinator) -> bool {
        let Some(entity) = self.entities.get(marker).map(|t| t.entity) else {
            return false;
        };
        if coordinator.contains(entity) {
            return true;
        }
        tracing::debug!("Dropping stale entry {} for marker {}", entity, marker);
        self.entities.remove(marker);
        false
    }

    /// Forgets atoms that were consumed elsewhere (by a reaction).
    ///
    /// Neither the coordinator nor the factory is called: whoever consumed
    /// the atoms already removed and destroyed them. Returns how many
    /// markers were unmapped.
    pub fn release(&mut self, consumed: &[EntityId]) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, tracked| !consumed.contains(&tracked.entity));
        before - self.entities.len()
    }

    /// The atom bound to `marker`.
    #[must_use]
    pub fn entity_for(&self, marker: &MarkerId) -> Option<&TrackedEntity> {
        self.entities.get(marker)
    }

    /// Number of mapped markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no markers are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of atoms currently shown.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.entities.values().filter(|t| t.visible).count()
    }

    /// Tracked atoms in marker-ID order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedEntity> {
        self.entities.values()
    }
}
