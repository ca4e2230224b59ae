//! # Reaction Coordinator
//!
//! Tracks which atoms are present and whether they can react.
//!
//! ## Readiness
//!
//! The reaction is ready when exactly one carbon and exactly two oxygen
//! atoms are present. Other elements never affect readiness. Presence is
//! membership, not visibility: an occluded atom still counts.
//!
//! ## Notifications
//!
//! The [`ReadinessSink`] hears about readiness only when the boolean flips,
//! so a button bound to it is toggled, not spammed.

use chemar_shared::{ElementKind, Pose};

use crate::entity::EntityId;
use crate::error::{ChemarError, ChemarResult};
use crate::integration::{AudioCue, EntityFactory, ProductSpawner, ReadinessSink};

/// One present atom.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Member {
    entity: EntityId,
    kind: ElementKind,
    pose: Pose,
}

/// Result of a successful reaction.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionOutcome {
    /// Pose of the carbon atom the product was anchored to.
    pub anchor: Pose,
    /// Carbon and oxygen atoms that were consumed and destroyed.
    pub consumed: Vec<EntityId>,
}

/// The reaction state machine.
///
/// Owns the set of present atoms (in insertion order) and the readiness
/// flag derived from it.
pub struct ReactionCoordinator {
    /// Present atoms, insertion order.
    members: Vec<Member>,
    /// Cached readiness, always equal to `compute_ready()` between calls.
    ready: bool,
    /// Reactions performed so far.
    reactions: u64,
    sink: Box<dyn ReadinessSink>,
    spawner: Box<dyn ProductSpawner>,
    audio: Box<dyn AudioCue>,
}

impl ReactionCoordinator {
    /// Creates an empty, not-ready coordinator.
    ///
    /// The sink is not notified of the initial `false`; hosts start their
    /// control disabled.
    #[must_use]
    pub fn new(
        sink: Box<dyn ReadinessSink>,
        spawner: Box<dyn ProductSpawner>,
        audio: Box<dyn AudioCue>,
    ) -> Self {
        Self {
            members: Vec::with_capacity(8),
            ready: false,
            reactions: 0,
            sink,
            spawner,
            audio,
        }
    }

    /// Adds an atom to the reaction set.
    ///
    /// Re-adding a known entity refreshes its kind and pose instead of
    /// duplicating it. Returns the new readiness if it flipped.
    pub fn add(&mut self, entity: EntityId, kind: ElementKind, pose: Pose) -> Option<bool> {
        if let Some(member) = self.members.iter_mut().find(|m| m.entity == entity) {
            member.kind = kind;
            member.pose = pose;
        } else {
            self.members.push(Member { entity, kind, pose });
        }
        self.refresh()
    }

    /// Removes an atom. No-op if absent. Returns the new readiness if it flipped.
    pub fn remove(&mut self, entity: EntityId) -> Option<bool> {
        let before = self.members.len();
        self.members.retain(|m| m.entity != entity);
        if self.members.len() == before {
            return None;
        }
        self.refresh()
    }

    /// Keeps a member's pose current so the product lands where the carbon is.
    pub fn update_pose(&mut self, entity: EntityId, pose: Pose) {
        if let Some(member) = self.members.iter_mut().find(|m| m.entity == entity) {
            member.pose = pose;
        }
    }

    /// Runs the reaction: consumes every carbon and oxygen, spawns the product
    /// at the carbon's pose and plays the cue.
    ///
    /// # Errors
    ///
    /// Returns [`ChemarError::PreconditionFailed`] if not ready; the reaction
    /// set is left untouched.
    pub fn trigger(&mut self, factory: &mut dyn EntityFactory) -> ChemarResult<ReactionOutcome> {
        let not_ready = ChemarError::PreconditionFailed {
            carbon: self.count(ElementKind::Carbon),
            oxygen: self.count(ElementKind::Oxygen),
        };
        if !self.ready {
            tracing::debug!("Reaction trigger rejected: {}", not_ready);
            return Err(not_ready);
        }

        // Readiness guarantees exactly one carbon; take the first regardless.
        let anchor = self
            .members
            .iter()
            .find(|m| m.kind == ElementKind::Carbon)
            .map(|m| m.pose)
            .ok_or(not_ready)?;

        self.audio.play_reaction();

        let mut consumed = Vec::with_capacity(3);
        self.members.retain(|m| {
            let reacts = matches!(m.kind, ElementKind::Carbon | ElementKind::Oxygen);
            if reacts {
                consumed.push(m.entity);
            }
            !reacts
        });
        for &entity in &consumed {
            factory.destroy(entity);
        }

        self.spawner.spawn_product(anchor);
        self.reactions += 1;

        tracing::info!(
            "CO2 formed at ({:.3}, {:.3}, {:.3}), consumed {} atoms",
            anchor.position.x,
            anchor.position.y,
            anchor.position.z,
            consumed.len()
        );

        self.refresh();
        Ok(ReactionOutcome { anchor, consumed })
    }

    /// Current readiness.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of present atoms of `kind`.
    #[must_use]
    pub fn count(&self, kind: ElementKind) -> usize {
        self.members.iter().filter(|m| m.kind == kind).count()
    }

    /// Number of present atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if no atoms are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if `entity` is in the reaction set.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.members.iter().any(|m| m.entity == entity)
    }

    /// Kind of a present atom.
    #[must_use]
    pub fn kind_of(&self, entity: EntityId) -> Option<ElementKind> {
        self.members
            .iter()
            .find(|m| m.entity == entity)
            .map(|m| m.kind)
    }

    /// Present atoms in insertion order.
    pub fn members(&self) -> impl Iterator<Item = (EntityId, ElementKind)> + '_ {
        self.members.iter().map(|m| (m.entity, m.kind))
    }

    /// Reactions performed so far.
    #[must_use]
    pub const fn reactions(&self) -> u64 {
        self.reactions
    }

    fn compute_ready(&self) -> bool {
        self.count(ElementKind::Carbon) == 1 && self.count(ElementKind::Oxygen) == 2
    }

    /// Recomputes readiness and notifies the sink on a flip.
    fn refresh(&mut self) -> Option<bool> {
        let ready = self.compute_ready();
        if ready == self.ready {
            return None;
        }
        self.ready = ready;
        tracing::debug!("Reaction readiness changed: {}", ready);
        self.sink.readiness_changed(ready);
        Some(ready)
    }
}

impl std::fmt::Debug for ReactionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionCoordinator")
            .field("members", &self.members)
            .field("ready", &self.ready)
            .field("reactions", &self.reactions)
            .finish_non_exhaustive()
    }
}
