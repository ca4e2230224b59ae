//! # Recording Collaborators
//!
//! An in-memory stand-in for the AR host. [`SceneRecorder`] implements every
//! integration trait, keeps a log of what the core asked for and mirrors the
//! live atoms, so headless runs (tests, the demo binary, benchmarks) can
//! inspect the outcome.
//!
//! Clones share state: hand one clone to each slot of a scene and keep one
//! for assertions.

use chemar_shared::{ElementKind, Pose};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::entity::EntityId;
use crate::integration::{AtomSpawn, AudioCue, EntityFactory, ProductSpawner, ReadinessSink};

/// One request the core made to the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    /// An atom was instantiated.
    Spawned(EntityId, AtomSpawn),
    /// An atom was moved.
    Moved(EntityId, Pose),
    /// An atom was shown or hidden.
    Visibility(EntityId, bool),
    /// An atom was destroyed.
    Destroyed(EntityId),
    /// The product was spawned.
    ProductSpawned(Pose),
    /// Readiness flipped.
    ReadinessChanged(bool),
    /// The reaction sound played.
    ReactionSound,
}

/// Mirror of a live atom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomView {
    /// Element.
    pub kind: ElementKind,
    /// Last pose the core set.
    pub pose: Pose,
    /// Last visibility the core set.
    pub visible: bool,
}

#[derive(Debug, Default)]
struct RecorderState {
    next_index: u32,
    log: Vec<Recorded>,
    live: BTreeMap<EntityId, AtomView>,
    missing_templates: BTreeSet<ElementKind>,
}

/// Headless host that records every request.
#[derive(Clone, Debug, Default)]
pub struct SceneRecorder {
    state: Arc<Mutex<RecorderState>>,
}

impl SceneRecorder {
    /// Creates a recorder with a template for every element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the template for `kind`, so its markers spawn nothing.
    #[must_use]
    pub fn without_template(self, kind: ElementKind) -> Self {
        self.state.lock().missing_templates.insert(kind);
        self
    }

    /// Everything recorded so far, in order.
    #[must_use]
    pub fn log(&self) -> Vec<Recorded> {
        self.state.lock().log.clone()
    }

    /// Readiness transitions, in order.
    #[must_use]
    pub fn readiness_log(&self) -> Vec<bool> {
        self.state
            .lock()
            .log
            .iter()
            .filter_map(|r| match r {
                Recorded::ReadinessChanged(ready) => Some(*ready),
                _ => None,
            })
            .collect()
    }

    /// Poses products were spawned at.
    #[must_use]
    pub fn products(&self) -> Vec<Pose> {
        self.state
            .lock()
            .log
            .iter()
            .filter_map(|r| match r {
                Recorded::ProductSpawned(pose) => Some(*pose),
                _ => None,
            })
            .collect()
    }

    /// Number of atoms spawned and not yet destroyed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }

    /// Mirror of a live atom.
    #[must_use]
    pub fn atom(&self, entity: EntityId) -> Option<AtomView> {
        self.state.lock().live.get(&entity).copied()
    }

    /// Forgets the log, keeping live atoms.
    pub fn clear_log(&self) {
        self.state.lock().log.clear();
    }

    fn record(&self, entry: Recorded) {
        self.state.lock().log.push(entry);
    }
}

impl EntityFactory for SceneRecorder {
    fn has_template(&self, kind: ElementKind) -> bool {
        !self.state.lock().missing_templates.contains(&kind)
    }

    fn spawn_atom(&mut self, spawn: &AtomSpawn) -> EntityId {
        let mut state = self.state.lock();
        let entity = EntityId::new(state.next_index, 0);
        state.next_index = state.next_index.wrapping_add(1);
        state.live.insert(
            entity,
            AtomView {
                kind: spawn.kind,
                pose: spawn.pose,
                visible: true,
            },
        );
        state.log.push(Recorded::Spawned(entity, *spawn));
        entity
    }

    fn move_entity(&mut self, entity: EntityId, pose: Pose) {
        let mut state = self.state.lock();
        if let Some(atom) = state.live.get_mut(&entity) {
            atom.pose = pose;
        }
        state.log.push(Recorded::Moved(entity, pose));
    }

    fn set_visible(&mut self, entity: EntityId, visible: bool) {
        let mut state = self.state.lock();
        if let Some(atom) = state.live.get_mut(&entity) {
            atom.visible = visible;
        }
        state.log.push(Recorded::Visibility(entity, visible));
    }

    fn destroy(&mut self, entity: EntityId) {
        let mut state = self.state.lock();
        state.live.remove(&entity);
        state.log.push(Recorded::Destroyed(entity));
    }
}

impl ProductSpawner for SceneRecorder {
    fn spawn_product(&mut self, pose: Pose) {
        self.record(Recorded::ProductSpawned(pose));
    }
}

impl ReadinessSink for SceneRecorder {
    fn readiness_changed(&mut self, ready: bool) {
        self.record(Recorded::ReadinessChanged(ready));
    }
}

impl AudioCue for SceneRecorder {
    fn play_reaction(&mut self) {
        self.record(Recorded::ReactionSound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemar_shared::Quaternion;

    #[test]
    fn test_clones_share_state() {
        let recorder = SceneRecorder::new().without_template(ElementKind::Lithium);
        let mut factory = recorder.clone();

        assert!(!factory.has_template(ElementKind::Lithium));
        assert!(factory.has_template(ElementKind::Carbon));

        let entity = factory.spawn_atom(&AtomSpawn {
            kind: ElementKind::Carbon,
            pose: Pose::IDENTITY,
            scale: 0.5,
            orbit_rotation: Quaternion::IDENTITY,
        });
        factory.set_visible(entity, false);

        assert_eq!(recorder.live_count(), 1);
        assert!(!recorder.atom(entity).unwrap().visible);

        factory.destroy(entity);
        assert_eq!(recorder.live_count(), 0);
        assert_eq!(recorder.log().len(), 3);
    }
}
