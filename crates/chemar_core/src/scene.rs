//! # Reaction Scene
//!
//! The single entry point an AR host talks to. Wires the synchronizer and
//! the coordinator to the host's collaborators and exposes exactly three
//! inbound operations:
//!
//! - [`ReactionScene::handle_marker_event`]: one tracking event
//! - [`ReactionScene::handle_batch`] / [`ReactionScene::handle_frame`]: many, in delivery order
//! - [`ReactionScene::trigger`]: the user pressed React
//!
//! Everything runs synchronously on the caller's thread.

use chemar_shared::{MarkerEvent, TrackingFrame};

use crate::config::SceneConfig;
use crate::error::ChemarResult;
use crate::integration::{AudioCue, EntityFactory, ProductSpawner, ReadinessSink};
use crate::reaction::{ReactionCoordinator, ReactionOutcome};
use crate::recording::SceneRecorder;
use crate::sync::{MarkerSynchronizer, SyncOutcome};

/// The host-side collaborators a scene drives.
pub struct SceneHost {
    /// Atom instancing.
    pub factory: Box<dyn EntityFactory>,
    /// Product instancing.
    pub spawner: Box<dyn ProductSpawner>,
    /// Readiness listener.
    pub sink: Box<dyn ReadinessSink>,
    /// Reaction sound.
    pub audio: Box<dyn AudioCue>,
}

impl SceneHost {
    /// A host where every slot records into `recorder`.
    #[must_use]
    pub fn recording(recorder: &SceneRecorder) -> Self {
        Self {
            factory: Box::new(recorder.clone()),
            spawner: Box::new(recorder.clone()),
            sink: Box::new(recorder.clone()),
            audio: Box::new(recorder.clone()),
        }
    }
}

/// Counters for what the scene has processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Marker events handled.
    pub events: u64,
    /// Atoms created.
    pub spawned: u64,
    /// Tracked updates applied.
    pub moved: u64,
    /// Tracking losses applied.
    pub hidden: u64,
    /// Atoms removed by the tracker.
    pub removed: u64,
    /// Events that changed nothing.
    pub ignored: u64,
    /// Successful reactions.
    pub reactions: u64,
    /// Triggers rejected because the reaction was not ready.
    pub rejected_triggers: u64,
}

impl SceneStats {
    fn record(&mut self, outcome: SyncOutcome) {
        self.events += 1;
        match outcome {
            SyncOutcome::Spawned(_) => self.spawned += 1,
            SyncOutcome::Moved(_) => self.moved += 1,
            SyncOutcome::Hidden(_) => self.hidden += 1,
            SyncOutcome::Removed(_) => self.removed += 1,
            SyncOutcome::Ignored(_) => self.ignored += 1,
        }
    }
}

/// Synchronizer + coordinator + host.
pub struct ReactionScene {
    factory: Box<dyn EntityFactory>,
    synchronizer: MarkerSynchronizer,
    coordinator: ReactionCoordinator,
    stats: SceneStats,
}

impl ReactionScene {
    /// Builds a scene.
    ///
    /// # Errors
    ///
    /// Returns [`ChemarError::InvalidConfig`](crate::ChemarError::InvalidConfig)
    /// if the config fails validation.
    pub fn new(config: SceneConfig, host: SceneHost) -> ChemarResult<Self> {
        config.validate()?;
        let SceneHost {
            factory,
            spawner,
            sink,
            audio,
        } = host;
        Ok(Self {
            synchronizer: MarkerSynchronizer::from_config(&config),
            coordinator: ReactionCoordinator::new(sink, spawner, audio),
            factory,
            stats: SceneStats::default(),
        })
    }

    /// Applies one tracking event.
    pub fn handle_marker_event(&mut self, event: &MarkerEvent) -> SyncOutcome {
        let outcome =
            self.synchronizer
                .handle(event, self.factory.as_mut(), &mut self.coordinator);
        self.stats.record(outcome);
        outcome
    }

    /// Applies events strictly in the order given.
    ///
    /// Later events for a marker win over earlier ones: an `Added` followed by
    /// a `Removed` for the same marker in one batch leaves no atom, and a
    /// `Removed` followed by an `Added` leaves a fresh one.
    pub fn handle_batch<'a, I>(&mut self, events: I) -> Vec<SyncOutcome>
    where
        I: IntoIterator<Item = &'a MarkerEvent>,
    {
        events
            .into_iter()
            .map(|event| self.handle_marker_event(event))
            .collect()
    }

    /// Applies one tracker frame: additions, then updates, then removals.
    pub fn handle_frame(&mut self, frame: TrackingFrame) -> Vec<SyncOutcome> {
        frame
            .into_events()
            .map(|event| self.handle_marker_event(&event))
            .collect()
    }

    /// Runs the reaction.
    ///
    /// Consumed atoms are destroyed and their markers unmapped; the markers
    /// get fresh atoms only after the tracker removes and re-detects them.
    ///
    /// # Errors
    ///
    /// Returns [`ChemarError::PreconditionFailed`](crate::ChemarError::PreconditionFailed)
    /// if the reaction is not ready. Nothing changes in that case.
    pub fn trigger(&mut self) -> ChemarResult<ReactionOutcome> {
        match self.coordinator.trigger(self.factory.as_mut()) {
            Ok(outcome) => {
                self.synchronizer.release(&outcome.consumed);
                self.stats.reactions += 1;
                Ok(outcome)
            }
            Err(err) => {
                self.stats.rejected_triggers += 1;
                Err(err)
            }
        }
    }

    /// Whether the React control should be enabled.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.coordinator.is_ready()
    }

    /// The synchronizer's view of markers and atoms.
    #[must_use]
    pub const fn synchronizer(&self) -> &MarkerSynchronizer {
        &self.synchronizer
    }

    /// The coordinator's view of the reaction set.
    #[must_use]
    pub const fn coordinator(&self) -> &ReactionCoordinator {
        &self.coordinator
    }

    /// Processing counters.
    #[must_use]
    pub const fn stats(&self) -> SceneStats {
        self.stats
    }
}

impl std::fmt::Debug for ReactionScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionScene")
            .field("synchronizer", &self.synchronizer)
            .field("coordinator", &self.coordinator)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChemarError;
    use chemar_shared::{MarkerId, MarkerSample, Pose, TrackingState, Vec3};

    fn scene() -> (ReactionScene, SceneRecorder) {
        let recorder = SceneRecorder::new();
        let scene =
            ReactionScene::new(SceneConfig::default(), SceneHost::recording(&recorder)).unwrap();
        (scene, recorder)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let recorder = SceneRecorder::new();
        let config = SceneConfig {
            atom_scale: -1.0,
            ..SceneConfig::default()
        };
        let err = ReactionScene::new(config, SceneHost::recording(&recorder)).unwrap_err();
        assert!(matches!(err, ChemarError::InvalidConfig(_)));
    }

    #[test]
    fn test_batch_is_last_write_wins() {
        let (mut scene, recorder) = scene();

        let outcomes = scene.handle_batch(&[
            MarkerEvent::added("a", "Carbon", Pose::IDENTITY),
            MarkerEvent::removed("a", "Carbon", Pose::IDENTITY),
            MarkerEvent::removed("b", "Oxygen1", Pose::IDENTITY),
            MarkerEvent::added("b", "Oxygen1", Pose::IDENTITY),
        ]);

        assert_eq!(outcomes.len(), 4);
        assert!(scene.synchronizer().entity_for(&MarkerId::from("a")).is_none());
        assert!(scene.synchronizer().entity_for(&MarkerId::from("b")).is_some());
        assert_eq!(scene.coordinator().len(), 1);
        assert_eq!(recorder.live_count(), 1);

        let stats = scene.stats();
        assert_eq!(stats.events, 4);
        assert_eq!(stats.spawned, 2);
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.ignored, 1);
    }

    #[test]
    fn test_frame_removal_runs_after_addition() {
        let (mut scene, _recorder) = scene();
        let sample = MarkerSample {
            marker: MarkerId::from("a"),
            label: "Carbon".to_string(),
            pose: Pose::at(Vec3::X),
        };

        scene.handle_frame(TrackingFrame {
            added: vec![sample.clone()],
            updated: vec![(sample.clone(), TrackingState::NotTracking)],
            removed: vec![sample],
        });

        assert!(scene.synchronizer().is_empty());
        assert!(scene.coordinator().is_empty());
        assert_eq!(scene.stats().hidden, 1);
    }

    #[test]
    fn test_trigger_releases_consumed_markers() {
        let (mut scene, recorder) = scene();
        scene.handle_batch(&[
            MarkerEvent::added("c", "Carbon", Pose::IDENTITY),
            MarkerEvent::added("o1", "Oxygen1", Pose::IDENTITY),
            MarkerEvent::added("o2", "Oxygen2", Pose::IDENTITY),
            MarkerEvent::added("h", "Hydrogen", Pose::IDENTITY),
        ]);
        assert!(scene.is_ready());

        let outcome = scene.trigger().unwrap();
        assert_eq!(outcome.consumed.len(), 3);
        assert!(!scene.is_ready());
        assert_eq!(scene.synchronizer().len(), 1);
        assert!(scene.synchronizer().entity_for(&MarkerId::from("h")).is_some());
        assert_eq!(recorder.live_count(), 1);

        // Consumed markers stay consumed until re-detected
        scene.handle_marker_event(&MarkerEvent::updated(
            "c",
            "Carbon",
            Pose::IDENTITY,
            TrackingState::Tracking,
        ));
        assert_eq!(recorder.live_count(), 1);

        scene.handle_marker_event(&MarkerEvent::removed("c", "Carbon", Pose::IDENTITY));
        scene.handle_marker_event(&MarkerEvent::added("c", "Carbon", Pose::IDENTITY));
        assert_eq!(recorder.live_count(), 2);
        assert_eq!(scene.stats().reactions, 1);
    }

    #[test]
    fn test_rejected_trigger_is_counted() {
        let (mut scene, _recorder) = scene();
        assert!(matches!(
            scene.trigger(),
            Err(ChemarError::PreconditionFailed {
                carbon: 0,
                oxygen: 0
            })
        ));
        assert_eq!(scene.stats().rejected_triggers, 1);
    }
}
