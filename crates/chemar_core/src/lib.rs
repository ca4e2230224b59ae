//! # CHEMAR Core
//!
//! The bookkeeping behind the AR chemistry demo: printed element cards are
//! tracked by the host, atoms float above them, and when one carbon and two
//! oxygen atoms are on the table the React button lights up and turns them
//! into CO2.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  MarkerEvent  ┌──────────────────┐  add/remove  ┌─────────────────────┐
//! │ AR tracker   │──────────────>│ MarkerSynchronizer│────────────>│ ReactionCoordinator │
//! │ (host)       │               └────────┬─────────┘              └──────────┬──────────┘
//! └──────────────┘                        │ spawn/move/hide/destroy           │ readiness, product,
//!                                         v                                   v audio, destroy
//!                                  ┌─────────────────────────────────────────────────┐
//!                                  │ Host collaborators (EntityFactory, sinks, ...)  │
//!                                  └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chemar_core::{ReactionScene, SceneConfig, SceneHost, SceneRecorder};
//! use chemar_shared::{MarkerEvent, Pose};
//!
//! let recorder = SceneRecorder::new();
//! let mut scene = ReactionScene::new(SceneConfig::default(), SceneHost::recording(&recorder))?;
//!
//! scene.handle_marker_event(&MarkerEvent::added("card-1", "Carbon", Pose::IDENTITY));
//! scene.handle_marker_event(&MarkerEvent::added("card-2", "Oxygen1", Pose::IDENTITY));
//! scene.handle_marker_event(&MarkerEvent::added("card-3", "Oxygen2", Pose::IDENTITY));
//! assert!(scene.is_ready());
//!
//! scene.trigger()?;
//! assert_eq!(recorder.products().len(), 1);
//! # Ok::<(), chemar_core::ChemarError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod integration;
pub mod orbit;
pub mod reaction;
pub mod recording;
pub mod scene;
pub mod sync;

pub use config::SceneConfig;
pub use entity::EntityId;
pub use error::{ChemarError, ChemarResult};
pub use events::{SceneEvent, SceneEventBus, SceneEventReceiver, SceneEventSender};
pub use integration::{
    AtomSpawn, AudioCue, EntityFactory, NullSink, ProductSpawner, ReadinessSink, Silence,
};
pub use orbit::OrbitAnimator;
pub use reaction::{ReactionCoordinator, ReactionOutcome};
pub use recording::{AtomView, Recorded, SceneRecorder};
pub use scene::{ReactionScene, SceneHost, SceneStats};
pub use sync::{IgnoreReason, MarkerSynchronizer, Placement, SyncOutcome, TrackedEntity};
