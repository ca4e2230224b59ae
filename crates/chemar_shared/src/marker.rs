//! Marker tracking events.
//!
//! The AR host translates whatever its tracking subsystem reports into these
//! before handing them to the core.

use crate::math::Pose;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a detected marker.
///
/// Opaque to the core; only equality and hashing are used.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(String);

impl MarkerId {
    /// Creates a marker ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MarkerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tracking quality reported with an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingState {
    /// The marker is visible and its pose is current.
    Tracking,
    /// The marker is temporarily lost (occluded, out of frame, blurred).
    NotTracking,
}

impl TrackingState {
    /// Returns true for [`TrackingState::Tracking`].
    #[must_use]
    pub const fn is_tracking(self) -> bool {
        matches!(self, Self::Tracking)
    }
}

/// What the tracker knows about one marker at the time of an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSample {
    /// Marker identity.
    pub marker: MarkerId,
    /// Reference image name, used to resolve the element.
    pub label: String,
    /// Marker pose in world space.
    pub pose: Pose,
}

/// A single marker add/update/remove notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MarkerEvent {
    /// Marker detected for the first time.
    Added(MarkerSample),
    /// Marker pose or tracking quality changed.
    Updated(MarkerSample, TrackingState),
    /// Marker is gone for good.
    Removed(MarkerSample),
}

impl MarkerEvent {
    /// Builds an `Added` event.
    #[must_use]
    pub fn added(marker: impl Into<MarkerId>, label: impl Into<String>, pose: Pose) -> Self {
        Self::Added(MarkerSample {
            marker: marker.into(),
            label: label.into(),
            pose,
        })
    }

    /// Builds an `Updated` event.
    #[must_use]
    pub fn updated(
        marker: impl Into<MarkerId>,
        label: impl Into<String>,
        pose: Pose,
        state: TrackingState,
    ) -> Self {
        Self::Updated(
            MarkerSample {
                marker: marker.into(),
                label: label.into(),
                pose,
            },
            state,
        )
    }

    /// Builds a `Removed` event.
    #[must_use]
    pub fn removed(marker: impl Into<MarkerId>, label: impl Into<String>, pose: Pose) -> Self {
        Self::Removed(MarkerSample {
            marker: marker.into(),
            label: label.into(),
            pose,
        })
    }

    /// The sample carried by this event.
    #[must_use]
    pub const fn sample(&self) -> &MarkerSample {
        match self {
            Self::Added(sample) | Self::Updated(sample, _) | Self::Removed(sample) => sample,
        }
    }

    /// The marker this event refers to.
    #[must_use]
    pub const fn marker(&self) -> &MarkerId {
        &self.sample().marker
    }
}

/// One frame's worth of tracker output, grouped the way AR trackers report it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingFrame {
    /// Newly detected markers.
    pub added: Vec<MarkerSample>,
    /// Markers whose pose or quality changed.
    pub updated: Vec<(MarkerSample, TrackingState)>,
    /// Markers that are gone.
    pub removed: Vec<MarkerSample>,
}

impl TrackingFrame {
    /// Returns true if the frame carries no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Total number of events in the frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }

    /// Flattens the frame into delivery order: additions, then updates, then removals.
    pub fn into_events(self) -> impl Iterator<Item = MarkerEvent> {
        self.added
            .into_iter()
            .map(MarkerEvent::Added)
            .chain(
                self.updated
                    .into_iter()
                    .map(|(sample, state)| MarkerEvent::Updated(sample, state)),
            )
            .chain(self.removed.into_iter().map(MarkerEvent::Removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Pose, Vec3};

    #[test]
    fn test_event_accessors() {
        let event = MarkerEvent::updated(
            "m-1",
            "Carbon",
            Pose::at(Vec3::X),
            TrackingState::NotTracking,
        );
        assert_eq!(event.marker().as_str(), "m-1");
        assert_eq!(event.sample().label, "Carbon");
        assert_eq!(event.sample().pose.position, Vec3::X);
    }

    #[test]
    fn test_frame_delivery_order() {
        let sample = |id: &str| MarkerSample {
            marker: MarkerId::from(id),
            label: "Carbon".to_string(),
            pose: Pose::IDENTITY,
        };
        let frame = TrackingFrame {
            added: vec![sample("a")],
            updated: vec![(sample("b"), TrackingState::Tracking)],
            removed: vec![sample("a")],
        };
        assert_eq!(frame.len(), 3);

        let events: Vec<_> = frame.into_events().collect();
        assert!(matches!(events[0], MarkerEvent::Added(_)));
        assert!(matches!(events[1], MarkerEvent::Updated(_, TrackingState::Tracking)));
        assert!(matches!(events[2], MarkerEvent::Removed(_)));
        assert_eq!(events[2].marker().as_str(), "a");
    }
}
