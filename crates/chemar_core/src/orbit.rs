//! Electron orbit animation.
//!
//! Each atom has an electron orbit child that spins around the nucleus.
//! The host calls [`OrbitAnimator::advance`] once per frame and applies
//! [`OrbitAnimator::rotation`] to the orbit's local transform.

use chemar_shared::Quaternion;

use crate::config::SceneConfig;

/// Spins an electron orbit around its local up axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitAnimator {
    /// Degrees per second; negative spins the other way.
    speed_deg_per_sec: f32,
    /// Base yaw the orbit was spawned with.
    base_yaw_deg: f32,
    /// Accumulated spin, in [0, 360).
    spin_deg: f32,
}

impl OrbitAnimator {
    /// Creates an animator starting at `base_yaw_deg`.
    #[must_use]
    pub const fn new(speed_deg_per_sec: f32, base_yaw_deg: f32) -> Self {
        Self {
            speed_deg_per_sec,
            base_yaw_deg,
            spin_deg: 0.0,
        }
    }

    /// Animator using the scene's orbit speed and base yaw.
    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.orbit_speed_deg_per_sec, config.orbit_yaw_deg)
    }

    /// Advances by `dt` seconds and returns the total yaw in degrees, in [0, 360).
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.spin_deg = wrap_degrees(self.spin_deg + self.speed_deg_per_sec * dt);
        }
        self.yaw_deg()
    }

    /// Current total yaw in degrees, in [0, 360).
    #[must_use]
    pub fn yaw_deg(&self) -> f32 {
        wrap_degrees(self.base_yaw_deg + self.spin_deg)
    }

    /// Current local rotation of the orbit.
    #[must_use]
    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_yaw_degrees(self.yaw_deg())
    }
}

/// Wraps into [0, 360). `rem_euclid` alone rounds tiny negatives up to 360.
fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl Default for OrbitAnimator {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}
