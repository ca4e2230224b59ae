//! Geometry types shared between the core and the AR host.
//!
//! These are the canonical representations marker poses arrive in.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D Vector - position, direction
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector (world up)
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Returns true if every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Quaternion for rotations (unit length assumed)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation of `radians` around `axis`.
    ///
    /// `axis` does not need to be normalized; a zero axis yields identity.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let len = axis.length();
        if len <= f32::EPSILON {
            return Self::IDENTITY;
        }
        let axis = axis * (1.0 / len);
        let (sin, cos) = (radians * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Rotation around the local Y axis, in degrees.
    #[must_use]
    pub fn from_yaw_degrees(degrees: f32) -> Self {
        Self::from_axis_angle(Vec3::Y, degrees.to_radians())
    }

    /// Rotates a vector by this quaternion.
    #[must_use]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // v' = v + w*t + u x t, with t = 2 * (u x v)
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Returns true if every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;
    /// Hamilton product: applies `rhs` first, then `self`.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

/// Pose - position + orientation of a marker or entity in world space
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Pose {
    /// Position
    pub position: Vec3,
    /// Rotation
    pub rotation: Quaternion,
}

impl Pose {
    /// Creates a new pose
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with identity rotation.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, Quaternion::IDENTITY)
    }

    /// Identity pose
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quaternion::IDENTITY);

    /// The pose's local up axis in world space.
    #[must_use]
    pub fn up(self) -> Vec3 {
        self.rotation.rotate(Vec3::Y)
    }

    /// Same pose moved `offset` along its own up axis.
    #[must_use]
    pub fn raised(self, offset: f32) -> Self {
        Self::new(self.position + self.up() * offset, self.rotation)
    }

    /// Returns true if position and rotation are free of NaN and infinity.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum.x, 5.0);
        assert_eq!(sum.y, 7.0);
        assert_eq!(sum.z, 9.0);

        let dot = a.dot(b);
        assert_eq!(dot, 32.0); // 1*4 + 2*5 + 3*6

        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_quaternion_rotate() {
        assert!(approx(Quaternion::IDENTITY.rotate(Vec3::Y), Vec3::Y));

        // +90 degrees about X turns up into +Z
        let q = Quaternion::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2);
        assert!(approx(q.rotate(Vec3::Y), Vec3::Z));

        // Yaw leaves the up axis alone
        let yaw = Quaternion::from_yaw_degrees(90.0);
        assert!(approx(yaw.rotate(Vec3::Y), Vec3::Y));
        assert!(approx(yaw.rotate(Vec3::X), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_quaternion_compose() {
        let a = Quaternion::from_yaw_degrees(30.0);
        let b = Quaternion::from_yaw_degrees(60.0);
        let c = Quaternion::from_yaw_degrees(90.0);
        assert!(approx((a * b).rotate(Vec3::X), c.rotate(Vec3::X)));
    }

    #[test]
    fn test_pose_raised_along_local_up() {
        let flat = Pose::at(Vec3::new(1.0, 0.0, 2.0));
        assert!(approx(flat.raised(0.1).position, Vec3::new(1.0, 0.1, 2.0)));

        // A marker lying on a wall faces +Z, so the atom floats out of the wall
        let wall = Pose::new(
            Vec3::ZERO,
            Quaternion::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2),
        );
        let raised = wall.raised(0.1);
        assert!(approx(raised.position, Vec3::new(0.0, 0.0, 0.1)));
        assert_eq!(raised.rotation, wall.rotation);
    }

    #[test]
    fn test_pose_finiteness() {
        assert!(Pose::IDENTITY.is_finite());
        assert!(!Pose::at(Vec3::new(f32::NAN, 0.0, 0.0)).is_finite());
        let spun = Pose::new(Vec3::ZERO, Quaternion::new(0.0, f32::INFINITY, 0.0, 1.0));
        assert!(!spun.is_finite());
    }

    #[test]
    fn test_pose_bytemuck() {
        let p = Pose::IDENTITY;
        let bytes: &[u8] = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), 28); // 7 * 4 bytes
    }
}
