//! Rotation representations and the conversions between them.
//!
//! The rotation matrix ([`DMat3`]) is the hub: every other representation converts to
//! and from it.

use glam::{DMat3, DVec3};

/// Axis-angle representation and Rodrigues' formula.
pub mod axis_angle;

/// Euler angle sequences.
pub mod euler;

/// Re-orthonormalization of drifted rotation matrices.
pub mod normalize;

/// Unit quaternions.
pub mod quaternion;

pub use axis_angle::{from_axis_angle, to_axis_angle, AxisAngle};
pub use euler::{from_euler, to_euler, Axis, EulerAngles, EulerConvention, EulerOrder};
pub use normalize::{is_rotation, orthonormalize, OrthonormalizeMethod};
pub use quaternion::{
    from_quaternion, from_two_vectors, from_wxyz, normalize_quaternion, random_rotation, slerp,
    to_quaternion,
};

/// Anything that can rotate a 3D vector.
pub trait Rotate {
    /// Apply the rotation to `v`.
    fn rotate(&self, v: DVec3) -> DVec3;
}

impl Rotate for DMat3 {
    #[inline]
    fn rotate(&self, v: DVec3) -> DVec3 {
        *self * v
    }
}
