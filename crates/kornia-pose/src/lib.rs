#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Pose
//!
//! Representation, conversion and interpolation of 3D rotations and rigid poses in
//! double precision, on top of the [`glam`] f64 types.
//!
//! ## Key Features
//!
//! - **Rotation representations**: matrices, unit quaternions, axis-angle and Euler
//!   angles in all 12 axis sequences, intrinsic or extrinsic
//! - **Re-orthonormalization**: quaternion, SVD and Cholesky projections onto SO(3)
//! - **Rigid transforms**: composition, inversion and homogeneous matrices
//! - **Pose interpolation**: SLERP on the rotation, linear on the translation
//!
//! ## Example: Interpolating a pose
//!
//! ```rust
//! use glam::{DQuat, DVec3};
//! use kornia_pose::{interpolate, RigidTransform, TimedPose};
//!
//! let start = TimedPose::new(0.0, RigidTransform::IDENTITY);
//! let end = TimedPose::new(
//!     1.0,
//!     RigidTransform::new(DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2), DVec3::ONE)?,
//! );
//!
//! let mid = interpolate(&start, &end, 0.5)?;
//! assert!(mid.translation().abs_diff_eq(DVec3::splat(0.5), 1e-12));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Example: Converting between representations
//!
//! ```rust
//! use glam::DVec3;
//! use kornia_pose::rotation::{
//!     from_axis_angle, to_euler, to_quaternion, EulerConvention, EulerOrder,
//! };
//!
//! let r = from_axis_angle(DVec3::new(1.0, 1.0, 0.0), 0.5)?;
//! let q = to_quaternion(&r);
//! let euler = to_euler(&r, EulerOrder::Zyx, EulerConvention::Intrinsic);
//! assert!(euler.matrix().abs_diff_eq(r, 1e-12));
//! assert!(q.w > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Error types of the crate.
pub mod error;

/// Pose interpolation between timestamped poses.
///
/// Interpolates the rotation with SLERP and the translation linearly, and samples
/// ordered trajectories.
pub mod interpolate;

/// Fixed-size matrix factorizations used by the rotation projections.
pub mod linalg;

/// Rotation representations, conversions and re-orthonormalization.
pub mod rotation;

/// Rigid body transformations.
pub mod transform;

pub use error::{ErrorKind, PoseError};
pub use interpolate::{
    interpolate, interpolate_with_config, InterpolationConfig, OutOfRangePolicy, TimedPose,
    Trajectory,
};
pub use rotation::{AxisAngle, EulerAngles, EulerConvention, EulerOrder, Rotate};
pub use transform::RigidTransform;
