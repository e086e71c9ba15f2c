//! Unit quaternions: conversion to and from rotation matrices, normalization and SLERP.
//!
//! A unit quaternion is an element of SU(2), the double cover of SO(3): `q` and `-q`
//! describe the same rotation. [`to_quaternion`] picks the representative with a
//! non-negative real part and [`slerp`] always travels the shorter of the two arcs.

use glam::{DMat3, DQuat, DVec3};
use rand::Rng;

use super::{axis_angle::AXIS_NORM_EPSILON, Rotate};
use crate::error::PoseError;

/// Below this norm a quaternion carries no meaningful rotation.
pub const QUATERNION_NORM_EPSILON: f64 = 1e-12;

/// Above this |q1·q2| SLERP falls back to normalized linear interpolation.
const SLERP_DOT_THRESHOLD: f64 = 0.9995;

/// Create a quaternion from its real part `w` followed by the imaginary parts.
#[inline]
pub fn from_wxyz(w: f64, x: f64, y: f64, z: f64) -> DQuat {
    DQuat::from_xyzw(x, y, z, w)
}

/// Divide a quaternion by its norm.
///
/// # Errors
///
/// [`PoseError::DegenerateQuaternion`] if the norm is below [`QUATERNION_NORM_EPSILON`],
/// [`PoseError::NonFinite`] for NaN or infinite components.
pub fn normalize_quaternion(q: DQuat) -> Result<DQuat, PoseError> {
    if !q.is_finite() {
        return Err(PoseError::NonFinite("quaternion"));
    }
    let norm = q.length();
    if norm < QUATERNION_NORM_EPSILON {
        return Err(PoseError::DegenerateQuaternion { norm });
    }
    Ok(q * (1.0 / norm))
}

/// Rotation matrix of a quaternion. The quaternion is normalized first.
pub fn from_quaternion(q: DQuat) -> Result<DMat3, PoseError> {
    let q = normalize_quaternion(q)?;
    let (w, x, y, z) = (q.w, q.x, q.y, q.z);

    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (xy, xz, yz) = (x * y, x * z, y * z);
    let (wx, wy, wz) = (w * x, w * y, w * z);

    Ok(DMat3::from_cols(
        DVec3::new(1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy)),
        DVec3::new(2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx)),
        DVec3::new(2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy)),
    ))
}

/// Unit quaternion of a rotation matrix.
///
/// Uses Shepperd's method: the formula is chosen by the largest of
/// `{trace, R₀₀, R₁₁, R₂₂}` so the divisor is never close to zero. The result is
/// normalized and has `w ≥ 0`.
pub fn to_quaternion(r: &DMat3) -> DQuat {
    let (r00, r11, r22) = (r.x_axis.x, r.y_axis.y, r.z_axis.z);
    let (r01, r02) = (r.y_axis.x, r.z_axis.x);
    let (r10, r12) = (r.x_axis.y, r.z_axis.y);
    let (r20, r21) = (r.x_axis.z, r.y_axis.z);
    let trace = r00 + r11 + r22;

    let q = if trace >= r00 && trace >= r11 && trace >= r22 {
        let s = 2.0 * (1.0 + trace).sqrt(); // 4w
        from_wxyz(0.25 * s, (r21 - r12) / s, (r02 - r20) / s, (r10 - r01) / s)
    } else if r00 >= r11 && r00 >= r22 {
        let s = 2.0 * (1.0 + r00 - r11 - r22).sqrt(); // 4x
        from_wxyz((r21 - r12) / s, 0.25 * s, (r01 + r10) / s, (r02 + r20) / s)
    } else if r11 >= r22 {
        let s = 2.0 * (1.0 + r11 - r00 - r22).sqrt(); // 4y
        from_wxyz((r02 - r20) / s, (r01 + r10) / s, 0.25 * s, (r12 + r21) / s)
    } else {
        let s = 2.0 * (1.0 + r22 - r00 - r11).sqrt(); // 4z
        from_wxyz((r10 - r01) / s, (r02 + r20) / s, (r12 + r21) / s, 0.25 * s)
    };

    let q = q.normalize();
    if q.w < 0.0 {
        -q
    } else {
        q
    }
}

/// Spherical linear interpolation between two unit quaternions.
///
/// `r = 0` gives `q1` and `r = 1` gives `q2` (possibly as `-q2`, the same rotation).
/// If `q1·q2 < 0` one endpoint is negated so the path follows the shortest arc;
/// nearly parallel inputs are blended linearly and renormalized.
pub fn slerp(q1: DQuat, q2: DQuat, r: f64) -> DQuat {
    let mut dot = q1.dot(q2);
    let q2 = if dot < 0.0 {
        dot = -dot;
        -q2
    } else {
        q2
    };

    if dot > SLERP_DOT_THRESHOLD {
        return (q1 * (1.0 - r) + q2 * r).normalize();
    }

    let theta = dot.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let a = ((1.0 - r) * theta).sin() / sin_theta;
    let b = (r * theta).sin() / sin_theta;

    (q1 * a + q2 * b).normalize()
}

/// Shortest rotation taking the direction of `from` onto the direction of `to`.
///
/// The lengths of the vectors do not matter. Opposite directions are related by a
/// half turn about an arbitrary axis orthogonal to `from`.
pub fn from_two_vectors(from: DVec3, to: DVec3) -> Result<DQuat, PoseError> {
    if !from.is_finite() || !to.is_finite() {
        return Err(PoseError::NonFinite("direction"));
    }
    let (n_from, n_to) = (from.length(), to.length());
    if n_from <= AXIS_NORM_EPSILON || n_to <= AXIS_NORM_EPSILON {
        return Err(PoseError::ZeroLengthVector {
            norm: n_from.min(n_to),
        });
    }
    let (a, b) = (from / n_from, to / n_to);
    let cos_theta = a.dot(b);

    if cos_theta < -1.0 + 1e-12 {
        log::debug!("directions are opposite, using a half turn about an orthogonal axis");
        let axis = a.any_orthonormal_vector();
        return Ok(DQuat::from_xyzw(axis.x, axis.y, axis.z, 0.0));
    }

    // q = (cos θ/2, sin θ/2 · axis) with a × b = sin θ · axis
    let s = (2.0 * (1.0 + cos_theta)).sqrt();
    let c = a.cross(b) / s;
    Ok(DQuat::from_xyzw(c.x, c.y, c.z, 0.5 * s).normalize())
}

/// Uniformly distributed random rotation (Shoemake's method).
pub fn random_rotation() -> DQuat {
    let mut rng = rand::rng();

    let r1: f64 = rng.random();
    let r2: f64 = rng.random();
    let r3: f64 = rng.random();

    let one_minus_r1_sqrt = (1.0 - r1).sqrt();
    let r1_sqrt = r1.sqrt();

    let w = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).cos();
    let x = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).sin();
    let y = r1_sqrt * (2.0 * std::f64::consts::PI * r3).cos();
    let z = r1_sqrt * (2.0 * std::f64::consts::PI * r3).sin();

    DQuat::from_xyzw(x, y, z, w).normalize()
}

impl Rotate for DQuat {
    /// Vector part of `q·(0, v)·q⁻¹`, computed with Hamilton products.
    ///
    /// Any non-zero quaternion is accepted since `q⁻¹ = q* / ‖q‖²`.
    fn rotate(&self, v: DVec3) -> DVec3 {
        let p = DQuat::from_xyzw(v.x, v.y, v.z, 0.0);
        let q_inv = self.conjugate() * (1.0 / self.length_squared());
        let rotated = *self * p * q_inv;
        DVec3::new(rotated.x, rotated.y, rotated.z)
    }
}
