//! Axis-angle representation and Rodrigues' formula.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use super::Rotate;
use crate::error::PoseError;

/// Below this norm an axis has no usable direction.
pub(crate) const AXIS_NORM_EPSILON: f64 = 1e-12;

/// sin θ below this value makes the skew part of R unusable for axis recovery.
const SKEW_EPSILON: f64 = 1e-7;

/// A rotation of `angle` radians about a unit `axis`.
///
/// The fields are public, so the axis is only guaranteed unit when the value comes
/// from [`AxisAngle::new`] or a conversion. Consumers normalize it before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    /// Unit rotation axis.
    pub axis: DVec3,
    /// Rotation angle in radians.
    pub angle: f64,
}

impl AxisAngle {
    /// No rotation, expressed about the x axis.
    pub const IDENTITY: Self = Self {
        axis: DVec3::X,
        angle: 0.0,
    };

    /// Create an axis-angle pair, normalizing the axis.
    pub fn new(axis: DVec3, angle: f64) -> Result<Self, PoseError> {
        if !angle.is_finite() {
            return Err(PoseError::NonFinite("angle"));
        }
        Ok(Self {
            axis: unit_axis(axis)?,
            angle,
        })
    }

    /// Create from a rotation vector whose direction is the axis and whose norm is the angle.
    pub fn from_rotation_vector(v: DVec3) -> Self {
        let angle = v.length();
        if angle <= AXIS_NORM_EPSILON {
            return Self::IDENTITY;
        }
        Self {
            axis: v / angle,
            angle,
        }
    }

    /// The rotation vector `axis * angle`.
    #[inline]
    pub fn rotation_vector(&self) -> DVec3 {
        self.axis * self.angle
    }

    /// The rotation matrix of this axis-angle pair.
    pub fn matrix(&self) -> Result<DMat3, PoseError> {
        from_axis_angle(self.axis, self.angle)
    }
}

impl Rotate for AxisAngle {
    /// Rotates `v` with Rodrigues' formula about the normalized axis.
    ///
    /// An axis with no direction (zero, NaN or infinite) is treated as the identity and
    /// `v` is returned unchanged. Use [`AxisAngle::matrix`] to get an error instead.
    fn rotate(&self, v: DVec3) -> DVec3 {
        let Some(k) = self.axis.try_normalize() else {
            return v;
        };
        let (sin_theta, cos_theta) = self.angle.sin_cos();
        v * cos_theta + k.cross(v) * sin_theta + k * k.dot(v) * (1.0 - cos_theta)
    }
}

fn unit_axis(axis: DVec3) -> Result<DVec3, PoseError> {
    if !axis.is_finite() {
        return Err(PoseError::NonFinite("axis"));
    }
    let norm = axis.length();
    if norm <= AXIS_NORM_EPSILON {
        return Err(PoseError::ZeroLengthAxis { norm });
    }
    Ok(axis / norm)
}

/// Vector space -> skew-symmetric cross-product matrix, `hat(a) * b == a.cross(b)`.
pub fn hat(v: DVec3) -> DMat3 {
    let (a, b, c) = (v.x, v.y, v.z);
    DMat3::from_cols_array(&[0.0, c, -b, -c, 0.0, a, b, -a, 0.0])
}

/// Skew-symmetric matrix -> vector space, inverse of [`hat`].
pub fn vee(omega: DMat3) -> DVec3 {
    DVec3::new(omega.y_axis.z, omega.z_axis.x, omega.x_axis.y)
}

/// Rotation matrix from an axis and an angle in radians.
///
/// The axis is normalized before Rodrigues' formula
/// `R = I + sin(θ)·K + (1 − cos(θ))·K²` is applied, with `K = hat(axis)`.
///
/// # Errors
///
/// [`PoseError::ZeroLengthAxis`] if the axis has near-zero norm, and
/// [`PoseError::NonFinite`] for NaN or infinite inputs.
pub fn from_axis_angle(axis: DVec3, angle: f64) -> Result<DMat3, PoseError> {
    if !angle.is_finite() {
        return Err(PoseError::NonFinite("angle"));
    }
    let k = hat(unit_axis(axis)?);
    let (sin_theta, cos_theta) = angle.sin_cos();
    Ok(DMat3::IDENTITY + sin_theta * k + (1.0 - cos_theta) * (k * k))
}

/// Recover the axis-angle pair of a rotation matrix.
///
/// The angle is `acos((trace(R) − 1) / 2)` with the argument clamped to [−1, 1],
/// returned in [0, π]. The axis comes from the skew part `(R − Rᵀ)/2 = sin(θ)·hat(axis)`
/// while sin θ is large enough to be trusted; there the angle is evaluated as
/// `atan2(sin θ, cos θ)`, the same value as the clamped acos but accurate near 0.
///
/// Two precision-limited fallbacks handle a vanishing skew part:
///
/// * θ ≈ 0: the axis is whatever direction the skew part still carries, or +X when
///   it is exactly zero (every axis describes the identity).
/// * θ ≈ π: the skew part no longer determines the axis. Its components are taken
///   from the diagonal of `(R + I)/2` (generalised as `(Rᵢᵢ − cos θ)/(1 − cos θ)`),
///   starting from the largest one, with the others read from the symmetric part
///   and the sign chosen to agree with the residual skew part.
pub fn to_axis_angle(r: &DMat3) -> AxisAngle {
    let trace = r.x_axis.x + r.y_axis.y + r.z_axis.z;
    let cos_theta = ((trace - 1.0) * 0.5).clamp(-1.0, 1.0);

    let skew = 0.5
        * DVec3::new(
            r.y_axis.z - r.z_axis.y,
            r.z_axis.x - r.x_axis.z,
            r.x_axis.y - r.y_axis.x,
        );
    let sin_theta = skew.length();
    let angle = sin_theta.atan2(cos_theta);

    if sin_theta > SKEW_EPSILON {
        return AxisAngle {
            axis: skew / sin_theta,
            angle,
        };
    }

    if cos_theta > 0.0 {
        let axis = if sin_theta > 0.0 {
            skew / sin_theta
        } else {
            DVec3::X
        };
        return AxisAngle { axis, angle };
    }

    log::debug!("rotation angle {angle} is close to pi, recovering the axis from the diagonal");

    let one_minus_cos = 1.0 - cos_theta;
    let diag = DVec3::new(r.x_axis.x, r.y_axis.y, r.z_axis.z);
    let k_sq = ((diag - DVec3::splat(cos_theta)) / one_minus_cos).max(DVec3::ZERO);

    // symmetric part: (Rᵢⱼ + Rⱼᵢ)/2 = (1 − cos θ)·kᵢ·kⱼ
    let sym = |i: usize, j: usize| 0.5 * (r.col(j)[i] + r.col(i)[j]) / one_minus_cos;

    let i = if k_sq.x >= k_sq.y && k_sq.x >= k_sq.z {
        0
    } else if k_sq.y >= k_sq.z {
        1
    } else {
        2
    };
    let k_i = k_sq[i].sqrt();
    let mut k = DVec3::ZERO;
    for j in 0..3 {
        k[j] = if j == i { k_i } else { sym(i, j) / k_i };
    }

    let mut axis = k.normalize();
    if axis.dot(skew) < 0.0 {
        axis = -axis;
    }

    AxisAngle { axis, angle }
}
