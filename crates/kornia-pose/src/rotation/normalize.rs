//! Projection of drifted matrices back onto SO(3).
//!
//! Products of many rotation matrices slowly lose orthogonality to rounding. The
//! strategies here map such a matrix to a nearby proper rotation, always with
//! `det = +1`.

use glam::{DMat3, DVec3};

use super::quaternion::{from_quaternion, to_quaternion};
use crate::error::PoseError;
use crate::linalg::{cholesky3, lower_triangular_inverse, svd3};

/// Strategy used by [`orthonormalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrthonormalizeMethod {
    /// Convert to a unit quaternion and back. Cheap, but not the closest rotation.
    Quaternion,
    /// `U·Vᵀ` from `R = U·Σ·Vᵀ`, the closest rotation in the Frobenius norm.
    #[default]
    Svd,
    /// `L⁻¹·R` with `L·Lᵀ = R·Rᵀ`, a projection along the manifold of lower
    /// triangular corrections.
    Cholesky,
}

/// Map `r` to a proper rotation matrix using `method`.
///
/// # Errors
///
/// * [`PoseError::NonFinite`] if `r` contains NaN or infinite entries.
/// * [`PoseError::NotPositiveDefinite`] if the Cholesky method is given a rank
///   deficient matrix.
///
/// # Example
///
/// ```
/// use glam::DMat3;
/// use kornia_pose::rotation::{is_rotation, orthonormalize, OrthonormalizeMethod};
///
/// let drifted = DMat3::from_rotation_z(0.3) * 1.001;
/// let r = orthonormalize(&drifted, OrthonormalizeMethod::Svd).unwrap();
/// assert!(is_rotation(&r, 1e-12));
/// ```
pub fn orthonormalize(r: &DMat3, method: OrthonormalizeMethod) -> Result<DMat3, PoseError> {
    if !r.is_finite() {
        return Err(PoseError::NonFinite("matrix"));
    }

    match method {
        OrthonormalizeMethod::Quaternion => from_quaternion(to_quaternion(r)),
        OrthonormalizeMethod::Svd => Ok(svd_projection(r)),
        OrthonormalizeMethod::Cholesky => cholesky_projection(r),
    }
}

fn svd_projection(r: &DMat3) -> DMat3 {
    let svd = svd3(r);
    let (u, v) = (*svd.u(), *svd.v());
    let projected = u * v.transpose();
    if projected.determinant() > 0.0 {
        return projected;
    }

    // flip the singular vector of the smallest singular value
    log::debug!("SVD projection is a reflection, flipping the last singular vector");
    u * DMat3::from_diagonal(DVec3::new(1.0, 1.0, -1.0)) * v.transpose()
}

fn cholesky_projection(r: &DMat3) -> Result<DMat3, PoseError> {
    let l = cholesky3(&(*r * r.transpose())).ok_or(PoseError::NotPositiveDefinite)?;

    // L has a positive diagonal, so L⁻¹·R keeps the sign of det R
    if r.determinant() < 0.0 {
        log::debug!("matrix has a negative determinant, using the SVD projection instead");
        return Ok(svd_projection(r));
    }

    Ok(lower_triangular_inverse(&l) * *r)
}

/// Whether `r` is orthogonal with determinant +1, up to `tolerance`.
///
/// Orthogonality is measured as the largest absolute entry of `R·Rᵀ − I`.
pub fn is_rotation(r: &DMat3, tolerance: f64) -> bool {
    r.is_finite()
        && (*r * r.transpose()).abs_diff_eq(DMat3::IDENTITY, tolerance)
        && (r.determinant() - 1.0).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    const METHODS: [OrthonormalizeMethod; 3] = [
        OrthonormalizeMethod::Quaternion,
        OrthonormalizeMethod::Svd,
        OrthonormalizeMethod::Cholesky,
    ];

    fn drifted() -> (DMat3, DMat3) {
        let rotation = DMat3::from_rotation_z(0.7) * DMat3::from_rotation_x(-0.4);
        let noise = DMat3::from_cols(
            DVec3::new(1e-4, -2e-4, 3e-4),
            DVec3::new(2e-4, 1e-4, -1e-4),
            DVec3::new(-3e-4, 2e-4, 2e-4),
        );
        (rotation, rotation * (DMat3::IDENTITY + noise))
    }

    #[test]
    fn test_exact_rotation_is_kept() {
        // rows (0.36, 0.48, -0.8), (-0.8, 0.6, 0), (0.48, 0.64, 0.6)
        let r = DMat3::from_cols(
            DVec3::new(0.36, -0.8, 0.48),
            DVec3::new(0.48, 0.6, 0.64),
            DVec3::new(-0.8, 0.0, 0.6),
        );
        assert!(is_rotation(&r, EPSILON));
        for method in METHODS {
            let projected = orthonormalize(&r, method).unwrap();
            assert!(projected.abs_diff_eq(r, EPSILON), "{method:?}: {projected}");
        }
    }

    #[test]
    fn test_drifted_matrix() {
        let (rotation, drifted) = drifted();
        assert!(!is_rotation(&drifted, 1e-6));
        for method in METHODS {
            let projected = orthonormalize(&drifted, method).unwrap();
            assert!(is_rotation(&projected, EPSILON), "{method:?}: {projected}");
            assert!(projected.abs_diff_eq(rotation, 1e-3), "{method:?}");
        }
    }

    #[test]
    fn test_svd_is_closest() {
        let (_, drifted) = drifted();
        let svd = orthonormalize(&drifted, OrthonormalizeMethod::Svd).unwrap();
        let frobenius = |m: DMat3| {
            (m.x_axis.length_squared() + m.y_axis.length_squared() + m.z_axis.length_squared())
                .sqrt()
        };
        let d_svd = frobenius(drifted - svd);
        for method in [OrthonormalizeMethod::Quaternion, OrthonormalizeMethod::Cholesky] {
            let other = orthonormalize(&drifted, method).unwrap();
            assert!(d_svd <= frobenius(drifted - other) + EPSILON);
        }
    }

    #[test]
    fn test_reflection_input() {
        let reflection = DMat3::from_diagonal(DVec3::new(1.0, 1.0, -1.0)) * 1.01;
        for method in METHODS {
            let projected = orthonormalize(&reflection, method).unwrap();
            assert!(is_rotation(&projected, EPSILON), "{method:?}: {projected}");
            assert_relative_eq!(projected.determinant(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_rank_deficient() {
        let r = DMat3::from_cols(DVec3::X, DVec3::Y, DVec3::ZERO);
        assert_eq!(
            orthonormalize(&r, OrthonormalizeMethod::Cholesky),
            Err(PoseError::NotPositiveDefinite)
        );
        let projected = orthonormalize(&r, OrthonormalizeMethod::Svd).unwrap();
        assert!(is_rotation(&projected, EPSILON));
    }

    #[test]
    fn test_non_finite() {
        let mut r = DMat3::IDENTITY;
        r.y_axis.z = f64::NAN;
        for method in METHODS {
            assert_eq!(
                orthonormalize(&r, method),
                Err(PoseError::NonFinite("matrix"))
            );
        }
    }

    #[test]
    fn test_is_rotation() {
        assert!(is_rotation(&DMat3::IDENTITY, EPSILON));
        assert!(is_rotation(&DMat3::from_rotation_y(2.0), EPSILON));
        assert!(!is_rotation(&(DMat3::IDENTITY * 2.0), EPSILON));
        assert!(!is_rotation(&DMat3::from_diagonal(DVec3::new(-1.0, 1.0, 1.0)), EPSILON));
    }
}
