//! 3×3 Singular Value Decomposition (SVD) in double precision.
//!
//! For any matrix A ∈ ℝ³ˣ³ the SVD decomposes it into three matrices:
//!
//! ```text
//! A = U Σ Vᵀ
//! ```
//!
//! where U and V are orthogonal and Σ holds the singular values σ₁ ≥ σ₂ ≥ σ₃ ≥ 0.
//!
//! # Implementation Details
//!
//! * V is computed from the eigenvectors of AᵀA with cyclic Jacobi sweeps using
//!   exact (not approximated) Givens rotations, so the result reaches double
//!   precision instead of the handful of sweeps a real-time f32 solver affords.
//! * U is built from the columns of B = A·V with Gram-Schmidt, falling back to an
//!   arbitrary orthonormal completion when A is rank deficient.
//!
//! # Example
//!
//! ```
//! use glam::{DMat3, DVec3};
//! use kornia_pose::linalg::svd3;
//!
//! let a = DMat3::from_diagonal(DVec3::new(1.0, 3.0, 2.0));
//! let svd = svd3(&a);
//! assert!((svd.s() - DVec3::new(3.0, 2.0, 1.0)).length() < 1e-12);
//! ```
use glam::{DMat3, DVec3};

const MAX_SWEEPS: usize = 16;

/// Output of [`svd3`].
#[derive(Debug, Clone, Copy)]
pub struct Svd3 {
    /// The matrix of left singular vectors.
    u: DMat3,

    /// The singular values, sorted in descending order.
    s: DVec3,

    /// The matrix of right singular vectors.
    v: DMat3,
}

impl Svd3 {
    /// Get the left singular vectors matrix.
    #[inline]
    pub fn u(&self) -> &DMat3 {
        &self.u
    }

    /// Get the singular values in descending order.
    #[inline]
    pub fn s(&self) -> DVec3 {
        self.s
    }

    /// Get the singular values as a diagonal matrix.
    #[inline]
    pub fn s_mat(&self) -> DMat3 {
        DMat3::from_diagonal(self.s)
    }

    /// Get the right singular vectors matrix.
    #[inline]
    pub fn v(&self) -> &DMat3 {
        &self.v
    }
}

#[inline(always)]
fn elem(m: &DMat3, row: usize, col: usize) -> f64 {
    m.col(col)[row]
}

/// Givens rotation J such that Jᵀ·S·J zeroes the (p, q) entry of the symmetric matrix S.
fn jacobi_rotation(s: &DMat3, p: usize, q: usize) -> Option<DMat3> {
    let s_pq = elem(s, p, q);
    if s_pq == 0.0 {
        return None;
    }

    let theta = (elem(s, q, q) - elem(s, p, p)) / (2.0 * s_pq);
    let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
    let cos_theta = 1.0 / (t * t + 1.0).sqrt();
    let sin_theta = t * cos_theta;

    // column-major: cols[c][r]
    let mut cols = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    cols[p][p] = cos_theta;
    cols[q][q] = cos_theta;
    cols[q][p] = sin_theta;
    cols[p][q] = -sin_theta;

    Some(DMat3::from_cols_array_2d(&cols))
}

/// Eigen-decomposition of a symmetric matrix. Returns the eigenvalues and the
/// eigenvectors stored as columns, in no particular order.
fn jacobi_eigenanalysis(mut s: DMat3) -> (DVec3, DMat3) {
    let mut v = DMat3::IDENTITY;

    for _ in 0..MAX_SWEEPS {
        let off_diag_sq = elem(&s, 1, 0).powi(2) + elem(&s, 2, 0).powi(2) + elem(&s, 2, 1).powi(2);
        let diag_sq = elem(&s, 0, 0).powi(2) + elem(&s, 1, 1).powi(2) + elem(&s, 2, 2).powi(2);
        if off_diag_sq <= f64::EPSILON * f64::EPSILON * diag_sq {
            break;
        }

        for (p, q) in [(0, 1), (1, 2), (0, 2)] {
            if let Some(j) = jacobi_rotation(&s, p, q) {
                s = j.transpose() * s * j;
                v *= j;
            }
        }
    }

    (DVec3::new(s.x_axis.x, s.y_axis.y, s.z_axis.z), v)
}

/// Reorders the eigenvectors so that the eigenvalues are in descending order.
fn sort_eigenpairs(eigenvalues: DVec3, v: &DMat3) -> DMat3 {
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));
    DMat3::from_cols(v.col(order[0]), v.col(order[1]), v.col(order[2]))
}

/// Compute the singular value decomposition of a 3×3 matrix.
pub fn svd3(a: &DMat3) -> Svd3 {
    // right singular vectors: eigenvectors of AᵀA
    let (eigenvalues, v) = jacobi_eigenanalysis(a.transpose() * *a);
    let v = sort_eigenpairs(eigenvalues, &v);

    // B = A·V has orthogonal columns σᵢ·uᵢ
    let b = *a * v;
    let (b1, b2, b3) = (b.x_axis, b.y_axis, b.z_axis);

    let n1 = b1.length();
    let tol = 8.0 * f64::EPSILON * n1.max(f64::MIN_POSITIVE);

    let u1 = if n1 > f64::MIN_POSITIVE {
        b1 / n1
    } else {
        DVec3::X
    };

    let w2 = b2 - u1.dot(b2) * u1;
    let n2 = w2.length();
    let mut u2 = if n2 > tol {
        w2 / n2
    } else {
        u1.any_orthonormal_vector()
    };
    let mut s2 = u2.dot(b2);
    if s2 < 0.0 {
        u2 = -u2;
        s2 = -s2;
    }

    let mut u3 = u1.cross(u2);
    let mut s3 = u3.dot(b3);
    if s3 < 0.0 {
        u3 = -u3;
        s3 = -s3;
    }

    Svd3 {
        u: DMat3::from_cols(u1, u2, u3),
        s: DVec3::new(n1, s2, s3),
        v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    /// Helper function to validate all critical SVD properties
    fn verify_svd_properties(a: &DMat3, svd: &Svd3) {
        let u = *svd.u();
        let v = *svd.v();

        let reconstruction = u * svd.s_mat() * v.transpose();
        assert!(
            a.abs_diff_eq(reconstruction, EPSILON),
            "Reconstruction failed: A != U*S*V.T\nA:\n{a}\nReconstruction:\n{reconstruction}"
        );

        let u_t_u = u.transpose() * u;
        assert!(
            DMat3::IDENTITY.abs_diff_eq(u_t_u, EPSILON),
            "U is not orthogonal: U.T*U != I\nU.T*U:\n{u_t_u}"
        );

        let v_t_v = v.transpose() * v;
        assert!(
            DMat3::IDENTITY.abs_diff_eq(v_t_v, EPSILON),
            "V is not orthogonal: V.T*V != I\nV.T*V:\n{v_t_v}"
        );

        let s = svd.s();
        assert!(
            s.x >= 0.0 && s.y >= 0.0 && s.z >= 0.0,
            "Singular values are not non-negative: {s:?}"
        );
        assert!(
            s.x >= s.y - EPSILON && s.y >= s.z - EPSILON,
            "Singular values are not sorted: {s:?}"
        );
    }

    #[test]
    fn test_svd3_diagonal_unsorted() {
        let a = DMat3::from_diagonal(DVec3::new(2.0, 3.0, 1.0));
        let svd = svd3(&a);
        verify_svd_properties(&a, &svd);
        assert!(svd.s().abs_diff_eq(DVec3::new(3.0, 2.0, 1.0), EPSILON));
    }

    #[test]
    fn test_svd3_zero() {
        let a = DMat3::ZERO;
        let svd = svd3(&a);
        verify_svd_properties(&a, &svd);
        assert!(svd.s().abs_diff_eq(DVec3::ZERO, EPSILON));
    }

    #[test]
    fn test_svd3_identity() {
        let a = DMat3::IDENTITY;
        let svd = svd3(&a);
        verify_svd_properties(&a, &svd);
        assert!(svd.s().abs_diff_eq(DVec3::ONE, EPSILON));
    }

    #[test]
    fn test_svd3_singular_rank1() {
        let a = DMat3::from_cols(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(2.0, 4.0, 6.0),
            DVec3::new(3.0, 6.0, 9.0),
        );
        let svd = svd3(&a);
        verify_svd_properties(&a, &svd);
        assert!(svd.s().x > 1.0);
        assert!(svd.s().y.abs() < 1e-6);
        assert!(svd.s().z.abs() < 1e-6);
    }

    #[test]
    fn test_svd3_singular_rank2() {
        let a = DMat3::from_cols(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(4.0, 5.0, 6.0),
            DVec3::new(5.0, 7.0, 9.0), // c0 + c1
        );
        let svd = svd3(&a);
        verify_svd_properties(&a, &svd);
        assert!(svd.s().y > 1e-3);
        assert!(svd.s().z.abs() < 1e-6);
    }

    #[test]
    fn test_svd3_rotation_matrix() {
        let a = DMat3::from_rotation_y(std::f64::consts::FRAC_PI_4);
        let svd = svd3(&a);
        verify_svd_properties(&a, &svd);
        assert!(svd.s().abs_diff_eq(DVec3::ONE, EPSILON));
        // the orthogonal polar factor of a rotation is the rotation itself
        let polar = *svd.u() * svd.v().transpose();
        assert!(polar.abs_diff_eq(a, EPSILON));
    }

    #[test]
    fn test_svd3_reflection_matrix() {
        let a = DMat3::from_diagonal(DVec3::new(1.0, -1.0, 1.0));
        let svd = svd3(&a);
        verify_svd_properties(&a, &svd);
        assert!(svd.s().abs_diff_eq(DVec3::ONE, EPSILON));
    }

    #[test]
    fn test_svd3_general_full_rank() {
        let a = DMat3::from_cols(
            DVec3::new(1.0, 4.0, 7.0),
            DVec3::new(2.0, 5.0, 8.0),
            DVec3::new(3.0, 6.0, 10.0),
        );
        let svd = svd3(&a);
        verify_svd_properties(&a, &svd);
        assert!(svd.s().min_element() > 1e-3);
    }
}
