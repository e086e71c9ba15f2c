use glam::{DMat3, DVec3};

/// Lower triangular factor `L` of the Gram matrix `G = R·Rᵀ` of a drifted rotation.
///
/// `G = L·Lᵀ`, so `L⁻¹·R` has orthonormal rows and is the Cholesky projection used by
/// [`crate::rotation::orthonormalize`]. The factor has a positive diagonal.
///
/// `None` if a pivot is not strictly positive (NaN included), which happens when `R`
/// is rank deficient and `G` is only semi-definite.
pub fn cholesky3(gram: &DMat3) -> Option<DMat3> {
    let (g00, g10, g20) = (gram.x_axis.x, gram.x_axis.y, gram.x_axis.z);
    let (g11, g21) = (gram.y_axis.y, gram.y_axis.z);
    let g22 = gram.z_axis.z;

    let l00 = pivot(g00)?;
    let l10 = g10 / l00;
    let l20 = g20 / l00;

    let l11 = pivot(g11 - l10 * l10)?;
    let l21 = (g21 - l20 * l10) / l11;

    let l22 = pivot(g22 - l20 * l20 - l21 * l21)?;

    Some(DMat3::from_cols(
        DVec3::new(l00, l10, l20),
        DVec3::new(0.0, l11, l21),
        DVec3::new(0.0, 0.0, l22),
    ))
}

/// Square root of a diagonal entry of the factor, rejecting non-positive values.
#[inline]
fn pivot(d: f64) -> Option<f64> {
    (d > 0.0).then(|| d.sqrt())
}

/// Inverse of a lower triangular matrix with a non-zero diagonal, by forward substitution.
pub fn lower_triangular_inverse(l: &DMat3) -> DMat3 {
    let (l00, l10, l20) = (l.x_axis.x, l.x_axis.y, l.x_axis.z);
    let (l11, l21) = (l.y_axis.y, l.y_axis.z);
    let l22 = l.z_axis.z;

    let m00 = 1.0 / l00;
    let m11 = 1.0 / l11;
    let m22 = 1.0 / l22;
    let m10 = -l10 * m00 * m11;
    let m21 = -l21 * m11 * m22;
    let m20 = -(l20 * m00 + l21 * m10) * m22;

    DMat3::from_cols(
        DVec3::new(m00, m10, m20),
        DVec3::new(0.0, m11, m21),
        DVec3::new(0.0, 0.0, m22),
    )
}
