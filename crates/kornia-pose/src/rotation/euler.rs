//! Euler angles for the 12 canonical axis sequences.
//!
//! An angle triple only describes a rotation together with its [`EulerOrder`] and
//! [`EulerConvention`]:
//!
//! * **Intrinsic** rotations turn about the axes of the frame being rotated, so for the
//!   sequence `(A₁, A₂, A₃)` and angles `(a, b, c)` the matrix is
//!   `R_A₁(a)·R_A₂(b)·R_A₃(c)`.
//! * **Extrinsic** rotations turn about the fixed world axes, first `A₁`, then `A₂`, then
//!   `A₃`, giving `R_A₃(c)·R_A₂(b)·R_A₁(a)`.
//!
//! Intrinsic XYZ and extrinsic ZYX are therefore *not* inverses of each other, nor the
//! same rotation, for a given triple: intrinsic XYZ with `(a, b, c)` equals extrinsic
//! ZYX with the reversed triple `(c, b, a)`.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use super::Rotate;

/// Below this value the middle angle is treated as gimbal locked.
const GIMBAL_EPSILON: f64 = 1e-9;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Elementary rotation about this axis.
    pub fn rotation(self, angle: f64) -> DMat3 {
        match self {
            Axis::X => DMat3::from_rotation_x(angle),
            Axis::Y => DMat3::from_rotation_y(angle),
            Axis::Z => DMat3::from_rotation_z(angle),
        }
    }
}

/// Axis sequence of an Euler angle triple.
///
/// The first six are Tait–Bryan sequences (three distinct axes), the last six are
/// proper Euler sequences (first and last axis repeated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EulerOrder {
    /// X, then Y, then Z.
    Xyz,
    /// X, then Z, then Y.
    Xzy,
    /// Y, then X, then Z.
    Yxz,
    /// Y, then Z, then X.
    Yzx,
    /// Z, then X, then Y.
    Zxy,
    /// Z, then Y, then X.
    Zyx,
    /// X, then Y, then X.
    Xyx,
    /// X, then Z, then X.
    Xzx,
    /// Y, then X, then Y.
    Yxy,
    /// Y, then Z, then Y.
    Yzy,
    /// Z, then X, then Z.
    Zxz,
    /// Z, then Y, then Z.
    Zyz,
}

impl EulerOrder {
    /// Every supported sequence.
    pub const ALL: [EulerOrder; 12] = [
        EulerOrder::Xyz,
        EulerOrder::Xzy,
        EulerOrder::Yxz,
        EulerOrder::Yzx,
        EulerOrder::Zxy,
        EulerOrder::Zyx,
        EulerOrder::Xyx,
        EulerOrder::Xzx,
        EulerOrder::Yxy,
        EulerOrder::Yzy,
        EulerOrder::Zxz,
        EulerOrder::Zyz,
    ];

    /// The three rotation axes in application order.
    pub fn axes(self) -> [Axis; 3] {
        use Axis::{X, Y, Z};
        match self {
            EulerOrder::Xyz => [X, Y, Z],
            EulerOrder::Xzy => [X, Z, Y],
            EulerOrder::Yxz => [Y, X, Z],
            EulerOrder::Yzx => [Y, Z, X],
            EulerOrder::Zxy => [Z, X, Y],
            EulerOrder::Zyx => [Z, Y, X],
            EulerOrder::Xyx => [X, Y, X],
            EulerOrder::Xzx => [X, Z, X],
            EulerOrder::Yxy => [Y, X, Y],
            EulerOrder::Yzy => [Y, Z, Y],
            EulerOrder::Zxz => [Z, X, Z],
            EulerOrder::Zyz => [Z, Y, Z],
        }
    }

    /// The same axes applied in reverse order.
    pub fn reversed(self) -> Self {
        match self {
            EulerOrder::Xyz => EulerOrder::Zyx,
            EulerOrder::Xzy => EulerOrder::Yzx,
            EulerOrder::Yxz => EulerOrder::Zxy,
            EulerOrder::Yzx => EulerOrder::Xzy,
            EulerOrder::Zxy => EulerOrder::Yxz,
            EulerOrder::Zyx => EulerOrder::Xyz,
            proper => proper,
        }
    }

    /// Whether the first and last axis coincide.
    pub fn is_proper(self) -> bool {
        let [first, _, last] = self.axes();
        first == last
    }
}

/// Whether the rotations of a triple act on the moving frame or on the world frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EulerConvention {
    /// About the axes of the frame being rotated.
    Intrinsic,
    /// About the fixed world axes.
    Extrinsic,
}

/// Three angles in radians, applied about the axes of `order` under `convention`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Angles for the first, second and third axis of `order`.
    pub angles: [f64; 3],
    /// Axis sequence.
    pub order: EulerOrder,
    /// Intrinsic or extrinsic composition.
    pub convention: EulerConvention,
}

impl EulerAngles {
    /// Create a triple paired with its sequence and convention.
    pub fn new(angles: [f64; 3], order: EulerOrder, convention: EulerConvention) -> Self {
        Self {
            angles,
            order,
            convention,
        }
    }

    /// The same rotation expressed under the other convention.
    ///
    /// An intrinsic sequence equals the extrinsic sequence of the reversed axes with
    /// the angles reversed.
    pub fn to_convention(&self, convention: EulerConvention) -> Self {
        if convention == self.convention {
            return *self;
        }
        let [a, b, c] = self.angles;
        Self::new([c, b, a], self.order.reversed(), convention)
    }

    /// The rotation matrix of this triple.
    pub fn matrix(&self) -> DMat3 {
        from_euler(self)
    }
}

impl Rotate for EulerAngles {
    fn rotate(&self, v: DVec3) -> DVec3 {
        from_euler(self) * v
    }
}

/// Compose the three elementary rotations of an Euler triple.
pub fn from_euler(euler: &EulerAngles) -> DMat3 {
    let [a1, a2, a3] = euler.order.axes();
    let [a, b, c] = euler.angles;
    let (r1, r2, r3) = (a1.rotation(a), a2.rotation(b), a3.rotation(c));
    match euler.convention {
        EulerConvention::Intrinsic => r1 * r2 * r3,
        EulerConvention::Extrinsic => r3 * r2 * r1,
    }
}

#[inline(always)]
fn elem(m: &DMat3, row: usize, col: usize) -> f64 {
    m.col(col)[row]
}

/// Decompose a rotation matrix into Euler angles of the given sequence and convention.
///
/// Ranges: the first and third angles lie in (−π, π]; the middle angle lies in
/// [−π/2, π/2] for Tait–Bryan sequences and in [0, π] for proper Euler sequences.
///
/// At gimbal lock (middle angle at ±π/2 for Tait–Bryan, 0 or π for proper Euler)
/// only the sum or difference of the outer angles is observable. The third angle
/// is then set to zero and the first one carries the whole remaining rotation.
pub fn to_euler(r: &DMat3, order: EulerOrder, convention: EulerConvention) -> EulerAngles {
    if convention == EulerConvention::Extrinsic {
        return to_euler(r, order.reversed(), EulerConvention::Intrinsic)
            .to_convention(EulerConvention::Extrinsic);
    }

    let [first, second, _] = order.axes();
    let (i, j) = (first.index(), second.index());
    let k = 3 - i - j;
    // +1 for cyclic (i, j, k), -1 otherwise
    let parity = if (i + 1) % 3 == j { 1.0 } else { -1.0 };

    let (a, b, c) = if order.is_proper() {
        let sin_b = elem(r, i, j).hypot(elem(r, i, k));
        let b = sin_b.atan2(elem(r, i, i));
        if sin_b > GIMBAL_EPSILON {
            let a = elem(r, j, i).atan2(-parity * elem(r, k, i));
            let c = elem(r, i, j).atan2(parity * elem(r, i, k));
            (a, b, c)
        } else {
            log::debug!("gimbal lock in {order:?} decomposition, third angle set to zero");
            (gimbal_first_angle(r, j, k, parity), b, 0.0)
        }
    } else {
        let cos_b = elem(r, i, i).hypot(elem(r, i, j));
        let b = (parity * elem(r, i, k)).atan2(cos_b);
        if cos_b > GIMBAL_EPSILON {
            let a = (-parity * elem(r, j, k)).atan2(elem(r, k, k));
            let c = (-parity * elem(r, i, j)).atan2(elem(r, i, i));
            (a, b, c)
        } else {
            log::debug!("gimbal lock in {order:?} decomposition, third angle set to zero");
            (gimbal_first_angle(r, j, k, parity), b, 0.0)
        }
    };

    EulerAngles::new([a, b, c], order, EulerConvention::Intrinsic)
}

/// With the third angle fixed at zero, column `j` of R is `R_i(a)·e_j`,
/// which no longer depends on the middle rotation about `j`.
fn gimbal_first_angle(r: &DMat3, j: usize, k: usize, parity: f64) -> f64 {
    (parity * elem(r, k, j)).atan2(elem(r, j, j))
}
