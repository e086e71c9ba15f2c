use glam::{DMat3, DMat4, DQuat, DVec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PoseError;
use crate::rotation::{
    axis_angle::from_axis_angle, normalize_quaternion, random_rotation, to_quaternion, Rotate,
};

/// A rigid body transformation `p ↦ R·p + t` without scale.
///
/// The rotation is stored as a unit quaternion. Every constructor, deserialization
/// included, and every composition keeps it unit norm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRigidTransform", into = "RawRigidTransform")]
pub struct RigidTransform {
    rotation: DQuat,
    translation: DVec3,
}

/// Serialized form of [`RigidTransform`], checked by [`RigidTransform::new`] on the way in.
#[derive(Serialize, Deserialize)]
struct RawRigidTransform {
    rotation: DQuat,
    translation: DVec3,
}

impl TryFrom<RawRigidTransform> for RigidTransform {
    type Error = PoseError;

    fn try_from(raw: RawRigidTransform) -> Result<Self, Self::Error> {
        Self::new(raw.rotation, raw.translation)
    }
}

impl From<RigidTransform> for RawRigidTransform {
    fn from(transform: RigidTransform) -> Self {
        Self {
            rotation: transform.rotation,
            translation: transform.translation,
        }
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigidTransform {
    /// The transformation that maps every point onto itself.
    pub const IDENTITY: Self = Self {
        rotation: DQuat::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Create a transform, normalizing the rotation quaternion.
    ///
    /// # Errors
    ///
    /// Fails with the errors of [`normalize_quaternion`] if the quaternion is degenerate
    /// or the inputs are not finite.
    pub fn new(rotation: DQuat, translation: DVec3) -> Result<Self, PoseError> {
        if !translation.is_finite() {
            return Err(PoseError::NonFinite("translation"));
        }
        Ok(Self {
            rotation: normalize_quaternion(rotation)?,
            translation,
        })
    }

    /// Create a transform from a rotation matrix and a translation.
    ///
    /// # Errors
    ///
    /// [`PoseError::NonFinite`] if the matrix or the translation has NaN or infinite
    /// entries.
    pub fn from_rotation_matrix(rotation: &DMat3, translation: DVec3) -> Result<Self, PoseError> {
        if !rotation.is_finite() {
            return Err(PoseError::NonFinite("matrix"));
        }
        if !translation.is_finite() {
            return Err(PoseError::NonFinite("translation"));
        }
        Ok(Self {
            rotation: to_quaternion(rotation),
            translation,
        })
    }

    /// Create a transform rotating `angle` radians about `axis`, then translating.
    pub fn from_axis_angle(axis: DVec3, angle: f64, translation: DVec3) -> Result<Self, PoseError> {
        let rotation = from_axis_angle(axis, angle)?;
        Self::from_rotation_matrix(&rotation, translation)
    }

    /// Create a transform from a homogeneous 4×4 matrix. The bottom row is ignored.
    ///
    /// # Errors
    ///
    /// [`PoseError::NonFinite`] if the rotation block or the translation column has NaN
    /// or infinite entries.
    pub fn from_matrix(mat: &DMat4) -> Result<Self, PoseError> {
        let rotation = DMat3::from_mat4(*mat);
        Self::from_rotation_matrix(&rotation, mat.w_axis.truncate())
    }

    /// Assemble a transform from a quaternion that is already unit norm.
    pub(crate) fn from_unit_parts(rotation: DQuat, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// A uniformly random rotation with a translation drawn from the unit cube.
    pub fn from_random() -> Self {
        let mut rng = rand::rng();

        let t1: f64 = rng.random();
        let t2: f64 = rng.random();
        let t3: f64 = rng.random();

        Self {
            rotation: random_rotation(),
            translation: DVec3::new(t1, t2, t3),
        }
    }

    /// The rotation part as a unit quaternion.
    #[inline]
    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    /// The translation part.
    #[inline]
    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    /// The rotation part as a 3×3 matrix.
    #[inline]
    pub fn rotation_matrix(&self) -> DMat3 {
        DMat3::from_quat(self.rotation)
    }

    /// The homogeneous 4×4 matrix `[R t; 0 1]`.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: (self.rotation * other.rotation).normalize(),
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// Map a point, `R·p + t`.
    #[inline]
    pub fn apply(&self, p: DVec3) -> DVec3 {
        self.rotation * p + self.translation
    }

    /// The transform undoing `self`, `(Rᵀ, −Rᵀ·t)`.
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.conjugate();
        Self {
            rotation,
            translation: -(rotation * self.translation),
        }
    }

    /// Translate after this transform: `Trans(t) · self`.
    pub fn pretranslated(&self, translation: DVec3) -> Self {
        Self {
            rotation: self.rotation,
            translation: self.translation + translation,
        }
    }

    /// Rotate before this transform: `self · Rot(q)`.
    ///
    /// # Errors
    ///
    /// Fails if `rotation` cannot be normalized.
    pub fn rotated(&self, rotation: DQuat) -> Result<Self, PoseError> {
        let rotation = normalize_quaternion(rotation)?;
        Ok(Self {
            rotation: (self.rotation * rotation).normalize(),
            translation: self.translation,
        })
    }

    /// Compare two transforms by their action: `q` and `-q` are the same rotation.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f64) -> bool {
        let same_rotation = self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
            || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff);
        same_rotation
            && self
                .translation
                .abs_diff_eq(other.translation, max_abs_diff)
    }
}

impl std::ops::Mul<RigidTransform> for RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: RigidTransform) -> RigidTransform {
        self.compose(&rhs)
    }
}

impl std::ops::MulAssign<RigidTransform> for RigidTransform {
    #[inline]
    fn mul_assign(&mut self, rhs: RigidTransform) {
        *self = *self * rhs;
    }
}

impl std::ops::Mul<DVec3> for RigidTransform {
    type Output = DVec3;

    fn mul(self, rhs: DVec3) -> Self::Output {
        self.apply(rhs)
    }
}

impl Rotate for RigidTransform {
    /// Rotates a direction, ignoring the translation.
    fn rotate(&self, v: DVec3) -> DVec3 {
        self.rotation * v
    }
}
