use thiserror::Error;

/// Coarse classification of a [`PoseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A precondition on the mathematical validity of an argument is violated.
    InvalidInput,
    /// The input is valid but too close to a singular case to give a trustworthy result.
    DegenerateInput,
}

/// Error types for the pose module.
#[derive(Debug, Error, PartialEq)]
pub enum PoseError {
    /// The rotation axis cannot be normalized.
    #[error("Rotation axis has near-zero norm ({norm:e})")]
    ZeroLengthAxis {
        /// Norm of the rejected axis.
        norm: f64,
    },

    /// A direction vector cannot be normalized.
    #[error("Direction vector has near-zero norm ({norm:e})")]
    ZeroLengthVector {
        /// Norm of the rejected vector.
        norm: f64,
    },

    /// An argument contains NaN or infinite components.
    #[error("Input {0} contains non-finite values")]
    NonFinite(&'static str),

    /// The interpolation query time lies outside the pose interval.
    #[error("Query time {t} is outside the interval [{start}, {end}]")]
    TimeOutOfRange {
        /// Query time.
        t: f64,
        /// Timestamp of the start pose.
        start: f64,
        /// Timestamp of the end pose.
        end: f64,
    },

    /// The interval start comes after its end.
    #[error("Timestamps are not ordered: {start} > {end}")]
    UnorderedTimestamps {
        /// Timestamp of the earlier pose.
        start: f64,
        /// Timestamp of the later pose.
        end: f64,
    },

    /// A trajectory needs at least one pose.
    #[error("Trajectory contains no poses")]
    EmptyTrajectory,

    /// The quaternion norm is too small to represent a rotation.
    #[error("Quaternion norm {norm:e} is too small to represent a rotation")]
    DegenerateQuaternion {
        /// Norm of the rejected quaternion.
        norm: f64,
    },

    /// R·Rᵀ has no Cholesky factor, the matrix is rank deficient.
    #[error("R * R^T is not positive definite")]
    NotPositiveDefinite,
}

impl PoseError {
    /// Returns whether the error is an invalid argument or a degenerate one.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PoseError::ZeroLengthAxis { .. }
            | PoseError::ZeroLengthVector { .. }
            | PoseError::NonFinite(_)
            | PoseError::TimeOutOfRange { .. }
            | PoseError::UnorderedTimestamps { .. }
            | PoseError::EmptyTrajectory => ErrorKind::InvalidInput,
            PoseError::DegenerateQuaternion { .. } | PoseError::NotPositiveDefinite => {
                ErrorKind::DegenerateInput
            }
        }
    }
}
