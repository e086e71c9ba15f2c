use serde::{Deserialize, Serialize};

use crate::error::PoseError;
use crate::rotation::slerp;
use crate::transform::RigidTransform;

/// A rigid transform tagged with the time it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPose {
    /// Time of the observation, in any consistent unit.
    pub timestamp: f64,
    /// The pose at `timestamp`.
    pub pose: RigidTransform,
}

impl TimedPose {
    /// Tag a pose with a timestamp.
    pub fn new(timestamp: f64, pose: RigidTransform) -> Self {
        Self { timestamp, pose }
    }
}

/// What to do with a query time outside the interval spanned by the poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutOfRangePolicy {
    /// Fail with [`PoseError::TimeOutOfRange`].
    #[default]
    Reject,
    /// Move the query time to the nearest end of the interval.
    Clamp,
}

/// Parameters of [`interpolate_with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolationConfig {
    /// Intervals no longer than this are treated as a single instant.
    pub interval_epsilon: f64,
    /// Handling of query times outside the interval.
    pub out_of_range: OutOfRangePolicy,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            interval_epsilon: 1e-9,
            out_of_range: OutOfRangePolicy::Reject,
        }
    }
}

/// Interpolate between two timed poses with the default [`InterpolationConfig`].
///
/// See [`interpolate_with_config`].
pub fn interpolate(
    start: &TimedPose,
    end: &TimedPose,
    t: f64,
) -> Result<RigidTransform, PoseError> {
    interpolate_with_config(start, end, t, &InterpolationConfig::default())
}

/// Pose at time `t` between `start` and `end`.
///
/// The rotation follows the shortest great arc between the two quaternions (SLERP)
/// and the translation moves along a straight line, both at the ratio
/// `(t − t₁) / (t₂ − t₁)`.
///
/// If the interval is shorter than `config.interval_epsilon` the ratio is not
/// computed. The pose closer in time to `t` is returned instead, `end` on a tie.
///
/// # Errors
///
/// * [`PoseError::NonFinite`] if a timestamp or `t` is NaN or infinite.
/// * [`PoseError::UnorderedTimestamps`] if `start` comes after `end`.
/// * [`PoseError::TimeOutOfRange`] if `t` is outside the interval and the policy is
///   [`OutOfRangePolicy::Reject`].
pub fn interpolate_with_config(
    start: &TimedPose,
    end: &TimedPose,
    t: f64,
    config: &InterpolationConfig,
) -> Result<RigidTransform, PoseError> {
    let (t1, t2) = (start.timestamp, end.timestamp);
    if !t1.is_finite() || !t2.is_finite() || !t.is_finite() {
        return Err(PoseError::NonFinite("timestamp"));
    }
    if t1 > t2 {
        return Err(PoseError::UnorderedTimestamps { start: t1, end: t2 });
    }

    let t = if t < t1 || t > t2 {
        match config.out_of_range {
            OutOfRangePolicy::Reject => {
                return Err(PoseError::TimeOutOfRange {
                    t,
                    start: t1,
                    end: t2,
                })
            }
            OutOfRangePolicy::Clamp => t.clamp(t1, t2),
        }
    } else {
        t
    };

    let width = t2 - t1;
    if width <= config.interval_epsilon {
        log::debug!("interval [{t1}, {t2}] is degenerate, returning the nearest pose");
        return Ok(if t - t1 < t2 - t {
            start.pose
        } else {
            end.pose
        });
    }

    let ratio = if width.is_finite() {
        (t - t1) / width
    } else {
        // the interval overflows f64, halve every term
        (0.5 * t - 0.5 * t1) / (0.5 * t2 - 0.5 * t1)
    };
    let (p1, p2) = (&start.pose, &end.pose);

    Ok(RigidTransform::from_unit_parts(
        slerp(p1.rotation(), p2.rotation(), ratio),
        p1.translation().lerp(p2.translation(), ratio),
    ))
}

/// A sequence of timed poses with non-decreasing timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    poses: Vec<TimedPose>,
}

impl Trajectory {
    /// Create a trajectory, checking that the timestamps are finite and ordered.
    ///
    /// # Errors
    ///
    /// [`PoseError::EmptyTrajectory`] if `poses` is empty, [`PoseError::NonFinite`]
    /// for a NaN or infinite timestamp and [`PoseError::UnorderedTimestamps`] for the
    /// first pair of consecutive poses that goes back in time.
    pub fn new(poses: Vec<TimedPose>) -> Result<Self, PoseError> {
        if poses.is_empty() {
            return Err(PoseError::EmptyTrajectory);
        }
        if poses.iter().any(|p| !p.timestamp.is_finite()) {
            return Err(PoseError::NonFinite("timestamp"));
        }
        if let Some(w) = poses.windows(2).find(|w| w[0].timestamp > w[1].timestamp) {
            return Err(PoseError::UnorderedTimestamps {
                start: w[0].timestamp,
                end: w[1].timestamp,
            });
        }
        Ok(Self { poses })
    }

    /// The poses in time order.
    pub fn poses(&self) -> &[TimedPose] {
        &self.poses
    }

    /// Number of poses, at least one.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Always `false`, a trajectory cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Timestamps of the first and last pose.
    pub fn time_range(&self) -> (f64, f64) {
        let first = self.poses.first().map_or(0.0, |p| p.timestamp);
        let last = self.poses.last().map_or(0.0, |p| p.timestamp);
        (first, last)
    }

    /// Pose at time `t` with the default [`InterpolationConfig`].
    pub fn sample(&self, t: f64) -> Result<RigidTransform, PoseError> {
        self.sample_with_config(t, &InterpolationConfig::default())
    }

    /// Pose at time `t`, interpolated between the two poses that bracket it.
    ///
    /// The bracketing pair is found by binary search. With repeated timestamps the
    /// last pose at that time wins.
    pub fn sample_with_config(
        &self,
        t: f64,
        config: &InterpolationConfig,
    ) -> Result<RigidTransform, PoseError> {
        if let [only] = self.poses.as_slice() {
            return interpolate_with_config(only, only, t, config);
        }

        let upper = self.poses.partition_point(|p| p.timestamp <= t);
        let i = upper.clamp(1, self.poses.len() - 1);
        interpolate_with_config(&self.poses[i - 1], &self.poses[i], t, config)
    }
}
