//! Player presence: what a client publishes about itself, how often, and when a published
//! row is old enough to be evicted.
//!
//! The server stamps every write with its own clock, so staleness is always judged on a
//! single timeline regardless of client clock skew.

use crate::{
    constants::{
        POSE_ROTATION_EPS_RAD, POSE_TRANSLATION_EPS_M, PRESENCE_HEARTBEAT_INTERVAL,
        PRESENCE_PUBLISH_INTERVAL,
    },
    error::PresenceError,
};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use std::time::Duration;

/// Anything farther than this from the origin is rejected (meters).
pub const MAX_WORLD_EXTENT_M: f32 = 100_000.0;

/// A validated player transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPose {
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl PlayerPose {
    pub fn new(translation: Vector3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Whether `other` differs enough from `self` to be worth publishing.
    pub fn differs_from(&self, other: &PlayerPose) -> bool {
        (self.translation - other.translation).norm() > POSE_TRANSLATION_EPS_M
            || self.rotation.angle_to(&other.rotation) > POSE_ROTATION_EPS_RAD
    }
}

/// Check a raw transform received from a client and normalize its rotation.
pub fn validate_pose(
    translation: Vector3<f32>,
    rotation: Quaternion<f32>,
) -> Result<PlayerPose, PresenceError> {
    if !translation.iter().all(|v| v.is_finite()) {
        return Err(PresenceError::NonFiniteTranslation);
    }
    let distance = translation.norm();
    if distance > MAX_WORLD_EXTENT_M {
        return Err(PresenceError::OutOfBounds(distance));
    }

    if !rotation.coords.iter().all(|v| v.is_finite()) {
        return Err(PresenceError::NonFiniteRotation);
    }
    let rotation = UnitQuaternion::try_new(rotation, f32::EPSILON)
        .ok_or(PresenceError::DegenerateRotation)?;

    Ok(PlayerPose::new(translation, rotation))
}

/// Whether a row last written at `last_updated_us` is stale at `now_us`.
///
/// Both stamps are microseconds on the same clock. The row is stale once strictly more
/// than `threshold` has passed; rows stamped in the future are never stale.
pub fn is_stale(now_us: i64, last_updated_us: i64, threshold: Duration) -> bool {
    let threshold_us = i64::try_from(threshold.as_micros()).unwrap_or(i64::MAX);
    now_us.saturating_sub(last_updated_us) > threshold_us
}

/// Rate limiter for transform writes.
///
/// Writes are spaced at least `min_interval` apart. Between those, a write only goes out
/// when the pose changed or when `heartbeat` has passed, so an idle player keeps its row
/// fresh without flooding the database.
#[derive(Clone, Debug)]
pub struct PublishGate {
    min_interval: Duration,
    heartbeat: Duration,
    last: Option<(Duration, PlayerPose)>,
}

impl Default for PublishGate {
    fn default() -> Self {
        Self::new(PRESENCE_PUBLISH_INTERVAL, PRESENCE_HEARTBEAT_INTERVAL)
    }
}

impl PublishGate {
    pub fn new(min_interval: Duration, heartbeat: Duration) -> Self {
        Self {
            min_interval,
            heartbeat: heartbeat.max(min_interval),
            last: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn heartbeat(&self) -> Duration {
        self.heartbeat
    }

    /// Adopt new timing (e.g. from server settings), keeping the last publish record.
    pub fn set_intervals(&mut self, min_interval: Duration, heartbeat: Duration) {
        self.min_interval = min_interval;
        self.heartbeat = heartbeat.max(min_interval);
    }

    /// Forget the last publish so the next pose goes out immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn should_publish(&self, now: Duration, pose: &PlayerPose) -> bool {
        let Some((at, last_pose)) = &self.last else {
            return true;
        };

        let since = now.saturating_sub(*at);
        if since < self.min_interval {
            return false;
        }

        since >= self.heartbeat || pose.differs_from(last_pose)
    }

    pub fn mark_published(&mut self, now: Duration, pose: PlayerPose) {
        self.last = Some((now, pose));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn pose_at(x: f32) -> PlayerPose {
        PlayerPose::new(Vector3::new(x, 1.0, 0.0), UnitQuaternion::identity())
    }

    #[test]
    fn validate_accepts_and_normalizes() {
        let pose = validate_pose(Vector3::new(1.0, 2.0, 3.0), Quaternion::new(2.0, 0.0, 0.0, 0.0))
            .expect("valid pose");
        assert_eq!(pose.translation, Vector3::new(1.0, 2.0, 3.0));
        assert!((pose.rotation.quaternion().norm() - 1.0).abs() < 1.0e-6);
        assert!(pose.rotation.angle() < 1.0e-6);
    }

    #[test]
    fn validate_rejects_bad_input() {
        let q = Quaternion::identity();
        assert_eq!(
            validate_pose(Vector3::new(f32::NAN, 0.0, 0.0), q),
            Err(PresenceError::NonFiniteTranslation)
        );
        assert!(matches!(
            validate_pose(Vector3::new(0.0, 0.0, 2.0 * MAX_WORLD_EXTENT_M), q),
            Err(PresenceError::OutOfBounds(_))
        ));
        assert_eq!(
            validate_pose(Vector3::zeros(), Quaternion::new(f32::INFINITY, 0.0, 0.0, 0.0)),
            Err(PresenceError::NonFiniteRotation)
        );
        assert_eq!(
            validate_pose(Vector3::zeros(), Quaternion::new(0.0, 0.0, 0.0, 0.0)),
            Err(PresenceError::DegenerateRotation)
        );
    }

    #[test]
    fn staleness_is_strictly_after_the_threshold() {
        let ten_s = Duration::from_secs(10);
        let last = 1_000_000;

        assert!(!is_stale(last + 10_000_000, last, ten_s));
        assert!(is_stale(last + 10_000_001, last, ten_s));
        assert!(!is_stale(last, last, ten_s));
    }

    #[test]
    fn rows_from_the_future_are_not_stale() {
        assert!(!is_stale(0, 5_000_000, Duration::from_secs(1)));
        assert!(!is_stale(i64::MIN, i64::MAX, Duration::ZERO));
    }

    #[test]
    fn first_pose_is_always_published() {
        let gate = PublishGate::new(ms(50), ms(2000));
        assert!(gate.should_publish(ms(0), &pose_at(0.0)));
    }

    #[test]
    fn writes_are_spaced_by_the_minimum_interval() {
        let mut gate = PublishGate::new(ms(50), ms(2000));
        gate.mark_published(ms(100), pose_at(0.0));

        assert!(!gate.should_publish(ms(120), &pose_at(5.0)));
        assert!(gate.should_publish(ms(150), &pose_at(5.0)));
    }

    #[test]
    fn idle_pose_only_heartbeats() {
        let mut gate = PublishGate::new(ms(50), ms(2000));
        gate.mark_published(ms(0), pose_at(0.0));

        assert!(!gate.should_publish(ms(500), &pose_at(0.0)));
        assert!(!gate.should_publish(ms(1999), &pose_at(0.0)));
        assert!(gate.should_publish(ms(2000), &pose_at(0.0)));
    }

    #[test]
    fn rotation_change_counts_as_movement() {
        let mut gate = PublishGate::new(ms(50), ms(2000));
        gate.mark_published(ms(0), pose_at(0.0));

        let turned = PlayerPose::new(
            pose_at(0.0).translation,
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.5),
        );
        assert!(gate.should_publish(ms(60), &turned));
    }

    #[test]
    fn reset_and_retiming() {
        let mut gate = PublishGate::new(ms(50), ms(2000));
        gate.mark_published(ms(0), pose_at(0.0));
        gate.reset();
        assert!(gate.should_publish(ms(1), &pose_at(0.0)));

        // Heartbeat can never be shorter than the minimum spacing.
        gate.set_intervals(ms(300), ms(100));
        assert_eq!(gate.heartbeat(), ms(300));
        assert_eq!(gate.min_interval(), ms(300));
    }
}
