//! Propagation: driving a target from a live sensor pose.

use mocap_types::{ConfidenceScore, RigidPose};

use crate::offset::SensorTargetOffset;

/// Computes the target's world pose from the live sensor pose.
///
/// The exact inverse composition of [`calibrate`](crate::calibrate):
/// propagating with the same sensor pose used for calibration reproduces
/// the target pose captured then; as the sensor moves, the target follows
/// rigidly.
///
/// Pure function, no shared state, bounded time; safe to call every tick.
///
/// # Example
///
/// ```
/// use mocap_retarget::{propagate, SensorTargetOffset};
/// use mocap_types::RigidPose;
/// use glam::Vec3;
///
/// let offset = SensorTargetOffset::new(glam::Quat::IDENTITY, Vec3::new(0.0, 0.2, 0.0));
/// let sensor = RigidPose::from_translation(Vec3::new(0.0, 1.0, 0.0));
///
/// let target = propagate(&sensor, &offset);
/// assert!((target.position - Vec3::new(0.0, 1.2, 0.0)).length() < 1e-6);
/// ```
#[must_use]
pub fn propagate(sensor: &RigidPose, offset: &SensorTargetOffset) -> RigidPose {
    let rotation = sensor.rotation * offset.rotation;
    let position = sensor.position + rotation * offset.position;
    RigidPose::new(position, rotation)
}

/// Applies a computed pose to a target, gated by confidence.
///
/// Gating is binary and per-axis: an axis with confidence zero stays frozen
/// at the target's last known value, an axis with any positive confidence
/// takes the computed value exactly. There is no interpolation on this
/// path; a sensor that momentarily loses tracking freezes its target
/// instead of dragging it toward an undefined pose.
///
/// # Example
///
/// ```
/// use mocap_retarget::apply_with_confidence;
/// use mocap_types::{ConfidenceScore, RigidPose};
/// use glam::Vec3;
///
/// let last_known = RigidPose::from_translation(Vec3::new(0.0, 1.2, 0.0));
/// let computed = RigidPose::from_translation(Vec3::new(5.0, 5.0, 5.0));
///
/// // Position tracking lost: the target holds its position.
/// let held = apply_with_confidence(&last_known, &computed, ConfidenceScore::new(1.0, 0.0));
/// assert_eq!(held.position, last_known.position);
/// ```
#[must_use]
pub fn apply_with_confidence(
    target: &RigidPose,
    computed: &RigidPose,
    confidence: ConfidenceScore,
) -> RigidPose {
    let rotation = if confidence.trusts_rotation() {
        computed.rotation
    } else {
        target.rotation
    };
    let position = if confidence.trusts_position() {
        computed.position
    } else {
        target.position
    };
    RigidPose::new(position, rotation)
}

/// Places the sensor from a known target pose.
///
/// The inverse of [`propagate`]: given where the target is and the
/// calibrated offset, returns where the sensor must be. Used to position a
/// sensor's scene representation immediately after seeding an offset, before
/// any live data has arrived.
#[must_use]
pub fn sensor_pose_from_target(target: &RigidPose, offset: &SensorTargetOffset) -> RigidPose {
    let position = target.transform_point(-offset.position);
    let rotation = target.rotation * offset.rotation.inverse();
    RigidPose::new(position, rotation)
}
