//! Calibration: deriving the sensor-to-target offset from a reference pose.

use mocap_types::RigidPose;

use crate::error::{RetargetError, Result};
use crate::offset::SensorTargetOffset;

/// Derives the fixed offset between a sensor and its target.
///
/// Both poses are sampled in the same instant (the user's "set reference
/// pose" action): the returned offset is the rigid transform that, composed
/// with the sensor's live pose by [`propagate`](crate::propagate),
/// reproduces the target's pose. Calibration runs once per calibration
/// event, not per tick.
///
/// The offset rotation is `sensor.rotation⁻¹ * target.rotation`; the offset
/// position is the sensor position expressed in the target's local frame,
/// negated. The negation is load-bearing: propagation adds the offset back
/// from the target's side, and the pair only round-trips with this exact
/// sign convention.
///
/// The caller owns the result; calibration itself stores nothing.
///
/// # Errors
///
/// Returns [`RetargetError::InvalidPose`] if either pose has a degenerate
/// rotation (zero-length or non-finite quaternion). A degenerate input must
/// fail loudly here rather than produce a zero offset that masquerades as a
/// calibration.
///
/// # Example
///
/// ```
/// use mocap_retarget::{calibrate, propagate};
/// use mocap_types::RigidPose;
/// use glam::Vec3;
///
/// let sensor = RigidPose::from_translation(Vec3::new(0.0, 1.0, 0.0));
/// let target = RigidPose::from_translation(Vec3::new(0.0, 1.2, 0.0));
///
/// let offset = calibrate(&sensor, &target).unwrap();
/// let driven = propagate(&sensor, &offset);
/// assert!(driven.approx_eq(&target, 1e-5));
/// ```
pub fn calibrate(sensor: &RigidPose, target: &RigidPose) -> Result<SensorTargetOffset> {
    let sensor = sensor
        .normalized()
        .ok_or_else(|| RetargetError::invalid_pose("sensor pose"))?;
    let target = target
        .normalized()
        .ok_or_else(|| RetargetError::invalid_pose("target pose"))?;

    let rotation = sensor.rotation.inverse() * target.rotation;
    let position = -target.inverse_transform_point(sensor.position);

    Ok(SensorTargetOffset::new(rotation, position))
}
