//! The calibrated sensor-to-target offset.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The fixed rigid offset between a sensor's frame and its target's frame.
///
/// Produced by [`calibrate`](crate::calibrate) and consumed by
/// [`propagate`](crate::propagate) every tick. Owned exclusively by one
/// sensor-target pair; immutable between calibrations and recomputed
/// wholesale on re-calibration, never partially mutated.
///
/// # Stored Convention
///
/// The stored fields follow the propagation formula
/// `target = sensor.position + (sensor.rotation * rotation) * position`:
/// `rotation` maps the sensor's frame onto the target's, and `position` is
/// the *negated* sensor position expressed in the target's local frame.
/// [`SensorTargetOffset::from_target_frame`] converts a designer-supplied
/// target-frame offset into this convention. Do not simplify the signs; the
/// round-trip property (propagate after calibrate reproduces the target
/// pose) depends on them.
///
/// # Serialization
///
/// Serializes both components exactly, field by field, so the host can
/// persist offsets in any format without losing calibration precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorTargetOffset {
    /// Rotation from the sensor's frame to the target's frame.
    #[serde(with = "quat_serde")]
    pub rotation: Quat,

    /// Negated sensor position in the target's local frame.
    #[serde(with = "vec3_serde")]
    pub position: Vec3,
}

mod quat_serde {
    use glam::Quat;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct QuatData {
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    }

    pub fn serialize<S: Serializer>(q: &Quat, s: S) -> std::result::Result<S::Ok, S::Error> {
        QuatData {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Quat, D::Error> {
        let data = QuatData::deserialize(d)?;
        Ok(Quat::from_xyzw(data.x, data.y, data.z, data.w))
    }
}

mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Vec3Data {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec3, s: S) -> std::result::Result<S::Ok, S::Error> {
        Vec3Data {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec3, D::Error> {
        let data = Vec3Data::deserialize(d)?;
        Ok(Vec3::new(data.x, data.y, data.z))
    }
}

impl SensorTargetOffset {
    /// Creates an offset from raw stored-convention components.
    #[must_use]
    pub const fn new(rotation: Quat, position: Vec3) -> Self {
        Self { rotation, position }
    }

    /// The zero offset: sensor and target frames coincide.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
        }
    }

    /// Builds an offset from a sensor placement expressed in the target's frame.
    ///
    /// `position` is where the sensor sits relative to the target and
    /// `rotation` how it is oriented relative to the target. This applies
    /// the stored negate/invert convention, so a pair seeded with this
    /// offset places the sensor exactly there when the target is known.
    ///
    /// # Example
    ///
    /// ```
    /// use mocap_retarget::SensorTargetOffset;
    /// use glam::{Quat, Vec3};
    ///
    /// // A head tracker mounted 10cm above the head bone.
    /// let offset = SensorTargetOffset::from_target_frame(
    ///     Vec3::new(0.0, 0.1, 0.0),
    ///     Quat::IDENTITY,
    /// );
    /// assert!((offset.position - Vec3::new(0.0, -0.1, 0.0)).length() < 1e-6);
    /// ```
    #[must_use]
    pub fn from_target_frame(position: Vec3, rotation: Quat) -> Self {
        Self {
            rotation: rotation.inverse(),
            position: -position,
        }
    }

    /// Returns true if this is approximately the zero offset.
    #[must_use]
    pub fn is_identity(&self, epsilon: f32) -> bool {
        let rot_diff = (self.rotation - Quat::IDENTITY).length();
        rot_diff < epsilon && self.position.length() < epsilon
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn identity_offset() {
        let offset = SensorTargetOffset::identity();
        assert!(offset.is_identity(1e-6));
    }

    #[test]
    fn from_target_frame_applies_convention() {
        let rotation = Quat::from_rotation_y(0.5);
        let offset = SensorTargetOffset::from_target_frame(Vec3::new(1.0, 2.0, 3.0), rotation);

        assert!((offset.position - Vec3::new(-1.0, -2.0, -3.0)).length() < 1e-6);
        assert!((offset.rotation * rotation - Quat::IDENTITY).length() < 1e-6);
    }

    #[test]
    fn non_identity_detected() {
        let offset = SensorTargetOffset::new(Quat::IDENTITY, Vec3::new(0.0, 0.2, 0.0));
        assert!(!offset.is_identity(1e-6));
    }

    #[test]
    fn offset_serialization_round_trip() {
        let offset = SensorTargetOffset::new(
            Quat::from_rotation_z(0.5).normalize(),
            Vec3::new(0.125, -0.25, 0.5),
        );

        let json = serde_json::to_string(&offset).unwrap();
        let parsed: SensorTargetOffset = serde_json::from_str(&json).unwrap();

        // Exact component preservation, not approximate.
        assert_eq!(offset, parsed);
    }
}
