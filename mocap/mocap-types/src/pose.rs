//! World-space rigid placements for sensors and skeletal targets.

use glam::{Mat4, Quat, Vec3};

/// Minimum squared quaternion length accepted as a real rotation.
///
/// Anything below this is degenerate: either an uninitialized value or the
/// result of collapsing a zero-scale matrix.
const MIN_ROTATION_LENGTH_SQUARED: f32 = 1e-8;

/// A world-space rigid placement (position + rotation, no scale).
///
/// Sensors and skeletal targets both report their state as a `RigidPose`.
/// The rotation is expected to be a unit quaternion; use
/// [`RigidPose::normalized`] to enforce this and [`RigidPose::has_valid_rotation`]
/// to detect degenerate inputs before they corrupt downstream math.
///
/// Scale is deliberately absent: transforms through a `RigidPose` ignore any
/// scale the host scene graph applies to the underlying node. Build poses
/// from scaled matrices with [`RigidPose::from_matrix`], which discards the
/// scale component.
///
/// # Example
///
/// ```
/// use mocap_types::RigidPose;
/// use glam::Vec3;
///
/// let pose = RigidPose::from_translation(Vec3::new(0.0, 1.0, 0.0));
/// let world = pose.transform_point(Vec3::new(0.0, 0.2, 0.0));
/// assert!((world - Vec3::new(0.0, 1.2, 0.0)).length() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidPose {
    /// Position in world coordinates (meters).
    pub position: Vec3,

    /// Orientation as a unit quaternion.
    pub rotation: Quat,
}

impl Default for RigidPose {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidPose {
    /// Creates a pose from position and rotation.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Creates the identity pose (at origin, no rotation).
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    /// Creates a pose with only translation.
    #[must_use]
    pub const fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Creates a pose with only rotation.
    #[must_use]
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
        }
    }

    /// Creates a pose from a 4x4 matrix, discarding any scale component.
    ///
    /// This is the supported way to lift a scene-graph node's matrix into a
    /// `RigidPose`: a non-uniform scale on the node must not leak into
    /// offset math.
    ///
    /// # Example
    ///
    /// ```
    /// use mocap_types::RigidPose;
    /// use glam::{Mat4, Quat, Vec3};
    ///
    /// let scaled = Mat4::from_scale_rotation_translation(
    ///     Vec3::splat(3.0),
    ///     Quat::IDENTITY,
    ///     Vec3::new(1.0, 2.0, 3.0),
    /// );
    /// let pose = RigidPose::from_matrix(scaled);
    /// assert!((pose.position - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    /// ```
    #[must_use]
    pub fn from_matrix(mat: Mat4) -> Self {
        let (_, rotation, translation) = mat.to_scale_rotation_translation();
        Self {
            position: translation,
            rotation,
        }
    }

    /// Returns true if the rotation is finite and not near-zero length.
    ///
    /// A degenerate rotation cannot be normalized and must be rejected by
    /// calibration rather than silently producing a broken offset.
    #[must_use]
    pub fn has_valid_rotation(&self) -> bool {
        self.rotation.is_finite()
            && self.rotation.length_squared() > MIN_ROTATION_LENGTH_SQUARED
    }

    /// Returns this pose with a unit-length rotation.
    ///
    /// Returns `None` when the rotation is degenerate.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        if !self.has_valid_rotation() {
            return None;
        }
        Some(Self {
            position: self.position,
            rotation: self.rotation.normalize(),
        })
    }

    /// Transforms a point from this pose's local frame to world coordinates.
    ///
    /// Rigid transform only (`rotation * p + position`); no scale is applied.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }

    /// Transforms a point from world coordinates into this pose's local frame.
    ///
    /// Exact inverse of [`RigidPose::transform_point`].
    #[must_use]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position)
    }

    /// Returns the inverse pose.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: inv_rotation * (-self.position),
            rotation: inv_rotation,
        }
    }

    /// Composes this pose with another (self * other).
    ///
    /// The result places `other` within this pose's frame.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: self.rotation * other.rotation,
        }
    }

    /// Interpolates between two poses.
    ///
    /// Uses spherical linear interpolation (slerp) for rotation. Hosts may
    /// use this to smooth pose updates; the retargeting path itself never
    /// blends.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t),
        }
    }

    /// Returns true if position and rotation contain no `NaN`/`Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }

    /// Compares two poses within a tolerance.
    ///
    /// Rotations are compared up to quaternion sign (q and -q describe the
    /// same orientation).
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let rotation = if self.rotation.dot(other.rotation) < 0.0 {
            -other.rotation
        } else {
            other.rotation
        };
        self.position.abs_diff_eq(other.position, epsilon)
            && self.rotation.abs_diff_eq(rotation, epsilon)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn pose_identity() {
        let pose = RigidPose::identity();
        let point = Vec3::new(1.0, 2.0, 3.0);
        let result = pose.transform_point(point);
        assert!((result - point).length() < 1e-6);
    }

    #[test]
    fn pose_default_is_identity() {
        let pose = RigidPose::default();
        assert!(pose.approx_eq(&RigidPose::identity(), 1e-6));
    }

    #[test]
    fn transform_point_translation() {
        let pose = RigidPose::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let result = pose.transform_point(Vec3::new(1.0, 2.0, 3.0));
        assert!((result - Vec3::new(11.0, 22.0, 33.0)).length() < 1e-6);
    }

    #[test]
    fn transform_point_rotation() {
        // 90 degrees about Y maps +X to -Z
        let pose = RigidPose::from_rotation(Quat::from_rotation_y(PI / 2.0));
        let result = pose.transform_point(Vec3::X);
        assert!((result - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn inverse_transform_round_trip() {
        let pose = RigidPose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_euler(glam::EulerRot::YXZ, 0.3, 0.2, 0.1),
        );
        let point = Vec3::new(-4.0, 5.0, 0.5);
        let back = pose.inverse_transform_point(pose.transform_point(point));
        assert!((back - point).length() < 1e-5);
    }

    #[test]
    fn inverse_composes_to_identity() {
        let pose = RigidPose::new(
            Vec3::new(10.0, 20.0, 30.0),
            Quat::from_rotation_y(PI / 4.0),
        );
        let composed = pose.compose(&pose.inverse());
        assert!(composed.approx_eq(&RigidPose::identity(), 1e-5));
    }

    #[test]
    fn from_matrix_discards_scale() {
        let rotation = Quat::from_rotation_z(0.5);
        let translation = Vec3::new(1.0, 2.0, 3.0);
        let unscaled = Mat4::from_scale_rotation_translation(Vec3::ONE, rotation, translation);
        let scaled =
            Mat4::from_scale_rotation_translation(Vec3::new(2.0, 0.5, 7.0), rotation, translation);

        let a = RigidPose::from_matrix(unscaled);
        let b = RigidPose::from_matrix(scaled);

        let point = Vec3::new(0.3, -0.7, 1.1);
        assert!((a.transform_point(point) - b.transform_point(point)).length() < 1e-5);
        assert!(
            (a.inverse_transform_point(point) - b.inverse_transform_point(point)).length() < 1e-5
        );
    }

    #[test]
    fn degenerate_rotation_detected() {
        let zero = RigidPose::new(Vec3::ZERO, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert!(!zero.has_valid_rotation());
        assert!(zero.normalized().is_none());

        let nan = RigidPose::new(Vec3::ZERO, Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0));
        assert!(!nan.has_valid_rotation());
        assert!(nan.normalized().is_none());
    }

    #[test]
    fn normalized_produces_unit_rotation() {
        let pose = RigidPose::new(Vec3::ZERO, Quat::from_xyzw(0.0, 2.0, 0.0, 0.0));
        let normalized = pose.normalized().unwrap();
        assert!((normalized.rotation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn approx_eq_handles_quaternion_sign() {
        let rotation = Quat::from_rotation_y(0.7);
        let a = RigidPose::from_rotation(rotation);
        let b = RigidPose::from_rotation(-rotation);
        assert!(a.approx_eq(&b, 1e-6));
    }

    #[test]
    fn lerp_midpoint() {
        let a = RigidPose::from_translation(Vec3::ZERO);
        let b = RigidPose::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let mid = a.lerp(&b, 0.5);
        assert!((mid.position.x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn is_finite_rejects_nan() {
        let pose = RigidPose::new(Vec3::new(f32::NAN, 0.0, 0.0), Quat::IDENTITY);
        assert!(!pose.is_finite());
    }
}
