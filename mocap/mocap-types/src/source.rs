//! The host seam: anything that can report a world-space pose.

use crate::{ConfidenceScore, RigidPose, TrackingStatus};

/// A supplier of live world-space poses.
///
/// The host scene graph owns sensor and target objects; this crate only
/// needs the ability to read a pose from them each tick. Implement this for
/// whatever wraps a tracked device or a scene-graph node and pass it in;
/// nothing here inherits from or reaches back into the host.
///
/// `status` and `confidence` have defaults suitable for sources that are
/// always live (a fixed reference pose, a replayed recording). Sources
/// backed by hardware should override both.
///
/// # Example
///
/// ```
/// use mocap_types::{PoseSource, RigidPose};
/// use glam::Vec3;
///
/// // A fixed pose is itself a source.
/// let reference = RigidPose::from_translation(Vec3::new(0.0, 1.0, 0.0));
/// assert!(reference.world_pose().position.y > 0.9);
/// ```
pub trait PoseSource {
    /// Returns the current world-space pose.
    fn world_pose(&self) -> RigidPose;

    /// Returns the current tracking status.
    fn status(&self) -> TrackingStatus {
        TrackingStatus::Tracking
    }

    /// Returns the per-axis confidence of the current pose.
    fn confidence(&self) -> ConfidenceScore {
        ConfidenceScore::full()
    }
}

impl PoseSource for RigidPose {
    fn world_pose(&self) -> RigidPose {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    struct FlakySensor {
        pose: RigidPose,
        tracking: bool,
    }

    impl PoseSource for FlakySensor {
        fn world_pose(&self) -> RigidPose {
            self.pose
        }

        fn status(&self) -> TrackingStatus {
            if self.tracking {
                TrackingStatus::Tracking
            } else {
                TrackingStatus::Present
            }
        }

        fn confidence(&self) -> ConfidenceScore {
            if self.tracking {
                ConfidenceScore::full()
            } else {
                ConfidenceScore::none()
            }
        }
    }

    #[test]
    fn fixed_pose_is_always_live() {
        let pose = RigidPose::from_translation(Vec3::Y);
        assert!(pose.status().is_tracking());
        assert!(pose.confidence().trusts_rotation());
    }

    #[test]
    fn custom_source_reports_loss() {
        let sensor = FlakySensor {
            pose: RigidPose::identity(),
            tracking: false,
        };
        assert!(!sensor.status().is_tracking());
        assert!(!sensor.confidence().trusts_position());
    }

    #[test]
    fn trait_is_object_safe() {
        let pose = RigidPose::identity();
        let source: &dyn PoseSource = &pose;
        assert!(source.world_pose().is_finite());
    }
}
