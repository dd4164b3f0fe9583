//! A named registry of sensor-target pairs.

use mocap_types::{ConfidenceScore, PoseSource, RigidPose, TrackingStatus};
use tracing::{debug, warn};

use crate::error::{RetargetError, Result};
use crate::pair::SensorTargetPair;
use crate::propagate::apply_with_confidence;

/// One target in a rig: its pair, last driven pose, and last known trust.
///
/// The entry owns the target's pose as plain data. The host mirrors it onto
/// the scene graph after each update; nothing here holds scene references.
#[derive(Debug, Clone)]
pub struct RigEntry {
    pair: SensorTargetPair,
    target: RigidPose,
    confidence: ConfidenceScore,
    status: TrackingStatus,
    warned_uncalibrated: bool,
}

impl RigEntry {
    fn new(target: RigidPose) -> Self {
        Self {
            pair: SensorTargetPair::new(),
            target,
            confidence: ConfidenceScore::none(),
            status: TrackingStatus::Unavailable,
            warned_uncalibrated: false,
        }
    }

    /// The sensor-target pair.
    #[must_use]
    pub const fn pair(&self) -> &SensorTargetPair {
        &self.pair
    }

    /// Mutable access to the pair (enable/disable, reset).
    pub fn pair_mut(&mut self) -> &mut SensorTargetPair {
        &mut self.pair
    }

    /// The target's last driven pose.
    #[must_use]
    pub const fn target(&self) -> &RigidPose {
        &self.target
    }

    /// Overwrites the target pose (e.g. when the host repositions the bone).
    pub fn set_target(&mut self, target: RigidPose) {
        self.target = target;
    }

    /// Confidence recorded by the most recent update.
    #[must_use]
    pub const fn confidence(&self) -> ConfidenceScore {
        self.confidence
    }

    /// Status recorded by the most recent update.
    #[must_use]
    pub const fn status(&self) -> TrackingStatus {
        self.status
    }

    /// Calibrates this entry's pair against its current target pose.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::InvalidPose`] on a degenerate rotation.
    pub fn calibrate(&mut self, sensor: &RigidPose) -> Result<()> {
        self.pair.calibrate(sensor, &self.target)?;
        self.warned_uncalibrated = false;
        Ok(())
    }

    /// Runs one tick for this entry.
    ///
    /// Records `status` and `confidence` either way, then:
    /// - skips (`Ok(None)`, target untouched) when the pair is disabled,
    ///   the sensor is not tracking, or the combined confidence is zero;
    /// - otherwise propagates, applies the confidence gate, stores and
    ///   returns the new target pose.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::NotCalibrated`] when propagation is due but
    /// no calibration has succeeded. Logged at `warn` once per entry until
    /// the next successful calibration re-arms the warning; the host may
    /// skip the tick but should fix the ordering.
    pub fn update(
        &mut self,
        sensor: &RigidPose,
        status: TrackingStatus,
        confidence: ConfidenceScore,
    ) -> Result<Option<RigidPose>> {
        self.status = status;
        self.confidence = confidence;

        if !self.pair.is_enabled() {
            debug!("pair disabled, skipping update");
            return Ok(None);
        }
        if !status.is_tracking() {
            debug!(%status, "sensor not tracking, target frozen");
            return Ok(None);
        }
        if confidence.combined() <= 0.0 {
            debug!("zero confidence, target frozen");
            return Ok(None);
        }

        match self.pair.propagate(sensor) {
            Ok(computed) => {
                self.target = apply_with_confidence(&self.target, &computed, confidence);
                Ok(Some(self.target))
            }
            Err(err) => {
                if !self.warned_uncalibrated {
                    warn!("update before calibration, skipping propagation");
                    self.warned_uncalibrated = true;
                }
                Err(err)
            }
        }
    }
}

/// An ordered, name-keyed collection of sensor-target pairs.
///
/// The pure-data analog of a tracker driving several skeletal targets
/// (head, hands, hip, feet). Entries keep their insertion order; names are
/// expected to be unique, lookups find the first match.
///
/// # Example
///
/// ```
/// use mocap_retarget::RetargetRig;
/// use mocap_types::{ConfidenceScore, RigidPose, TrackingStatus};
/// use glam::Vec3;
///
/// let mut rig = RetargetRig::new();
/// rig.push("head", RigidPose::from_translation(Vec3::new(0.0, 1.7, 0.0)));
///
/// let headset = RigidPose::from_translation(Vec3::new(0.0, 1.6, 0.0));
/// rig.calibrate("head", &headset).unwrap();
///
/// let moved = RigidPose::from_translation(Vec3::new(0.0, 1.6, 0.5));
/// let pose = rig
///     .update("head", &moved, TrackingStatus::Tracking, ConfidenceScore::full())
///     .unwrap();
/// assert!(pose.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RetargetRig {
    entries: Vec<(String, RigEntry)>,
}

impl RetargetRig {
    /// Creates an empty rig.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the rig has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a named target at its initial pose.
    pub fn push(&mut self, name: impl Into<String>, target: RigidPose) {
        self.entries.push((name.into(), RigEntry::new(target)));
    }

    /// Gets an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RigEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    /// Gets a mutable entry by name.
    #[must_use]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut RigEntry> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    /// Removes an entry by name.
    pub fn remove(&mut self, name: &str) -> Option<RigEntry> {
        if let Some(idx) = self.entries.iter().position(|(n, _)| n == name) {
            Some(self.entries.remove(idx).1)
        } else {
            None
        }
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RigEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Returns the names of all entries.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// The named target's last driven pose.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&RigidPose> {
        self.get(name).map(RigEntry::target)
    }

    /// Calibrates the named entry against its current target pose.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::EntryNotFound`] for an unknown name, or
    /// [`RetargetError::InvalidPose`] on a degenerate rotation.
    pub fn calibrate(&mut self, name: &str, sensor: &RigidPose) -> Result<()> {
        let entry = self
            .get_mut(name)
            .ok_or_else(|| RetargetError::entry_not_found(name))?;
        entry.calibrate(sensor)
    }

    /// Runs one tick for the named entry. See [`RigEntry::update`].
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::EntryNotFound`] for an unknown name, or
    /// [`RetargetError::NotCalibrated`] when propagation is due but the
    /// entry was never calibrated.
    pub fn update(
        &mut self,
        name: &str,
        sensor: &RigidPose,
        status: TrackingStatus,
        confidence: ConfidenceScore,
    ) -> Result<Option<RigidPose>> {
        let entry = self
            .get_mut(name)
            .ok_or_else(|| RetargetError::entry_not_found(name))?;
        entry.update(sensor, status, confidence)
    }

    /// Runs one tick for the named entry, reading pose, status, and
    /// confidence from a live source.
    ///
    /// # Errors
    ///
    /// Same as [`RetargetRig::update`].
    pub fn update_from(
        &mut self,
        name: &str,
        source: &impl PoseSource,
    ) -> Result<Option<RigidPose>> {
        self.update(
            name,
            &source.world_pose(),
            source.status(),
            source.confidence(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn head_rig() -> RetargetRig {
        let mut rig = RetargetRig::new();
        rig.push("head", RigidPose::from_translation(Vec3::new(0.0, 1.7, 0.0)));
        rig
    }

    fn headset() -> RigidPose {
        RigidPose::from_translation(Vec3::new(0.0, 1.6, 0.0))
    }

    #[test]
    fn rig_push_get() {
        let rig = head_rig();
        assert_eq!(rig.len(), 1);
        assert!(!rig.is_empty());
        assert!(rig.get("head").is_some());
        assert!(rig.get("left_hand").is_none());
        assert_eq!(rig.names(), vec!["head"]);
    }

    #[test]
    fn rig_remove_and_clear() {
        let mut rig = head_rig();
        assert!(rig.remove("head").is_some());
        assert!(rig.remove("head").is_none());

        rig.push("a", RigidPose::identity());
        rig.push("b", RigidPose::identity());
        assert_eq!(rig.iter().count(), 2);
        rig.clear();
        assert!(rig.is_empty());
    }

    #[test]
    fn unknown_entry_errors() {
        let mut rig = head_rig();
        let err = rig.calibrate("tail", &headset()).unwrap_err();
        assert!(matches!(err, RetargetError::EntryNotFound(_)));
    }

    #[test]
    fn calibrated_entry_follows_sensor() {
        let mut rig = head_rig();
        rig.calibrate("head", &headset()).unwrap();

        let moved = RigidPose::from_translation(Vec3::new(0.5, 1.6, 0.0));
        let pose = rig
            .update("head", &moved, TrackingStatus::Tracking, ConfidenceScore::full())
            .unwrap()
            .unwrap();

        // The head bone keeps its 0.1m calibrated height offset.
        assert!((pose.position - Vec3::new(0.5, 1.7, 0.0)).length() < 1e-5);
        assert!(rig.target("head").unwrap().approx_eq(&pose, 1e-6));
    }

    #[test]
    fn update_before_calibration_errors_and_records_state() {
        let mut rig = head_rig();
        let result = rig.update(
            "head",
            &headset(),
            TrackingStatus::Tracking,
            ConfidenceScore::full(),
        );
        assert!(matches!(result, Err(RetargetError::NotCalibrated)));

        // Status and confidence are recorded even on the failed tick.
        let entry = rig.get("head").unwrap();
        assert_eq!(entry.status(), TrackingStatus::Tracking);
        assert!(entry.confidence().trusts_rotation());
    }

    #[test]
    fn non_tracking_sensor_freezes_target() {
        let mut rig = head_rig();
        rig.calibrate("head", &headset()).unwrap();
        let before = *rig.target("head").unwrap();

        let moved = RigidPose::from_translation(Vec3::new(9.0, 9.0, 9.0));
        let result = rig
            .update("head", &moved, TrackingStatus::Present, ConfidenceScore::full())
            .unwrap();

        assert!(result.is_none());
        assert_eq!(*rig.target("head").unwrap(), before);
    }

    #[test]
    fn zero_confidence_freezes_target() {
        let mut rig = head_rig();
        rig.calibrate("head", &headset()).unwrap();
        let before = *rig.target("head").unwrap();

        let moved = RigidPose::from_translation(Vec3::new(9.0, 9.0, 9.0));
        let result = rig
            .update("head", &moved, TrackingStatus::Tracking, ConfidenceScore::none())
            .unwrap();

        assert!(result.is_none());
        assert_eq!(*rig.target("head").unwrap(), before);
        assert!(!rig.get("head").unwrap().confidence().trusts_position());
    }

    #[test]
    fn disabled_entry_skips_update() {
        let mut rig = head_rig();
        rig.calibrate("head", &headset()).unwrap();
        rig.get_mut("head").unwrap().pair_mut().set_enabled(false);

        let moved = RigidPose::from_translation(Vec3::new(9.0, 9.0, 9.0));
        let result = rig
            .update("head", &moved, TrackingStatus::Tracking, ConfidenceScore::full())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn partial_confidence_freezes_only_lost_axis() {
        let mut rig = head_rig();
        rig.calibrate("head", &headset()).unwrap();
        let before = *rig.target("head").unwrap();

        let moved = RigidPose::from_translation(Vec3::new(0.5, 1.6, 0.0));
        let pose = rig
            .update("head", &moved, TrackingStatus::Tracking, ConfidenceScore::new(1.0, 0.0))
            .unwrap()
            .unwrap();

        assert_eq!(pose.position, before.position);
    }

    #[test]
    fn update_from_reads_the_source() {
        struct Controller {
            pose: RigidPose,
            occluded: bool,
        }

        impl PoseSource for Controller {
            fn world_pose(&self) -> RigidPose {
                self.pose
            }

            fn status(&self) -> TrackingStatus {
                if self.occluded {
                    TrackingStatus::Present
                } else {
                    TrackingStatus::Tracking
                }
            }

            fn confidence(&self) -> ConfidenceScore {
                if self.occluded {
                    ConfidenceScore::none()
                } else {
                    ConfidenceScore::full()
                }
            }
        }

        let mut rig = head_rig();
        rig.calibrate("head", &headset()).unwrap();

        let mut controller = Controller {
            pose: RigidPose::from_translation(Vec3::new(0.5, 1.6, 0.0)),
            occluded: false,
        };
        let pose = rig.update_from("head", &controller).unwrap();
        assert!(pose.is_some());

        controller.occluded = true;
        controller.pose = RigidPose::from_translation(Vec3::new(9.0, 9.0, 9.0));
        let held = rig.update_from("head", &controller).unwrap();
        assert!(held.is_none());
    }

    #[test]
    fn set_target_repositions_bone() {
        let mut rig = head_rig();
        let new_pose = RigidPose::from_translation(Vec3::new(1.0, 1.7, 0.0));
        rig.get_mut("head").unwrap().set_target(new_pose);
        assert_eq!(*rig.target("head").unwrap(), new_pose);
    }
}
