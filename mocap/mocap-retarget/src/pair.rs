//! The sensor-target pair state machine.

use mocap_types::{ConfidenceScore, RigidPose};

use crate::calibrate::calibrate;
use crate::error::{RetargetError, Result};
use crate::offset::SensorTargetOffset;
use crate::propagate::{apply_with_confidence, propagate, sensor_pose_from_target};

/// Calibration state of a sensor-target pair.
///
/// The uncalibrated state is carried structurally instead of encoding it as
/// a magic zero quaternion: there is no sentinel value to compare floats
/// against, and an offset only exists once a calibration has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CalibrationState {
    /// No offset has been computed yet; propagation is not possible.
    #[default]
    Uncalibrated,

    /// A valid offset is held; propagation always succeeds.
    Calibrated(SensorTargetOffset),
}

impl CalibrationState {
    /// Returns the offset, if calibrated.
    #[must_use]
    pub const fn offset(&self) -> Option<&SensorTargetOffset> {
        match self {
            Self::Uncalibrated => None,
            Self::Calibrated(offset) => Some(offset),
        }
    }
}

/// One sensor driving one skeletal target.
///
/// Starts `Uncalibrated`; transitions to `Calibrated` only through a
/// successful [`SensorTargetPair::calibrate`]. Re-calibration replaces the
/// offset wholesale and atomically: a failed attempt leaves the previous
/// state untouched, and no partially-written offset is ever observable.
/// Returning to `Uncalibrated` happens only through the explicit
/// [`SensorTargetPair::reset`], never as a side effect.
///
/// # Example
///
/// ```
/// use mocap_retarget::SensorTargetPair;
/// use mocap_types::RigidPose;
/// use glam::Vec3;
///
/// let sensor = RigidPose::from_translation(Vec3::new(0.0, 1.0, 0.0));
/// let target = RigidPose::from_translation(Vec3::new(0.0, 1.2, 0.0));
///
/// let mut pair = SensorTargetPair::new();
/// assert!(!pair.is_calibrated());
///
/// pair.calibrate(&sensor, &target).unwrap();
/// let driven = pair.propagate(&sensor).unwrap();
/// assert!(driven.approx_eq(&target, 1e-5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorTargetPair {
    state: CalibrationState,
    enabled: bool,
}

impl Default for SensorTargetPair {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorTargetPair {
    /// Creates an enabled, uncalibrated pair.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CalibrationState::Uncalibrated,
            enabled: true,
        }
    }

    /// Creates a pair pre-seeded with an offset.
    ///
    /// Used when the host restores a persisted offset or seeds a default
    /// mounting offset instead of waiting for a live calibration.
    #[must_use]
    pub const fn with_offset(offset: SensorTargetOffset) -> Self {
        Self {
            state: CalibrationState::Calibrated(offset),
            enabled: true,
        }
    }

    /// Returns true once a calibration has succeeded.
    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        matches!(self.state, CalibrationState::Calibrated(_))
    }

    /// Returns the calibrated offset, if any.
    #[must_use]
    pub const fn offset(&self) -> Option<&SensorTargetOffset> {
        self.state.offset()
    }

    /// Returns the current calibration state.
    #[must_use]
    pub const fn state(&self) -> &CalibrationState {
        &self.state
    }

    /// Whether this pair participates in updates.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables this pair. Disabled pairs keep their offset.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Calibrates against the current sensor and target poses.
    ///
    /// Replaces any previous offset wholesale on success.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::InvalidPose`] if either rotation is
    /// degenerate; the previous state is left untouched.
    pub fn calibrate(&mut self, sensor: &RigidPose, target: &RigidPose) -> Result<()> {
        let offset = calibrate(sensor, target)?;
        self.state = CalibrationState::Calibrated(offset);
        Ok(())
    }

    /// Calibrates only if no offset exists yet.
    ///
    /// The lazy path for hosts that calibrate on first use rather than on
    /// an explicit user action.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::InvalidPose`] if a calibration is needed
    /// and either rotation is degenerate.
    pub fn ensure_calibrated(&mut self, sensor: &RigidPose, target: &RigidPose) -> Result<()> {
        if self.is_calibrated() {
            return Ok(());
        }
        self.calibrate(sensor, target)
    }

    /// Computes the target pose from the live sensor pose.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::NotCalibrated`] if no calibration has
    /// succeeded yet; invoking propagation first is a caller-ordering bug
    /// and must not be silently swallowed.
    pub fn propagate(&self, sensor: &RigidPose) -> Result<RigidPose> {
        let offset = self.offset().ok_or(RetargetError::NotCalibrated)?;
        Ok(propagate(sensor, offset))
    }

    /// Propagates and applies the result to the target under confidence gating.
    ///
    /// Returns the target's new pose: the prior `target` pose when the
    /// combined confidence is zero (nothing trustworthy to apply), otherwise
    /// the computed pose with zero-confidence axes frozen.
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::NotCalibrated`] if no calibration has
    /// succeeded yet.
    pub fn drive(
        &self,
        sensor: &RigidPose,
        target: &RigidPose,
        confidence: ConfidenceScore,
    ) -> Result<RigidPose> {
        let offset = self.offset().ok_or(RetargetError::NotCalibrated)?;
        if confidence.combined() <= 0.0 {
            return Ok(*target);
        }
        let computed = propagate(sensor, offset);
        Ok(apply_with_confidence(target, &computed, confidence))
    }

    /// Places the sensor from a known target pose (inverse propagation).
    ///
    /// # Errors
    ///
    /// Returns [`RetargetError::NotCalibrated`] if no calibration has
    /// succeeded yet.
    pub fn sensor_pose_from_target(&self, target: &RigidPose) -> Result<RigidPose> {
        let offset = self.offset().ok_or(RetargetError::NotCalibrated)?;
        Ok(sensor_pose_from_target(target, offset))
    }

    /// Discards the offset, returning to `Uncalibrated`.
    ///
    /// This transition never happens as part of normal operation; it is the
    /// explicit host action for "forget this calibration".
    pub fn reset(&mut self) {
        self.state = CalibrationState::Uncalibrated;
    }
}
