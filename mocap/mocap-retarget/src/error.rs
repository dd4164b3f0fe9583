//! Error types for the mocap-retarget crate.

use thiserror::Error;

/// Errors that can occur while calibrating or retargeting.
#[derive(Debug, Error)]
pub enum RetargetError {
    /// A pose with a degenerate rotation was supplied.
    #[error("invalid pose: degenerate rotation in {0}")]
    InvalidPose(String),

    /// Propagation was requested before any successful calibration.
    ///
    /// This signals a caller-ordering bug, not a runtime transient: the
    /// calibration step must complete before the pair can drive its target.
    #[error("not calibrated: no sensor-to-target offset has been computed")]
    NotCalibrated,

    /// No rig entry with the given name.
    #[error("entry not found: {0}")]
    EntryNotFound(String),
}

impl RetargetError {
    /// Creates an invalid pose error naming the offending pose.
    #[must_use]
    pub fn invalid_pose(what: impl Into<String>) -> Self {
        Self::InvalidPose(what.into())
    }

    /// Creates an entry not found error.
    #[must_use]
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound(name.into())
    }
}

/// Result type for calibration and retargeting operations.
pub type Result<T> = std::result::Result<T, RetargetError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_pose() {
        let err = RetargetError::invalid_pose("sensor pose");
        assert!(err.to_string().contains("invalid pose"));
        assert!(err.to_string().contains("sensor pose"));
    }

    #[test]
    fn error_not_calibrated() {
        let err = RetargetError::NotCalibrated;
        assert!(err.to_string().contains("not calibrated"));
    }

    #[test]
    fn error_entry_not_found() {
        let err = RetargetError::entry_not_found("left_hand");
        assert!(err.to_string().contains("entry not found"));
        assert!(err.to_string().contains("left_hand"));
    }
}
