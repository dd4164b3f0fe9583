//! Per-axis trust scores for pose estimates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trust in the most recent pose estimate for one target, split by axis.
///
/// Each component lies in `[0, 1]`. Zero means "do not move this target from
/// this source": propagation gates on confidence rather than blending with
/// it, so a momentary tracking loss freezes the target at its last known
/// pose instead of snapping it to an undefined one. The scores themselves
/// are still recorded for downstream consumers.
///
/// # Example
///
/// ```
/// use mocap_types::ConfidenceScore;
///
/// let lost = ConfidenceScore::new(0.0, 0.8);
/// assert!(!lost.trusts_rotation());
/// assert!(lost.trusts_position());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfidenceScore {
    /// Trust in the rotation estimate, in `[0, 1]`.
    pub rotation: f32,

    /// Trust in the position estimate, in `[0, 1]`.
    pub position: f32,
}

impl ConfidenceScore {
    /// Creates a confidence score, clamping both components into `[0, 1]`.
    #[must_use]
    pub fn new(rotation: f32, position: f32) -> Self {
        Self {
            rotation: rotation.clamp(0.0, 1.0),
            position: position.clamp(0.0, 1.0),
        }
    }

    /// Full trust in both axes.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            rotation: 1.0,
            position: 1.0,
        }
    }

    /// No trust in either axis.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            rotation: 0.0,
            position: 0.0,
        }
    }

    /// Returns true if the rotation estimate should be applied.
    ///
    /// This is the binary gate: any strictly positive confidence passes.
    #[must_use]
    pub fn trusts_rotation(&self) -> bool {
        self.rotation > 0.0
    }

    /// Returns true if the position estimate should be applied.
    #[must_use]
    pub fn trusts_position(&self) -> bool {
        self.position > 0.0
    }

    /// Sum of both components.
    ///
    /// A combined score of zero means the source has nothing trustworthy to
    /// say about this target and the whole update can be skipped.
    #[must_use]
    pub fn combined(&self) -> f32 {
        self.rotation + self.position
    }

    /// Component-wise minimum of two scores.
    ///
    /// Useful when a pose passes through more than one source and the chain
    /// is only as trustworthy as its weakest link.
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation.min(other.rotation),
            position: self.position.min(other.position),
        }
    }
}
