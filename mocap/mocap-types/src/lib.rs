//! Engine-agnostic motion-capture value types.
//!
//! This crate provides the foundational types for mapping tracked sensor
//! poses (headsets, trackers, controllers) onto skeletal targets:
//!
//! - [`RigidPose`] - World-space placement (position + rotation, no scale)
//! - [`ConfidenceScore`] - Per-axis trust in a pose estimate
//! - [`TrackingStatus`] - Sensor tracking state
//! - [`PoseSource`] - Capability trait for anything that reports a pose
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be used in:
//! - Engine plugins (any engine that can hand over a pose matrix)
//! - CLI calibration tools
//! - Offline recording analysis
//! - Test harnesses
//!
//! # No Scale
//!
//! A [`RigidPose`] carries rotation and translation only. Scene-graph nodes
//! often carry scale; lifting their matrices through
//! [`RigidPose::from_matrix`] discards it, so offset math downstream (in
//! `mocap-retarget`) cannot be corrupted by a scaled parent.
//!
//! # Example
//!
//! ```
//! use mocap_types::{ConfidenceScore, RigidPose};
//! use glam::Vec3;
//!
//! let sensor = RigidPose::from_translation(Vec3::new(0.0, 1.0, 0.0));
//! assert!(sensor.has_valid_rotation());
//!
//! let confidence = ConfidenceScore::new(1.0, 0.0);
//! assert!(confidence.trusts_rotation());
//! assert!(!confidence.trusts_position());
//! ```
//!
//! # Quality Standards
//!
//! This crate maintains A-grade standards per [STANDARDS.md](../../STANDARDS.md):
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod confidence;
mod pose;
mod source;
mod status;

// Re-export core types
pub use confidence::ConfidenceScore;
pub use pose::RigidPose;
pub use source::PoseSource;
pub use status::TrackingStatus;
