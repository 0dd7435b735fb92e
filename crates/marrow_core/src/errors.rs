//! Error Types
//!
//! This module defines the error types shared by every Marrow crate.
//!
//! # Overview
//!
//! The main error type [`MarrowError`] covers the construction-time failure
//! modes of the animation core:
//! - Rig topology errors (joint ordering, index mismatches)
//! - Bind pose errors (non-invertible joint matrices)
//! - Keyframe data errors (unsorted or mismatched samples)
//! - Playback request errors (clip/rig mismatch, invalid speed or step)
//!
//! Per-frame operations never fail; everything that could go wrong is
//! rejected when data enters the core.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marrow_core::errors::{MarrowError, Result};
//!
//! fn build_rig() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Marrow engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarrowError {
    // ========================================================================
    // Rig Topology Errors
    // ========================================================================
    /// A joint's stored index differs from its position in the joint array.
    #[error("Joint at position {position} declares index {index}")]
    JointIndexMismatch {
        /// Position of the joint in the array
        position: usize,
        /// Index the joint claims to have
        index: usize,
    },

    /// A joint references a parent that does not precede it.
    ///
    /// Pose resolution is a single forward pass, so every parent must be
    /// stored before any of its children.
    #[error("Joint {index} has parent {parent}, parents must precede their children")]
    JointOrderViolation {
        /// The offending joint
        index: usize,
        /// Its declared parent
        parent: usize,
    },

    /// The composed bind matrix of a joint cannot be inverted.
    #[error("Bind pose of joint {joint} is not invertible")]
    NonInvertibleBindPose {
        /// The offending joint
        joint: usize,
    },

    // ========================================================================
    // Keyframe Errors
    // ========================================================================
    /// Keyframe times are not in ascending order.
    #[error("Keyframe {index} of {channel} track is out of order")]
    UnsortedKeyframes {
        /// Channel name ("position", "rotation", ...)
        channel: &'static str,
        /// First sample whose time precedes its predecessor
        index: usize,
    },

    /// A track has a different number of times and values.
    #[error("Keyframe track has {times} times but {values} values")]
    KeyframeCountMismatch {
        /// Number of timestamps
        times: usize,
        /// Number of values
        values: usize,
    },

    // ========================================================================
    // Playback Errors
    // ========================================================================
    /// A clip was authored for a rig with a different joint count.
    #[error("Clip '{clip}' has {found} joint tracks, skeleton has {expected} joints")]
    ClipJointCountMismatch {
        /// Clip name
        clip: String,
        /// Joint count of the skeleton
        expected: usize,
        /// Number of tracks in the clip
        found: usize,
    },

    /// A speed divisor that is zero, negative or not finite.
    #[error("Invalid playback speed divisor: {0}")]
    InvalidSpeed(f32),

    /// A fixed animation step that is zero, negative or not finite.
    #[error("Invalid fixed time step: {0}")]
    InvalidTimeStep(f32),

    /// A play mode code outside the ten known modes.
    #[error("Unknown play mode code: {0}")]
    UnknownPlayMode(u8),
}

/// Alias for `Result<T, MarrowError>`.
pub type Result<T> = std::result::Result<T, MarrowError>;
