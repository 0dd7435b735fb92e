//! # Marrow
//!
//! Real-time skeletal animation: samples keyframe tracks, blends every clip
//! playing on a skeleton per joint, advances playback (loops, ping-pong,
//! fades) and composes the joint hierarchy into matrices ready for GPU
//! skinning.
//!
//! The umbrella crate re-exports the workspace crates:
//! - [`core`]: errors, math helpers, fixed-step clock
//! - [`animation`]: tracks, clips, rigs, play modes, skeletons
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marrow::prelude::*;
//!
//! let rig = Arc::new(Rig::new(joints)?);
//! let mut skeleton = Skeleton::new(Arc::clone(&rig));
//! skeleton.start_animation(Some(&idle), PlayMode::ForwardLoop, 1.0, true)?;
//!
//! let mut clock = FixedStep::from_rate(60.0)?;
//! loop {
//!     for _ in 0..clock.advance(frame_dt) {
//!         skeleton.update(clock.step());
//!     }
//!     renderer.upload_joints(skeleton.final_joint_matrices(), skeleton.inverse_bind_matrices());
//! }
//! ```

pub use marrow_animation as animation;
pub use marrow_core as core;

pub use marrow_core::errors::{MarrowError, Result};

pub mod prelude {
    pub use marrow_animation::{
        AnimationClip, AnimationSettings, Direction, Joint, JointTrack, KeyframeTrack, PlayMode,
        PlaybackKey, PlaybackState, Rig, Skeleton,
    };
    pub use marrow_core::FixedStep;
    pub use marrow_core::errors::{MarrowError, Result};
}
