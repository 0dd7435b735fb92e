//! Skeletal animation for the Marrow engine.
//!
//! - [`KeyframeTrack`] / [`JointTrack`]: timestamped position and rotation
//!   samples for one joint
//! - [`AnimationClip`]: one joint track per joint of a rig
//! - [`Rig`]: shared, immutable joint hierarchy with its bind pose
//! - [`Skeleton`]: per-instance playback states and resolved joint matrices
//!
//! ```rust,ignore
//! let rig = Arc::new(Rig::new(joints)?);
//! let mut skeleton = Skeleton::new(rig);
//! skeleton.start_animation(Some(&walk), PlayMode::ForwardLoop, 1.0, false)?;
//!
//! // every tick
//! skeleton.update(dt);
//! upload(skeleton.final_joint_bytes(), skeleton.inverse_bind_bytes());
//! ```

pub mod clip;
pub mod joint;
pub mod play_mode;
pub mod playback;
pub mod pose;
pub mod settings;
pub mod skeleton;
pub mod tracks;
mod values;

pub use clip::{AnimationClip, JointCursor, JointTrack};
pub use joint::{Joint, Rig};
pub use play_mode::{Boundary, Direction, PlayMode};
pub use playback::{PlaybackState, PlaybackStatus};
pub use pose::Contributions;
pub use settings::AnimationSettings;
pub use skeleton::{PlaybackKey, Skeleton};
pub use tracks::{KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
