use std::fmt;

use glam::{Quat, Vec3};

use crate::tracks::{KeyframeCursor, KeyframeTrack};

/// Keyframes driving a single joint: independent position and rotation
/// channels plus the weight this joint carries when clips are blended.
#[derive(Debug, Clone)]
pub struct JointTrack {
    pub positions: KeyframeTrack<Vec3>,
    pub rotations: KeyframeTrack<Quat>,
    /// Scales this joint's contribution relative to other playing clips.
    pub weight: f32,
}

impl Default for JointTrack {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-joint cursors, one for each channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct JointCursor {
    pub position: KeyframeCursor,
    pub rotation: KeyframeCursor,
}

impl JointTrack {
    #[must_use]
    pub fn new(positions: KeyframeTrack<Vec3>, rotations: KeyframeTrack<Quat>) -> Self {
        Self {
            positions,
            rotations,
            weight: 1.0,
        }
    }

    /// A track for a joint the clip does not move.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(KeyframeTrack::empty(), KeyframeTrack::empty())
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// `true` when neither channel has samples; such a track contributes
    /// nothing to blending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.rotations.is_empty()
    }

    #[must_use]
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.position_count().max(self.rotation_count())
    }

    #[must_use]
    pub fn position_duration(&self) -> f32 {
        self.positions.duration()
    }

    #[must_use]
    pub fn rotation_duration(&self) -> f32 {
        self.rotations.duration()
    }

    /// Time of the last keyframe on either channel.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.position_duration().max(self.rotation_duration())
    }

    #[must_use]
    pub fn sample_position(&self, time: f32) -> Vec3 {
        self.positions.sample(time)
    }

    #[must_use]
    pub fn sample_rotation(&self, time: f32) -> Quat {
        self.rotations.sample(time)
    }

    /// Samples both channels; each is searched independently.
    #[must_use]
    pub fn sample(&self, time: f32) -> (Vec3, Quat) {
        (self.sample_position(time), self.sample_rotation(time))
    }

    pub fn sample_with_cursor(&self, time: f32, cursor: &mut JointCursor) -> (Vec3, Quat) {
        (
            self.positions.sample_with_cursor(time, &mut cursor.position),
            self.rotations.sample_with_cursor(time, &mut cursor.rotation),
        )
    }
}

/// An immutable animation: one [`JointTrack`] per joint of the rig it was
/// authored for, indexed by joint index.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    name: String,
    duration: f32,
    tracks: Vec<JointTrack>,
}

impl AnimationClip {
    /// Builds a clip; `duration` is the latest keyframe across all joints.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<JointTrack>) -> Self {
        let duration = tracks
            .iter()
            .map(JointTrack::duration)
            .fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest keyframe time across all joints.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[must_use]
    pub fn tracks(&self) -> &[JointTrack] {
        &self.tracks
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.tracks.len()
    }

    /// Track for `joint`, or `None` when the clip does not animate it.
    ///
    /// Panics if `joint` is outside the rig the clip was authored for.
    #[inline]
    #[must_use]
    pub fn track(&self, joint: usize) -> Option<&JointTrack> {
        let track = &self.tracks[joint];
        (!track.is_empty()).then_some(track)
    }
}

impl fmt::Display for AnimationClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
