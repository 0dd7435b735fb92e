use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::clip::{AnimationClip, JointCursor};
use crate::play_mode::{Direction, PlayMode};

/// Result of advancing a playback state by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Still contributes to the pose.
    Active,
    /// Finished and fully faded out; the owner should drop it.
    Expired,
}

/// One activation of a clip on a skeleton.
///
/// Many states may reference the same clip at once; each keeps its own
/// time, direction, fade weight and keyframe cursors.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    clip: Arc<AnimationClip>,

    time: f32,
    /// The time step is divided by this, so `2.0` plays at half speed.
    speed: f32,
    direction: Direction,
    mode: PlayMode,

    fade_weight: f32,
    fading_in: bool,
    finished: bool,

    cursors: Vec<JointCursor>,
}

impl PlaybackState {
    /// Starts at time zero moving in the mode's initial direction.
    ///
    /// Unless `skip_fade_in` is set the state starts at zero weight and
    /// ramps up over the following updates.
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>, mode: PlayMode, speed: f32, skip_fade_in: bool) -> Self {
        let joint_count = clip.joint_count();
        Self {
            clip,
            time: 0.0,
            speed,
            direction: mode.initial_direction(),
            mode,
            fade_weight: if skip_fade_in { 1.0 } else { 0.0 },
            fading_in: !skip_fade_in,
            finished: false,
            cursors: vec![JointCursor::default(); joint_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn fade_weight(&self) -> f32 {
        self.fade_weight
    }

    #[inline]
    #[must_use]
    pub fn is_fading_in(&self) -> bool {
        self.fading_in
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Marks the state finished; it fades out over the next updates.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Advances fade and time by `dt` seconds.
    ///
    /// A finished state only fades out; its time is frozen.
    pub fn advance(&mut self, dt: f32, fade_rate: f32) -> PlaybackStatus {
        if self.finished {
            self.fade_weight -= dt * fade_rate;
            return if self.fade_weight <= 0.0 {
                PlaybackStatus::Expired
            } else {
                PlaybackStatus::Active
            };
        }

        if self.fading_in {
            self.fade_weight += dt * fade_rate;
            if self.fade_weight >= 1.0 {
                self.fade_weight = 1.0;
                self.fading_in = false;
            }
        }

        self.time += (dt / self.speed) * self.direction.sign();

        let boundary = self
            .mode
            .resolve(self.time, self.direction, self.clip.duration());
        self.time = boundary.time;
        self.direction = boundary.direction;
        if boundary.finished {
            log::debug!(
                "Playback of '{}' ({}) reached its end at t={}",
                self.clip,
                self.mode,
                self.time
            );
            self.finished = true;
        }

        PlaybackStatus::Active
    }

    /// Unnormalized blend weight this state gives `joint`, or `None` when
    /// the clip has no keyframes for it.
    #[must_use]
    pub fn contribution(&self, joint: usize) -> Option<f32> {
        self.clip
            .track(joint)
            .map(|track| track.weight * self.fade_weight)
    }

    /// Samples `joint` at the current time, or `None` when the clip has no
    /// keyframes for it.
    pub fn sample_joint(&mut self, joint: usize) -> Option<(Vec3, Quat)> {
        let track = self.clip.track(joint)?;
        let cursor = &mut self.cursors[joint];
        Some(track.sample_with_cursor(self.time, cursor))
    }
}
