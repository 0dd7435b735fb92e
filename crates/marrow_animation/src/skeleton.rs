use std::sync::Arc;

use glam::Mat4;
use slotmap::{SlotMap, new_key_type};

use marrow_core::errors::{MarrowError, Result};

use crate::clip::AnimationClip;
use crate::joint::Rig;
use crate::play_mode::PlayMode;
use crate::playback::{PlaybackState, PlaybackStatus};
use crate::pose::{self, Contributions};
use crate::settings::AnimationSettings;

new_key_type! {
    /// Handle to one playback started on a [`Skeleton`].
    pub struct PlaybackKey;
}

/// A posed instance of a [`Rig`].
///
/// The rig (topology and bind pose) is shared; the skeleton owns the
/// playing clips and the per-frame joint matrices. Call
/// [`Skeleton::update`] once per tick, then hand
/// [`Skeleton::final_joint_matrices`] and
/// [`Skeleton::inverse_bind_matrices`] to the skinning shader.
#[derive(Debug, Clone)]
pub struct Skeleton {
    rig: Arc<Rig>,
    settings: AnimationSettings,

    playbacks: SlotMap<PlaybackKey, PlaybackState>,
    // Start order; blending iterates in this order
    order: Vec<PlaybackKey>,

    // Data flow: resolved here each update -> copied to the GPU joint buffer
    final_matrices: Vec<Mat4>,
    // Joints held in bind pose by the last update despite having contributors
    weightless_joints: usize,
}

impl Skeleton {
    #[must_use]
    pub fn new(rig: Arc<Rig>) -> Self {
        Self::with_settings(rig, AnimationSettings::default())
    }

    /// Creates a skeleton in its bind pose.
    #[must_use]
    pub fn with_settings(rig: Arc<Rig>, settings: AnimationSettings) -> Self {
        let final_matrices = rig.bind_matrices().to_vec();
        Self {
            rig,
            settings,
            playbacks: SlotMap::with_key(),
            order: Vec::new(),
            final_matrices,
            weightless_joints: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn rig(&self) -> &Arc<Rig> {
        &self.rig
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.rig.len()
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    /// Starts playing `clip` in `mode`.
    ///
    /// `speed` divides the time step (`2.0` plays at half speed). The new
    /// state fades in unless `skip_fade_in` is set. Passing `None` does
    /// nothing and returns `Ok(None)`.
    pub fn start_animation(
        &mut self,
        clip: Option<&Arc<AnimationClip>>,
        mode: PlayMode,
        speed: f32,
        skip_fade_in: bool,
    ) -> Result<Option<PlaybackKey>> {
        clip.map(|clip| self.push_playback(clip, mode, speed, skip_fade_in))
            .transpose()
    }

    /// Shorthand for [`Skeleton::start_animation`] with a fade-in.
    pub fn play(
        &mut self,
        clip: &Arc<AnimationClip>,
        mode: PlayMode,
        speed: f32,
    ) -> Result<PlaybackKey> {
        self.push_playback(clip, mode, speed, false)
    }

    fn push_playback(
        &mut self,
        clip: &Arc<AnimationClip>,
        mode: PlayMode,
        speed: f32,
        skip_fade_in: bool,
    ) -> Result<PlaybackKey> {
        if clip.joint_count() != self.rig.len() {
            return Err(MarrowError::ClipJointCountMismatch {
                clip: clip.name().to_string(),
                expected: self.rig.len(),
                found: clip.joint_count(),
            });
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(MarrowError::InvalidSpeed(speed));
        }

        let state = PlaybackState::new(Arc::clone(clip), mode, speed, skip_fade_in);
        let key = self.playbacks.insert(state);
        self.order.push(key);

        log::debug!(
            "Started '{clip}' ({mode}, speed {speed}), {} active",
            self.order.len()
        );
        Ok(key)
    }

    /// Fades out the earliest unfinished playback of `clip`.
    pub fn stop_animation(&mut self, clip: &Arc<AnimationClip>) {
        let found = self.order.iter().find_map(|&key| {
            let state = &self.playbacks[key];
            (!state.is_finished() && Arc::ptr_eq(state.clip(), clip)).then_some(key)
        });

        match found {
            Some(key) => {
                self.playbacks[key].finish();
                log::debug!("Stopping '{clip}'");
            }
            None => log::debug!("stop_animation: '{clip}' is not playing"),
        }
    }

    /// Fades out the playback behind `key`. Returns `false` when it has
    /// already been removed.
    pub fn stop_playback(&mut self, key: PlaybackKey) -> bool {
        let Some(state) = self.playbacks.get_mut(key) else {
            return false;
        };
        state.finish();
        true
    }

    /// Fades out every playback.
    pub fn stop_all_animations(&mut self) {
        for state in self.playbacks.values_mut() {
            state.finish();
        }
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Advances every playback by `dt` seconds, drops the ones that have
    /// faded out, then resolves the pose.
    pub fn update(&mut self, dt: f32) {
        let fade_rate = self.settings.fade_rate;
        let playbacks = &mut self.playbacks;

        self.order.retain(|&key| {
            if playbacks[key].advance(dt, fade_rate) == PlaybackStatus::Active {
                return true;
            }
            if let Some(state) = playbacks.remove(key) {
                log::debug!("Removed faded-out playback of '{}'", state.clip());
            }
            false
        });

        self.weightless_joints = pose::resolve_pose(
            &self.rig,
            &self.order,
            &mut self.playbacks,
            self.settings.weight_epsilon,
            &mut self.final_matrices,
        );
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn playback(&self, key: PlaybackKey) -> Option<&PlaybackState> {
        self.playbacks.get(key)
    }

    /// Active playbacks in start order.
    pub fn playbacks(&self) -> impl Iterator<Item = (PlaybackKey, &PlaybackState)> + '_ {
        self.order.iter().map(|&key| (key, &self.playbacks[key]))
    }

    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.order.len()
    }

    /// `true` if an unfinished playback of `clip` exists.
    #[must_use]
    pub fn is_playing(&self, clip: &Arc<AnimationClip>) -> bool {
        self.playbacks
            .values()
            .any(|state| !state.is_finished() && Arc::ptr_eq(state.clip(), clip))
    }

    /// Number of joints the last [`Skeleton::update`] held in bind pose
    /// because every clip animating them had zero weight.
    #[inline]
    #[must_use]
    pub fn weightless_joint_count(&self) -> usize {
        self.weightless_joints
    }

    /// Normalized blend weights `joint` would use with the current states.
    #[must_use]
    pub fn joint_weights(&self, joint: usize) -> Contributions {
        pose::joint_contributions(
            joint,
            &self.order,
            &self.playbacks,
            self.settings.weight_epsilon,
        )
    }

    // ========================================================================
    // Renderer hand-off
    // ========================================================================

    /// Current pose, one matrix per joint.
    #[inline]
    #[must_use]
    pub fn final_joint_matrices(&self) -> &[Mat4] {
        &self.final_matrices
    }

    #[inline]
    #[must_use]
    pub fn bind_joint_matrices(&self) -> &[Mat4] {
        self.rig.bind_matrices()
    }

    /// Constant for the lifetime of the skeleton.
    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        self.rig.inverse_bind_matrices()
    }

    /// `final * inverse_bind` per joint, for renderers that upload a single
    /// pre-multiplied array.
    pub fn skinning_matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        self.final_matrices
            .iter()
            .zip(self.rig.inverse_bind_matrices())
            .map(|(final_matrix, inverse_bind)| *final_matrix * *inverse_bind)
    }

    #[must_use]
    pub fn final_joint_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.final_matrices)
    }

    #[must_use]
    pub fn inverse_bind_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.rig.inverse_bind_matrices())
    }
}
