//! Skeleton runtime settings.
//!
//! ```rust,ignore
//! use marrow::animation::{AnimationSettings, Skeleton};
//!
//! // Defaults: 0.1 s fades, exact zero-weight fallback
//! let skeleton = Skeleton::new(rig.clone());
//!
//! // Slower crossfades for a cutscene rig
//! let settings = AnimationSettings::default().with_fade_rate(2.0);
//! let skeleton = Skeleton::with_settings(rig, settings);
//! ```

/// Fade-in/out ramp in weight units per second.
pub const DEFAULT_FADE_RATE: f32 = 10.0;

/// Tunables fixed for the lifetime of a skeleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Weight gained (fade-in) or lost (fade-out) per second.
    pub fade_rate: f32,
    /// A joint whose summed contribution weight is at or below this value
    /// falls back to its bind pose for the frame.
    pub weight_epsilon: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            fade_rate: DEFAULT_FADE_RATE,
            weight_epsilon: 0.0,
        }
    }
}

impl AnimationSettings {
    #[must_use]
    pub fn with_fade_rate(mut self, fade_rate: f32) -> Self {
        self.fade_rate = fade_rate;
        self
    }

    #[must_use]
    pub fn with_weight_epsilon(mut self, weight_epsilon: f32) -> Self {
        self.weight_epsilon = weight_epsilon;
        self
    }
}
