use glam::{Quat, Vec3};
use marrow_core::errors::{MarrowError, Result};
use marrow_core::math::quat_from_euler_zyx;

use crate::values::Interpolatable;

const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last keyframe interval a track was sampled in.
///
/// Playback advances in small steps, so the next lookup almost always lands
/// in the same or a neighbouring interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// One channel of timestamped samples, sorted ascending by time.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolatable> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track from parallel time/value arrays.
    ///
    /// The importer is trusted to hand over sorted, equally sized arrays;
    /// use [`KeyframeTrack::try_new`] for data of unknown provenance.
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Self {
        debug_assert_eq!(times.len(), values.len(), "times/values length mismatch");
        debug_assert!(times.is_sorted(), "keyframe times must be ascending");
        Self { times, values }
    }

    /// Checked variant of [`KeyframeTrack::new`].
    pub fn try_new(channel: &'static str, times: Vec<f32>, values: Vec<T>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(MarrowError::KeyframeCountMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if let Some(index) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(MarrowError::UnsortedKeyframes {
                channel,
                index: index + 1,
            });
        }
        Ok(Self { times, values })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = (f32, T)>) -> Self {
        let (times, values) = keys.into_iter().unzip();
        Self::new(times, values)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last sample, `0` for an empty track.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples the track at `time`.
    ///
    /// Times before the first sample return the first value, times at or
    /// after the last sample return the last value. An empty track returns
    /// [`Interpolatable::REST`].
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        if self.times.is_empty() {
            return T::REST;
        }
        self.sample_at_frame(self.locate(time), time)
    }

    /// Same result as [`KeyframeTrack::sample`], but reuses `cursor` to find
    /// the keyframe interval in O(1) for sequential playback.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        if self.times.is_empty() {
            return T::REST;
        }
        let index = self.locate_with_cursor(time, cursor);
        self.sample_at_frame(index, time)
    }

    /// Index `i` with `time` in `[t_i, t_i+1)`, clamped to `[0, len - 1]`.
    fn locate(&self, time: f32) -> usize {
        // partition_point finds the first index where t > time, i.e. next_index
        self.times.partition_point(|&t| t <= time).saturating_sub(1)
    }

    fn locate_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> usize {
        let last = self.times.len() - 1;
        // The cursor may come from a longer track if a clip was swapped.
        let i = cursor.last_index.min(last);

        let found = if time >= self.times[i] {
            // Playing forward: every interval visited so far starts at or
            // before `time`, so only the right boundary needs checking.
            (i..=(i + MAX_SCAN_OFFSET).min(last))
                .find(|&idx| idx == last || time < self.times[idx + 1])
        } else {
            // Playing backward: every interval visited so far ends after
            // `time`, so only the left boundary needs checking.
            (i.saturating_sub(MAX_SCAN_OFFSET)..i)
                .rev()
                .find(|&idx| time >= self.times[idx])
        };

        // Large jump (loop wrap, scrubbing): fall back to binary search.
        let index = found.unwrap_or_else(|| self.locate(time));
        cursor.last_index = index;
        index
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let last = self.times.len() - 1;
        if index >= last {
            return self.values[last];
        }

        let next = index + 1;
        let t0 = self.times[index];
        let dt = self.times[next] - t0;

        // Prevent division by zero on coincident keys
        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        // Times before the first key land here with t < 0.
        let t = t.clamp(0.0, 1.0);

        T::interpolate_linear(&self.values[index], &self.values[next], t)
    }
}

impl KeyframeTrack<Quat> {
    /// Builds a rotation track from `(time, euler_radians)` pairs, each
    /// rotation composed yaw (Z), pitch (Y), roll (X).
    #[must_use]
    pub fn from_euler_keys(keys: impl IntoIterator<Item = (f32, Vec3)>) -> Self {
        Self::from_keys(
            keys.into_iter()
                .map(|(time, e)| (time, quat_from_euler_zyx(e.x, e.y, e.z))),
        )
    }
}
