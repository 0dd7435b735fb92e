//! Play modes and their time-boundary policies.
//!
//! Every mode is a pure rule mapping `(time, direction, duration)` to the
//! resolved time, direction and whether playback has finished. Keeping the
//! table in one exhaustive `match` makes it total and easy to test in
//! isolation from any skeleton.

use std::fmt;

use marrow_core::errors::MarrowError;

/// How a playback state reacts when its time leaves `[0, duration]`.
///
/// The discriminants are the codes used by model files and tools.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayMode {
    /// Play forward once, then finish (and fade out).
    ForwardStop = 0,
    /// Play backward once, then finish.
    BackwardStop = 1,
    /// Play forward, bounce, play backward, then finish.
    ForwardBackwardStop = 2,
    /// Play backward, bounce, play forward, then finish.
    BackwardForwardStop = 3,
    /// Play forward, wrapping around at the end.
    ForwardLoop = 4,
    /// Play backward, restarting from the end.
    BackwardLoop = 5,
    /// Ping-pong, starting forward.
    ForwardBackwardLoop = 6,
    /// Ping-pong, starting backward.
    BackwardForwardLoop = 7,
    /// Play forward and hold the last frame forever.
    ForwardHalt = 8,
    /// Play backward and hold the first frame forever.
    BackwardHalt = 9,
}

/// Direction time advances in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// `+1.0` or `-1.0`.
    #[inline]
    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Outcome of resolving a time step against a play mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub time: f32,
    pub direction: Direction,
    /// Set when the mode ends playback at this boundary.
    pub finished: bool,
}

impl PlayMode {
    pub const ALL: [PlayMode; 10] = [
        PlayMode::ForwardStop,
        PlayMode::BackwardStop,
        PlayMode::ForwardBackwardStop,
        PlayMode::BackwardForwardStop,
        PlayMode::ForwardLoop,
        PlayMode::BackwardLoop,
        PlayMode::ForwardBackwardLoop,
        PlayMode::BackwardForwardLoop,
        PlayMode::ForwardHalt,
        PlayMode::BackwardHalt,
    ];

    /// Direction a freshly started playback moves in.
    #[must_use]
    pub fn initial_direction(self) -> Direction {
        match self {
            PlayMode::ForwardStop
            | PlayMode::ForwardLoop
            | PlayMode::ForwardHalt
            | PlayMode::ForwardBackwardStop
            | PlayMode::ForwardBackwardLoop => Direction::Forward,
            PlayMode::BackwardStop
            | PlayMode::BackwardLoop
            | PlayMode::BackwardHalt
            | PlayMode::BackwardForwardStop
            | PlayMode::BackwardForwardLoop => Direction::Backward,
        }
    }

    /// Whether the mode ever finishes on its own.
    #[must_use]
    pub fn is_terminating(self) -> bool {
        matches!(
            self,
            PlayMode::ForwardStop
                | PlayMode::BackwardStop
                | PlayMode::ForwardBackwardStop
                | PlayMode::BackwardForwardStop
        )
    }

    /// Resolves `time` (already advanced) against `[0, total]`.
    ///
    /// Times inside the range pass through untouched.
    #[must_use]
    pub fn resolve(self, time: f32, direction: Direction, total: f32) -> Boundary {
        let keep = Boundary {
            time,
            direction,
            finished: false,
        };
        let past_end = time > total;
        let before_start = time < 0.0;

        match self {
            PlayMode::ForwardStop if past_end => Boundary {
                time: total,
                finished: true,
                ..keep
            },
            // Wraps at exactly `total` too, so a loop never rests on its last frame.
            PlayMode::ForwardLoop if time >= total => Boundary {
                time: if total > 0.0 { time % total } else { 0.0 },
                ..keep
            },
            PlayMode::ForwardHalt if past_end => Boundary {
                time: total,
                ..keep
            },
            PlayMode::ForwardBackwardStop if past_end => Boundary {
                time: total,
                direction: Direction::Backward,
                ..keep
            },
            PlayMode::ForwardBackwardStop if before_start => Boundary {
                time: 0.0,
                finished: true,
                ..keep
            },
            PlayMode::ForwardBackwardLoop | PlayMode::BackwardForwardLoop if past_end => Boundary {
                time: total,
                direction: Direction::Backward,
                ..keep
            },
            PlayMode::ForwardBackwardLoop | PlayMode::BackwardForwardLoop if before_start => {
                Boundary {
                    time: 0.0,
                    direction: Direction::Forward,
                    ..keep
                }
            }
            PlayMode::BackwardStop if before_start => Boundary {
                finished: true,
                ..keep
            },
            // NOTE: `time` is negative here, so this lands past `total`
            // instead of wrapping into range.
            PlayMode::BackwardLoop if before_start => Boundary {
                time: total - time,
                ..keep
            },
            PlayMode::BackwardHalt if before_start => Boundary { time: 0.0, ..keep },
            PlayMode::BackwardForwardStop if past_end => Boundary {
                time: total,
                finished: true,
                ..keep
            },
            PlayMode::BackwardForwardStop if before_start => Boundary {
                time: 0.0,
                direction: Direction::Forward,
                ..keep
            },
            _ => keep,
        }
    }
}

impl TryFrom<u8> for PlayMode {
    type Error = MarrowError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        PlayMode::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(MarrowError::UnknownPlayMode(code))
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
