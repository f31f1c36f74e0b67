//! Playback state, speed limits and tick identifiers.

use std::fmt;
use std::time::Duration;

/// Slowest selectable reading speed.
pub const MIN_WPM: u32 = 50;

/// Fastest selectable reading speed.
pub const MAX_WPM: u32 = 1200;

/// Amount one speed key press changes the rate by.
pub const WPM_STEP: u32 = 25;

/// Rate used when nothing else is configured.
pub const DEFAULT_WPM: u32 = 500;

/// Whether the player is advancing on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Initial state; words only change on explicit seeks.
    #[default]
    Paused,
    /// Words advance once per word interval.
    Playing,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Paused => Self::Playing,
            Self::Playing => Self::Paused,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Paused => "paused",
            Self::Playing => "playing",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one scheduled tick. Only the most recent id is honoured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(u64);

impl TickId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Keep a rate inside `[MIN_WPM, MAX_WPM]`.
pub fn clamp_wpm(wpm: u32) -> u32 {
    wpm.clamp(MIN_WPM, MAX_WPM)
}

/// Apply a signed step to a rate and clamp the result.
pub fn adjust_wpm(wpm: u32, delta: i64) -> u32 {
    let adjusted = (i64::from(wpm) + delta).clamp(i64::from(MIN_WPM), i64::from(MAX_WPM));
    u32::try_from(adjusted).unwrap_or(MAX_WPM)
}

/// Time each word stays on screen: one minute divided by the rate.
///
/// A rate of zero falls back to one second.
pub fn word_interval(wpm: u32) -> Duration {
    if wpm == 0 {
        return Duration::from_secs(1);
    }
    Duration::from_secs(60) / wpm
}
