//! Playback controller for a single reading session.
//!
//! The [`Player`] owns the word stream and reacts to three kinds of input:
//! key actions, timer ticks and fetch results. It never sleeps or reads on
//! its own; every handler returns [`Command`]s for the event loop to run.
//!
//! # Example
//!
//! ```rust,ignore
//! use zippy_engine::EagerStream;
//! use zippy_tui::events::Action;
//! use zippy_tui::player::{Command, Player, PlaybackState};
//!
//! let stream = EagerStream::new(vec!["alpha".into(), "beta".into()], false);
//! let mut player = Player::new(Box::new(stream), 500);
//!
//! let commands = player.handle_action(Action::TogglePlay);
//! assert_eq!(player.state(), PlaybackState::Playing);
//! if let [Command::ScheduleTick { id, .. }] = commands.as_slice() {
//!     player.handle_tick(*id);
//! }
//! assert_eq!(player.view().word, Some("beta"));
//! ```

mod controller;
mod state;


pub use controller::{Command, PlaybackView, Player};
pub use state::{
    DEFAULT_WPM, MAX_WPM, MIN_WPM, PlaybackState, TickId, WPM_STEP, adjust_wpm, clamp_wpm,
    word_interval,
};
