//! # Zippy TUI
//!
//! Terminal front end of the zippy word-at-a-time reader.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        EventLoop                         │
//! │  tokio::select! { terminal keys/resizes, EventBus }      │
//! └──────┬───────────────────────┬───────────────────▲───────┘
//!        │ Action / Tick / Fetch │                   │ Tick(id), Fetched(result)
//! ┌──────▼──────┐         ┌──────▼──────┐      ┌─────┴─────────────┐
//! │ KeyMapper   │         │   Player    │─────▶│ sleep / blocking  │
//! │ (keybinds)  │         │ (commands)  │      │ token read tasks  │
//! └─────────────┘         └──────┬──────┘      └───────────────────┘
//!                                │ PlaybackView
//!                         ┌──────▼──────┐
//!                         │    view     │
//!                         └─────────────┘
//! ```
//!
//! ## Main Components
//!
//! - [`Player`] - playback controller over a word stream
//! - [`EventLoop`] - event dispatch and command execution
//! - [`view`] - pivot-centred word and status line rendering

pub mod events;
pub mod player;
pub mod runner;
pub mod style;
pub mod view;

pub use events::{Action, AppEvent, DefaultKeyMapper, EventBus, KeyMapper};
pub use player::{Command, PlaybackState, PlaybackView, Player};
pub use runner::{EventLoop, ReaderTerminal, TerminalOptions, run};
