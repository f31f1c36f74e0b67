//! Runner module for TUI execution.
//!
//! - `ReaderTerminal`: terminal setup and restoration
//! - `EventLoop`: event processing with `tokio::select!`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use zippy_tui::runner::run;
//!
//! run(player).await?;
//! ```

pub mod event_loop;
pub mod terminal;

use anyhow::Result;

use crate::player::Player;

pub use event_loop::EventLoop;
pub use terminal::{ReaderTerminal, TerminalOptions, restore_terminal};

/// Take over the terminal and play until the user quits.
pub async fn run(player: Player) -> Result<()> {
    tracing::debug!("Starting reader: {:?}", player);
    let mut terminal = ReaderTerminal::with_options(TerminalOptions::new().title("zippy"))?;
    let mut event_loop = EventLoop::new(player);
    let result = event_loop.run(&mut terminal).await;
    drop(terminal);

    if let Err(ref e) = result {
        tracing::error!("Reader exited with error: {:#}", e);
    } else {
        tracing::debug!("Reader exited");
    }
    result
}
