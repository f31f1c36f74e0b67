//! Terminal setup, teardown, and management.
//!
//! Raw mode, the alternate screen and the hidden cursor are undone by an
//! RAII guard, and a panic hook restores the terminal before the panic
//! message is printed.
//!
//! # Example
//!
//! ```rust,ignore
//! use zippy_tui::runner::terminal::{ReaderTerminal, TerminalOptions};
//!
//! let mut terminal = ReaderTerminal::with_options(TerminalOptions::new().title("zippy"))?;
//! terminal.draw(|frame| {
//!     // ... render widgets
//! })?;
//! // Terminal is automatically restored on drop
//! ```

use std::io::{IsTerminal, Stdout, stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

/// Track whether the panic hook has been installed to avoid installing it multiple times.
static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// RAII guard that restores the terminal on drop.
///
/// Only the features that were enabled during initialization are disabled
/// again.
pub struct TerminalGuard {
    alternate_screen: bool,
    restore: fn(bool) -> Result<()>,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = (self.restore)(self.alternate_screen);
    }
}

/// Configuration options for terminal initialization.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Use alternate screen buffer (preserves scrollback)
    pub alternate_screen: bool,
    /// Terminal title
    pub title: Option<String>,
    /// Clear screen on start
    pub clear_on_start: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            title: None,
            clear_on_start: true,
        }
    }
}

impl TerminalOptions {
    /// Full-screen defaults: alternate screen, cleared on start, no title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to use the alternate screen buffer.
    pub fn alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    /// Set the terminal title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set whether to clear the screen on start.
    pub fn clear_on_start(mut self, enabled: bool) -> Self {
        self.clear_on_start = enabled;
        self
    }
}

/// Wrapper around a ratatui terminal drawing to stdout.
///
/// The terminal is restored to its original state when dropped.
pub struct ReaderTerminal {
    /// The underlying ratatui terminal
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl ReaderTerminal {
    /// Create a terminal with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout is not a terminal or raw mode cannot be
    /// enabled.
    pub fn with_options(options: TerminalOptions) -> Result<Self> {
        if !is_terminal() {
            anyhow::bail!("stdout is not a terminal");
        }
        let guard = init_guarded(&options, init_terminal, restore_terminal_impl)?;
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            _guard: guard,
        })
    }

    /// Draw a frame.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

/// Run `init` with the restoring guard already armed, so a step failing
/// part way through still undoes the ones before it.
fn init_guarded(
    options: &TerminalOptions,
    init: impl FnOnce(&TerminalOptions) -> Result<()>,
    restore: fn(bool) -> Result<()>,
) -> Result<TerminalGuard> {
    let guard = TerminalGuard {
        alternate_screen: options.alternate_screen,
        restore,
    };
    init(options)?;
    Ok(guard)
}

fn init_terminal(options: &TerminalOptions) -> Result<()> {
    install_panic_hook();

    enable_raw_mode()?;
    let mut stdout = stdout();

    if options.alternate_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    if options.clear_on_start {
        execute!(stdout, Clear(ClearType::All))?;
    }
    execute!(stdout, cursor::Hide)?;
    if let Some(ref title) = options.title {
        execute!(stdout, SetTitle(title))?;
    }

    tracing::debug!("Terminal initialized: {:?}", options);
    Ok(())
}

/// Undo what [`init_terminal`] enabled.
///
/// Every step is attempted; the first error is returned.
fn restore_terminal_impl(alternate_screen: bool) -> Result<()> {
    let mut stdout = stdout();

    let shown = execute!(stdout, cursor::Show);
    let left = if alternate_screen {
        execute!(stdout, LeaveAlternateScreen)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();

    shown?;
    left?;
    raw?;
    Ok(())
}

/// Restore the terminal assuming every feature was enabled.
///
/// Useful for manual cleanup in error paths.
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl(true)
}

fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Whether stdout is attached to a terminal.
pub fn is_terminal() -> bool {
    stdout().is_terminal()
}
