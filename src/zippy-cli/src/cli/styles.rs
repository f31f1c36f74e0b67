//! CLI styling and formatting.

use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Styled help theme.
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Red.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

/// After-help section with key bindings and environment variables.
pub const AFTER_HELP: &str = "\
KEYS
    space          play / pause
    + = Up         faster (25 wpm)
    - _ Down       slower (25 wpm)
    l Right        next word (not with --lazy)
    h Left         previous word (not with --lazy)
    r              restart (only with --file)
    q Ctrl+C       quit

ENVIRONMENT VARIABLES
    ZIPPY_CONFIG   Config file path
    RUST_LOG       Log filter, overrides --log-level

EXAMPLES
    zippy --file book.txt --wpm 400
    curl -s https://example.com/essay.txt | zippy --lazy";
