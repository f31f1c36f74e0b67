//! Reader screen rendering.
//!
//! The screen is pulled from a [`PlaybackView`] snapshot after every event:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                                          │
//! │                   rea̲ding                │  ← pivot letter at width / 2
//! │                                          │
//! │WPM 500  12/?  [playing]  space: play/... │  ← status line (last row)
//! └──────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use zippy_engine::Capabilities;

use crate::player::PlaybackView;
use crate::style;

/// Shown until the first word is available.
pub const LOADING: &str = "Loading...";

/// Shown when the input held no words.
pub const NO_WORDS: &str = "No words to display.";

/// Index of the letter the eye should fixate on, by word length in chars.
pub fn pivot_index(len: usize) -> usize {
    match len {
        0..=1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

/// Lay out a word so its pivot letter sits at column `width / 2`.
pub fn format_word(word: &str, width: u16) -> Line<'static> {
    if width == 0 {
        return Line::from(word.to_string());
    }
    let chars: Vec<char> = word.chars().collect();
    if chars.is_empty() {
        return Line::default();
    }

    let pivot = pivot_index(chars.len()).min(chars.len() - 1);
    let left: String = chars[..pivot].iter().collect();
    let right: String = chars[pivot + 1..].iter().collect();

    let center = usize::from(width / 2);
    let pad = center.saturating_sub(left.width());

    Line::from(vec![
        Span::raw(format!("{}{}", " ".repeat(pad), left)),
        Span::styled(chars[pivot].to_string(), style::pivot()),
        Span::raw(right),
    ])
}

/// Key hints for the controls the active stream supports.
pub fn control_hints(capabilities: Capabilities) -> String {
    let mut hints = String::from("space: play/pause  +/-: speed");
    if capabilities.seekable {
        hints.push_str("  h/l: back/forward");
    }
    if capabilities.restartable {
        hints.push_str("  r: restart");
    }
    hints.push_str("  q: quit");
    hints
}

/// Speed, position and playback state, e.g. `WPM 500  3/?  [playing]`.
pub fn status_summary(view: &PlaybackView<'_>) -> String {
    let shown = view.position.map_or(0, |p| p + 1);
    let total = view
        .total
        .map_or_else(|| "?".to_string(), |t| t.to_string());
    let state = if view.playing { "playing" } else { "paused" };
    format!("WPM {}  {}/{}  [{}]", view.wpm, shown, total, state)
}

/// Build the status line, clipped to `width` columns.
pub fn status_line(view: &PlaybackView<'_>, width: u16) -> Line<'static> {
    let mut parts = vec![(status_summary(view), style::status())];
    if let Some(error) = &view.error {
        parts.push((format!("  error: {error}"), style::status_error()));
    }
    parts.push((
        format!("  {}", control_hints(view.capabilities)),
        style::status(),
    ));

    let mut remaining = usize::from(width);
    let mut spans = Vec::with_capacity(parts.len());
    for (text, style) in parts {
        if remaining == 0 {
            break;
        }
        let clipped = truncate(&text, remaining);
        remaining = remaining.saturating_sub(clipped.width());
        spans.push(Span::styled(clipped, style));
    }
    Line::from(spans)
}

/// Clip `text` to at most `width` display columns.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Text to show instead of a word, if there is no word yet.
pub fn placeholder(view: &PlaybackView<'_>) -> Option<String> {
    if view.word.is_some() {
        return None;
    }
    if let Some(error) = &view.error {
        return Some(format!("Error: {error}"));
    }
    if view.finished {
        return Some(NO_WORDS.to_string());
    }
    Some(LOADING.to_string())
}

/// Draw the reader screen.
pub fn render(frame: &mut Frame, view: &PlaybackView<'_>) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let Some(word) = view.word else {
        let text = placeholder(view).unwrap_or_default();
        frame.render_widget(Paragraph::new(truncate(&text, usize::from(area.width))), area);
        return;
    };

    // Last row is the status line once there is room for it.
    let content_height = if area.height > 1 {
        area.height - 1
    } else {
        area.height
    };

    let word_row = Rect {
        x: area.x,
        y: area.y + content_height.saturating_sub(1) / 2,
        width: area.width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(format_word(word, area.width)), word_row);

    if content_height < area.height {
        let status_row = Rect {
            x: area.x,
            y: area.y + content_height,
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(status_line(view, area.width)), status_row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn view(word: Option<&str>) -> PlaybackView<'_> {
        PlaybackView {
            word,
            position: word.map(|_| 0),
            total: Some(2),
            wpm: 500,
            playing: false,
            capabilities: Capabilities {
                seekable: true,
                restartable: false,
                total_known: true,
            },
            error: None,
            finished: false,
        }
    }

    fn draw(view: &PlaybackView<'_>, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, view)).unwrap();
        terminal
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    // ------------------------------------------------------------------
    // Layout helpers
    // ------------------------------------------------------------------

    #[test]
    fn test_pivot_index_by_length() {
        let cases = [
            (0, 0),
            (1, 0),
            (2, 1),
            (5, 1),
            (6, 2),
            (9, 2),
            (10, 3),
            (13, 3),
            (14, 4),
            (40, 4),
        ];
        for (len, expected) in cases {
            assert_eq!(pivot_index(len), expected, "length {len}");
        }
    }

    #[test]
    fn test_format_word_centers_pivot() {
        let line = format_word("hello", 20);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content, "         h");
        assert_eq!(line.spans[1].content, "e");
        assert_eq!(line.spans[1].style, style::pivot());
        assert_eq!(line.spans[2].content, "llo");
    }

    #[test]
    fn test_format_word_single_char_and_multibyte() {
        let line = format_word("a", 10);
        assert_eq!(line.spans[0].content, "     ");
        assert_eq!(line.spans[1].content, "a");

        let line = format_word("naïve", 10);
        assert_eq!(line.spans[1].content, "a");
        assert_eq!(line.spans[2].content, "ïve");
    }

    #[test]
    fn test_format_word_without_width() {
        assert_eq!(plain(&format_word("word", 0)), "word");
        assert!(format_word("", 10).spans.is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 0), "");
        assert_eq!(truncate("日本語", 5), "日本");
    }

    #[test]
    fn test_control_hints_follow_capabilities() {
        let all = Capabilities {
            seekable: true,
            restartable: true,
            total_known: true,
        };
        assert_eq!(
            control_hints(all),
            "space: play/pause  +/-: speed  h/l: back/forward  r: restart  q: quit"
        );
        assert_eq!(
            control_hints(Capabilities::default()),
            "space: play/pause  +/-: speed  q: quit"
        );
    }

    #[test]
    fn test_status_summary() {
        let mut v = view(Some("alpha"));
        assert_eq!(status_summary(&v), "WPM 500  1/2  [paused]");

        v.position = None;
        v.total = None;
        v.playing = true;
        assert_eq!(status_summary(&v), "WPM 500  0/?  [playing]");
    }

    #[test]
    fn test_status_line_includes_error_and_clips() {
        let mut v = view(Some("alpha"));
        v.error = Some("read error: boom".to_string());

        let full = plain(&status_line(&v, 200));
        assert!(full.starts_with("WPM 500  1/2  [paused]  error: read error: boom  space"));

        let clipped = status_line(&v, 12);
        assert_eq!(plain(&clipped), "WPM 500  1/2");
        assert_eq!(clipped.spans.len(), 1);
    }

    #[test]
    fn test_placeholder() {
        let mut v = view(None);
        assert_eq!(placeholder(&v).as_deref(), Some(LOADING));

        v.finished = true;
        assert_eq!(placeholder(&v).as_deref(), Some(NO_WORDS));

        v.error = Some("boom".to_string());
        assert_eq!(placeholder(&v).as_deref(), Some("Error: boom"));

        assert_eq!(placeholder(&view(Some("x"))), None);
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    #[test]
    fn test_render_loading() {
        let terminal = draw(&view(None), 20, 3);
        assert!(row(&terminal, 0).starts_with(LOADING));
    }

    #[test]
    fn test_render_word_and_status() {
        let terminal = draw(&view(Some("reading")), 30, 5);

        // Four content rows, word on the second.
        let word_row = row(&terminal, 1);
        assert_eq!(word_row.trim_end(), format!("{}reading", " ".repeat(13)));

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(15, 1)].symbol(), "a");
        assert_eq!(buffer[(15, 1)].fg, style::PIVOT_RED);

        let status = row(&terminal, 4);
        assert!(status.starts_with("WPM 500  1/2  [paused]"));
        assert_eq!(buffer[(0, 4)].fg, style::STATUS_GRAY);
    }

    #[test]
    fn test_render_single_row_has_no_status() {
        let terminal = draw(&view(Some("go")), 10, 1);
        assert_eq!(row(&terminal, 0).trim_end(), "    go");
    }

    #[test]
    fn test_render_zero_size_draws_nothing() {
        let mut terminal = Terminal::new(TestBackend::new(0, 0)).unwrap();
        terminal.draw(|frame| render(frame, &view(Some("x")))).unwrap();
    }
}
