//! Event and action system for the player.
//!
//! - [`Action`] - what a key press asks the player to do
//! - [`AppEvent`] - everything the event loop reacts to
//! - [`EventBus`] - the single queue ticks and fetch results are posted to
//! - [`KeyMapper`] - trait for mapping key events to actions
//! - [`DefaultKeyMapper`] - standard key bindings implementation

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use zippy_engine::FetchResult;

use crate::player::TickId;

/// Player actions a key can trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Switch between playing and paused
    TogglePlay,
    /// Raise the reading speed by one step
    Faster,
    /// Lower the reading speed by one step
    Slower,
    /// Show the next word
    SeekForward,
    /// Show the previous word
    SeekBackward,
    /// Go back to the first word
    Restart,
    /// No operation
    #[default]
    None,
}

/// Everything the event loop dispatches, in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A scheduled word timer fired.
    Tick(TickId),
    /// A background token read completed.
    Fetched(FetchResult),
}

impl AppEvent {
    /// Convert a terminal event, dropping the kinds the player ignores.
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(Self::Key(key)),
            Event::Resize(width, height) => Some(Self::Resize(width, height)),
            _ => None,
        }
    }
}

/// Queue of [`AppEvent`]s shared by the timer and fetch tasks.
///
/// # Example
///
/// ```ignore
/// let mut bus = EventBus::new(64);
/// let sender = bus.sender();
///
/// tokio::spawn(async move {
///     let _ = sender.send(AppEvent::Resize(80, 24)).await;
/// });
///
/// if let Some(event) = bus.recv().await {
///     // Dispatch event
/// }
/// ```
pub struct EventBus {
    event_tx: mpsc::Sender<AppEvent>,
    event_rx: mpsc::Receiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        Self { event_tx, event_rx }
    }

    /// Get a clone of the sender for posting events from other tasks.
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Asynchronously receive the next event.
    pub async fn recv(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    /// Receive an event if one is already queued.
    pub fn try_recv(&mut self) -> Option<AppEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("capacity", &self.event_tx.max_capacity())
            .finish()
    }
}

/// Trait for mapping key events to actions.
///
/// # Example
///
/// ```ignore
/// struct ArrowsOnly;
///
/// impl KeyMapper for ArrowsOnly {
///     fn map_key(&self, key: KeyEvent) -> Action {
///         match key.code {
///             KeyCode::Left => Action::SeekBackward,
///             KeyCode::Right => Action::SeekForward,
///             _ => Action::None,
///         }
///     }
/// }
/// ```
pub trait KeyMapper {
    /// Map a key event to an action.
    ///
    /// Returns [`Action::None`] if the key should not trigger any action.
    fn map_key(&self, key: KeyEvent) -> Action;
}

/// Default key mapper.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `q`, `Ctrl+c` | Quit |
/// | `Space` | Play / pause |
/// | `+`, `=`, `Up` | Faster |
/// | `-`, `_`, `Down` | Slower |
/// | `Right`, `l` | Forward one word |
/// | `Left`, `h` | Back one word |
/// | `r` | Restart |
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultKeyMapper;

impl DefaultKeyMapper {
    pub fn new() -> Self {
        Self
    }
}

impl KeyMapper for DefaultKeyMapper {
    fn map_key(&self, key: KeyEvent) -> Action {
        // Terminals that report releases would otherwise trigger every binding twice
        if key.kind == KeyEventKind::Release {
            return Action::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Action::Quit,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char(' ') => Action::TogglePlay,

            // Speed
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Action::Faster,
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => Action::Slower,

            // Seeking - arrow keys and vim-style
            KeyCode::Right | KeyCode::Char('l') => Action::SeekForward,
            KeyCode::Left | KeyCode::Char('h') => Action::SeekBackward,

            KeyCode::Char('r') => Action::Restart,

            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_default_mapper_quit() {
        let mapper = DefaultKeyMapper::new();

        assert_eq!(mapper.map_key(key_event(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            mapper.map_key(key_event_with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            )),
            Action::Quit
        );
    }

    #[test]
    fn test_default_mapper_playback() {
        let mapper = DefaultKeyMapper::new();

        assert_eq!(
            mapper.map_key(key_event(KeyCode::Char(' '))),
            Action::TogglePlay
        );
        assert_eq!(
            mapper.map_key(key_event(KeyCode::Char('r'))),
            Action::Restart
        );
    }

    #[test]
    fn test_default_mapper_speed() {
        let mapper = DefaultKeyMapper::new();

        for code in [KeyCode::Char('+'), KeyCode::Char('='), KeyCode::Up] {
            assert_eq!(mapper.map_key(key_event(code)), Action::Faster);
        }
        for code in [KeyCode::Char('-'), KeyCode::Char('_'), KeyCode::Down] {
            assert_eq!(mapper.map_key(key_event(code)), Action::Slower);
        }
    }

    #[test]
    fn test_default_mapper_seeking() {
        let mapper = DefaultKeyMapper::new();

        assert_eq!(
            mapper.map_key(key_event(KeyCode::Right)),
            Action::SeekForward
        );
        assert_eq!(
            mapper.map_key(key_event(KeyCode::Char('l'))),
            Action::SeekForward
        );
        assert_eq!(
            mapper.map_key(key_event(KeyCode::Left)),
            Action::SeekBackward
        );
        assert_eq!(
            mapper.map_key(key_event(KeyCode::Char('h'))),
            Action::SeekBackward
        );
    }

    #[test]
    fn test_default_mapper_ignores_release_and_ctrl_letters() {
        let mapper = DefaultKeyMapper::new();

        let release =
            KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(mapper.map_key(release), Action::None);

        assert_eq!(
            mapper.map_key(key_event_with_modifiers(
                KeyCode::Char('r'),
                KeyModifiers::CONTROL
            )),
            Action::None
        );
    }

    #[test]
    fn test_default_mapper_unmapped() {
        let mapper = DefaultKeyMapper::new();

        assert_eq!(mapper.map_key(key_event(KeyCode::Char('x'))), Action::None);
        assert_eq!(mapper.map_key(key_event(KeyCode::F(1))), Action::None);
    }

    #[test]
    fn test_action_default() {
        assert_eq!(Action::default(), Action::None);
    }

    #[test]
    fn test_from_terminal_keeps_keys_and_resizes() {
        let key = key_event(KeyCode::Char(' '));
        assert!(matches!(
            AppEvent::from_terminal(Event::Key(key)),
            Some(AppEvent::Key(k)) if k == key
        ));
        assert!(matches!(
            AppEvent::from_terminal(Event::Resize(80, 24)),
            Some(AppEvent::Resize(80, 24))
        ));
        assert!(AppEvent::from_terminal(Event::FocusGained).is_none());
    }

    #[tokio::test]
    async fn test_event_bus_send_recv() {
        let mut bus = EventBus::new(10);
        let sender = bus.sender();

        sender.send(AppEvent::Resize(10, 5)).await.unwrap();
        sender.send(AppEvent::Tick(TickId::default())).await.unwrap();

        assert!(matches!(bus.recv().await, Some(AppEvent::Resize(10, 5))));
        assert!(matches!(bus.recv().await, Some(AppEvent::Tick(_))));
    }

    #[tokio::test]
    async fn test_event_bus_try_recv() {
        let mut bus = EventBus::new(10);
        let sender = bus.sender();

        assert!(bus.try_recv().is_none());

        sender.send(AppEvent::Resize(1, 1)).await.unwrap();
        assert!(matches!(bus.try_recv(), Some(AppEvent::Resize(1, 1))));

        assert!(bus.try_recv().is_none());
    }

    #[test]
    fn test_event_bus_debug() {
        let bus = EventBus::new(10);
        let debug_str = format!("{:?}", bus);
        assert!(debug_str.contains("EventBus"));
    }
}
