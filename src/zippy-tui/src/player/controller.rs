//! Playback controller.
//!
//! This module provides the [`Player`] struct that turns key actions, timer
//! ticks and fetch results into stream operations and scheduling commands.

use std::time::Duration;

use zippy_engine::{Capabilities, FetchRequest, FetchResult, WordStream};

use super::state::{PlaybackState, TickId, WPM_STEP, adjust_wpm, clamp_wpm, word_interval};
use crate::events::Action;

/// Work the event loop must carry out on behalf of the player.
#[derive(Debug)]
pub enum Command {
    /// Post `Tick(id)` after `after` has elapsed.
    ScheduleTick { id: TickId, after: Duration },
    /// Execute a token read off the event loop and post its result.
    Fetch(FetchRequest),
    /// Leave the event loop.
    Quit,
}

/// Snapshot of everything the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackView<'a> {
    pub word: Option<&'a str>,
    pub position: Option<usize>,
    pub total: Option<usize>,
    pub wpm: u32,
    pub playing: bool,
    pub capabilities: Capabilities,
    pub error: Option<String>,
    /// No further word will arrive.
    pub finished: bool,
}

/// Event-driven playback controller.
///
/// The player never waits on anything. Each handler mutates the stream and
/// returns the [`Command`]s needed to keep playback moving:
///
/// ```text
///   Paused ──toggle──▶ Playing ──tick──▶ advance ──┬─▶ ScheduleTick
///     ▲                   │                        └─▶ Fetch ──result──▶ ScheduleTick
///     └───toggle / end / error
/// ```
///
/// Only the most recently scheduled tick is honoured, so pausing or changing
/// speed never leaves two timers driving playback.
pub struct Player {
    stream: Box<dyn WordStream>,
    state: PlaybackState,
    wpm: u32,
    last_tick: TickId,
    pending_tick: Option<TickId>,
    quit: bool,
}

impl Player {
    /// Creates a paused player. The starting rate is clamped into range.
    pub fn new(stream: Box<dyn WordStream>, start_wpm: u32) -> Self {
        Self {
            stream,
            state: PlaybackState::Paused,
            wpm: clamp_wpm(start_wpm),
            last_tick: TickId::default(),
            pending_tick: None,
            quit: false,
        }
    }

    /// Commands to issue before the first event.
    pub fn init(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(request) = self.stream.start() {
            commands.push(Command::Fetch(request));
        }
        commands
    }

    // --------------------------------------------------------
    // Event Handlers
    // --------------------------------------------------------

    /// Handles a key action.
    pub fn handle_action(&mut self, action: Action) -> Vec<Command> {
        let mut commands = Vec::new();
        match action {
            Action::Quit => {
                tracing::debug!("Quit requested");
                self.quit = true;
                self.pending_tick = None;
                commands.push(Command::Quit);
            }
            Action::TogglePlay => self.toggle_play(&mut commands),
            Action::Faster => self.change_speed(i64::from(WPM_STEP), &mut commands),
            Action::Slower => self.change_speed(-i64::from(WPM_STEP), &mut commands),
            Action::SeekForward => {
                if self.stream.seekable() {
                    if let Some(request) = self.stream.advance() {
                        commands.push(Command::Fetch(request));
                    }
                }
            }
            Action::SeekBackward => {
                if self.stream.seekable() {
                    self.stream.retreat();
                }
            }
            Action::Restart => self.restart(&mut commands),
            Action::None => {}
        }
        self.enforce_error();
        commands
    }

    /// Handles a fired timer.
    pub fn handle_tick(&mut self, id: TickId) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.pending_tick != Some(id) {
            tracing::trace!("Ignoring superseded tick {}", id.value());
            return commands;
        }
        self.pending_tick = None;

        if !self.state.is_playing() || self.stream.error().is_some() {
            self.enforce_error();
            return commands;
        }

        if !self.stream.can_advance() {
            tracing::debug!("Reached the end of the stream, pausing");
            self.pause();
            return commands;
        }

        match self.stream.advance() {
            Some(request) => commands.push(Command::Fetch(request)),
            None if self.stream.awaiting_fetch() => {}
            None => commands.push(self.schedule_tick()),
        }
        commands
    }

    /// Handles a completed fetch.
    pub fn handle_fetch(&mut self, result: FetchResult) -> Vec<Command> {
        let mut commands = Vec::new();
        self.stream.handle_fetch(result);

        if self.stream.error().is_some() {
            self.enforce_error();
            return commands;
        }

        if self.stream.awaiting_fetch() {
            return commands;
        }

        if self.stream.current().is_some() {
            if self.state.is_playing() {
                commands.push(self.schedule_tick());
            }
        } else if !self.stream.can_advance() {
            self.pause();
        }
        commands
    }

    // --------------------------------------------------------
    // Transitions
    // --------------------------------------------------------

    fn toggle_play(&mut self, commands: &mut Vec<Command>) {
        if self.stream.error().is_some() {
            tracing::debug!("Refusing to play a stream in error state");
            return;
        }
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                tracing::debug!("Playing at {} wpm", self.wpm);
                if !self.stream.awaiting_fetch() {
                    commands.push(self.schedule_tick());
                }
            }
        }
    }

    fn change_speed(&mut self, delta: i64, commands: &mut Vec<Command>) {
        self.wpm = adjust_wpm(self.wpm, delta);
        tracing::debug!("Speed set to {} wpm", self.wpm);
        if self.state.is_playing() && !self.stream.awaiting_fetch() {
            commands.push(self.schedule_tick());
        }
    }

    fn restart(&mut self, commands: &mut Vec<Command>) {
        if !self.stream.restartable() {
            return;
        }
        tracing::debug!("Restarting playback");
        self.pending_tick = None;
        if let Some(request) = self.stream.restart() {
            commands.push(Command::Fetch(request));
            return;
        }
        if self.state.is_playing() && !self.stream.awaiting_fetch() {
            commands.push(self.schedule_tick());
        }
    }

    fn pause(&mut self) {
        self.state = PlaybackState::Paused;
        self.pending_tick = None;
    }

    fn enforce_error(&mut self) {
        if self.stream.error().is_some() && self.state.is_playing() {
            tracing::debug!("Stream error, forcing pause");
            self.pause();
        }
    }

    fn schedule_tick(&mut self) -> Command {
        self.last_tick = self.last_tick.next();
        self.pending_tick = Some(self.last_tick);
        Command::ScheduleTick {
            id: self.last_tick,
            after: self.interval(),
        }
    }

    // --------------------------------------------------------
    // Queries
    // --------------------------------------------------------

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    /// Current word interval.
    pub fn interval(&self) -> Duration {
        word_interval(self.wpm)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Tick the player is currently waiting for, if any.
    pub fn pending_tick(&self) -> Option<TickId> {
        self.pending_tick
    }

    pub fn stream(&self) -> &dyn WordStream {
        self.stream.as_ref()
    }

    pub fn view(&self) -> PlaybackView<'_> {
        PlaybackView {
            word: self.stream.current(),
            position: self.stream.position(),
            total: self.stream.total(),
            wpm: self.wpm,
            playing: self.state.is_playing(),
            capabilities: self.stream.capabilities(),
            error: self.stream.error().map(ToString::to_string),
            finished: !self.stream.can_advance() && !self.stream.awaiting_fetch(),
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("mode", &self.stream.mode())
            .field("state", &self.state)
            .field("wpm", &self.wpm)
            .field("pending_tick", &self.pending_tick)
            .field("quit", &self.quit)
            .finish_non_exhaustive()
    }
}
