//! Main event loop.
//!
//! One task owns the [`Player`]. Terminal input arrives through crossterm's
//! `EventStream`; timers and token reads run as background tasks that post
//! their completion back onto the [`EventBus`]. Events are handled strictly
//! one at a time, and the screen is redrawn after each.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::events::{AppEvent, DefaultKeyMapper, EventBus, KeyMapper};
use crate::player::{Command, Player};
use crate::runner::terminal::ReaderTerminal;
use crate::view;

/// Capacity of the event queue. Producers are the tick timer and at most
/// one fetch, so this is generous.
const EVENT_BUS_CAPACITY: usize = 64;

/// Drives a [`Player`] from terminal input, timers and fetch results.
pub struct EventLoop {
    player: Player,
    bus: EventBus,
    key_mapper: Box<dyn KeyMapper>,
    running: Arc<AtomicBool>,
    /// Timer for the pending tick; replaced whenever a new one is scheduled.
    tick_task: Option<JoinHandle<()>>,
    /// Outstanding token reads.
    background_tasks: Vec<JoinHandle<()>>,
}

impl EventLoop {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            bus: EventBus::new(EVENT_BUS_CAPACITY),
            key_mapper: Box::new(DefaultKeyMapper::new()),
            running: Arc::new(AtomicBool::new(false)),
            tick_task: None,
            background_tasks: Vec::new(),
        }
    }

    /// Replace the default key bindings.
    pub fn with_key_mapper(mut self, mapper: impl KeyMapper + 'static) -> Self {
        self.key_mapper = Box::new(mapper);
        self
    }

    /// Run until the player quits or the terminal input ends.
    pub async fn run(&mut self, terminal: &mut ReaderTerminal) -> Result<()> {
        self.start();
        self.render(terminal)?;

        let mut terminal_events = EventStream::new();

        loop {
            if !self.is_running() {
                break;
            }

            tokio::select! {
                maybe_event = terminal_events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(event) = AppEvent::from_terminal(event) {
                            self.dispatch(event);
                        }
                    }
                    Some(Err(e)) => {
                        tracing::error!("Terminal input error: {}", e);
                        self.stop();
                        self.cleanup_background_tasks();
                        return Err(e.into());
                    }
                    None => {
                        tracing::debug!("Terminal input closed");
                        self.stop();
                    }
                },

                Some(event) = self.bus.recv() => self.dispatch(event),
            }

            if self.is_running() {
                self.render(terminal)?;
            }
        }

        self.cleanup_background_tasks();
        Ok(())
    }

    /// Mark the loop running and issue the player's initial commands.
    pub(crate) fn start(&mut self) {
        self.running.store(true, Ordering::SeqCst);
        let commands = self.player.init();
        self.execute(commands);
    }

    /// Handle one event and carry out the resulting commands.
    pub(crate) fn dispatch(&mut self, event: AppEvent) {
        let commands = match event {
            AppEvent::Key(key) => {
                let action = self.key_mapper.map_key(key);
                self.player.handle_action(action)
            }
            AppEvent::Resize(width, height) => {
                tracing::trace!("Resized to {}x{}", width, height);
                Vec::new()
            }
            AppEvent::Tick(id) => self.player.handle_tick(id),
            AppEvent::Fetched(result) => self.player.handle_fetch(result),
        };
        self.execute(commands);
    }

    fn execute(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::ScheduleTick { id, after } => {
                    if let Some(previous) = self.tick_task.take() {
                        previous.abort();
                    }
                    let tx = self.bus.sender();
                    self.tick_task = Some(tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = tx.send(AppEvent::Tick(id)).await;
                    }));
                }
                Command::Fetch(request) => {
                    self.background_tasks.retain(|task| !task.is_finished());
                    let tx = self.bus.sender();
                    self.background_tasks.push(tokio::spawn(async move {
                        let result = request.run().await;
                        let _ = tx.send(AppEvent::Fetched(result)).await;
                    }));
                }
                Command::Quit => self.stop(),
            }
        }
    }

    fn render(&self, terminal: &mut ReaderTerminal) -> Result<()> {
        let snapshot = self.player.view();
        terminal.draw(|frame| view::render(frame, &snapshot))
    }

    /// Abort the timer and any outstanding reads.
    ///
    /// A read already running on the blocking pool finishes on its own; its
    /// result is dropped along with the channel.
    fn cleanup_background_tasks(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
        for task in self.background_tasks.drain(..) {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && !self.player.should_quit()
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}
