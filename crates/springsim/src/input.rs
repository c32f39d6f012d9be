//! Input sources.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

use crate::key::{Key, from_crossterm_key};

/// An input event delivered to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(Key),
    /// The display changed size, in terminal cells.
    Resize {
        /// New width.
        width: u16,
        /// New height.
        height: u16,
    },
}

/// Something that yields pending input without blocking.
pub trait InputSource {
    /// Returns every event that arrived since the last call.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device can no longer be read.
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
}

/// Terminal input through crossterm.
///
/// Only key presses and resizes are reported; key releases, mouse, focus
/// and paste events are dropped.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    /// Creates a terminal input source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Only handle key press events, not release
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    events.push(InputEvent::Key(from_crossterm_key(
                        key_event.code,
                        key_event.modifiers,
                    )));
                }
                Event::Resize(width, height) => {
                    events.push(InputEvent::Resize { width, height });
                }
                _ => {}
            }
        }
        Ok(events)
    }
}

/// Replays a fixed list of batches, one batch per poll.
///
/// Once the script is exhausted every poll returns no events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    /// Creates an input source that delivers `keys` on the first poll.
    #[must_use]
    pub fn keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self::default().then(keys.into_iter().map(InputEvent::Key))
    }

    /// Appends one more batch, delivered on the following poll.
    #[must_use]
    pub fn then(mut self, batch: impl IntoIterator<Item = InputEvent>) -> Self {
        self.batches.push_back(batch.into_iter().collect());
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}
