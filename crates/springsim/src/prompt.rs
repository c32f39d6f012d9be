//! Modal numeric prompts.
//!
//! A prompt blocks the frame until the user submits or cancels. The
//! simulation only ever sees the raw text; [`parse_positive`] decides
//! whether it becomes a parameter value.

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEventKind},
    queue,
    style::{Print, ResetColor},
    terminal::{self, Clear, ClearType},
};

use crate::key::{Key, from_crossterm_key};

/// Something that can ask the user for a number.
pub trait NumberPrompt {
    /// Shows `label` and blocks until the user answers.
    ///
    /// Returns the entered text, or `None` if the prompt was cancelled.
    fn prompt(&mut self, label: &str) -> Option<String>;

    /// Takes the last terminal size seen while a prompt was open.
    ///
    /// A blocking prompt consumes events the frame loop never sees, so the
    /// caller asks for a pending resize after each frame.
    fn take_resize(&mut self) -> Option<(u16, u16)> {
        None
    }
}

/// Parses prompt text into a parameter value.
///
/// Surrounding whitespace is ignored. Only finite numbers strictly greater
/// than zero are accepted.
///
/// # Example
///
/// ```rust
/// use springsim::prompt::parse_positive;
///
/// assert_eq!(parse_positive("12.5"), Some(12.5));
/// assert_eq!(parse_positive(" 3 "), Some(3.0));
/// assert_eq!(parse_positive("0"), None);
/// assert_eq!(parse_positive("-5"), None);
/// assert_eq!(parse_positive("abc"), None);
/// ```
#[must_use]
pub fn parse_positive(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// A prompt that replays scripted answers.
///
/// Each call pops the next answer; once the script runs out every prompt is
/// treated as cancelled. The labels asked for are kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
    resize_on_prompt: Option<(u16, u16)>,
    resized: Option<(u16, u16)>,
}

impl ScriptedPrompt {
    /// Creates a prompt that answers with `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| Some(a.into())).collect(),
            ..Self::default()
        }
    }

    /// Queues a cancelled prompt.
    #[must_use]
    pub fn then_cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Reports a terminal resize to `width`×`height` once the next prompt
    /// has been shown.
    #[must_use]
    pub fn with_resize(mut self, width: u16, height: u16) -> Self {
        self.resize_on_prompt = Some((width, height));
        self
    }

    /// Labels of every prompt shown so far.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Number of answers not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl NumberPrompt for ScriptedPrompt {
    fn prompt(&mut self, label: &str) -> Option<String> {
        self.asked.push(label.to_string());
        if let Some(size) = self.resize_on_prompt.take() {
            self.resized = Some(size);
        }
        self.answers.pop_front().flatten()
    }

    fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }
}

/// A one-line editor drawn on the bottom row of the terminal.
///
/// Enter submits, Esc or Ctrl+C cancels, Backspace deletes the last
/// character. Terminal read errors cancel the prompt. A resize moves the
/// prompt to the new bottom row and is handed on through
/// [`NumberPrompt::take_resize`].
pub struct TerminalPrompt<W: Write> {
    writer: W,
    resized: Option<(u16, u16)>,
}

/// What one terminal event did to the line being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEdit {
    Submit,
    Cancel,
    Redraw,
    Ignore,
}

impl<W: Write> TerminalPrompt<W> {
    /// Creates a prompt writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            resized: None,
        }
    }

    fn draw(&mut self, label: &str, buffer: &str) -> io::Result<()> {
        let (_, rows) = terminal::size()?;
        let row = rows.saturating_sub(1);
        queue!(
            self.writer,
            MoveTo(0, row),
            ResetColor,
            Clear(ClearType::CurrentLine),
            Print(label),
            Print(' '),
            Print(buffer),
            Show
        )?;
        self.writer.flush()
    }

    fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
        let mut buffer = String::new();
        self.draw(label, &buffer)?;

        loop {
            match self.on_event(event::read()?, &mut buffer) {
                LineEdit::Submit => return Ok(Some(buffer)),
                LineEdit::Cancel => return Ok(None),
                LineEdit::Redraw => self.draw(label, &buffer)?,
                LineEdit::Ignore => {}
            }
        }
    }

    fn on_event(&mut self, event: Event, buffer: &mut String) -> LineEdit {
        let key_event = match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => key_event,
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized during prompt");
                self.resized = Some((width, height));
                return LineEdit::Redraw;
            }
            _ => return LineEdit::Ignore,
        };

        match from_crossterm_key(key_event.code, key_event.modifiers) {
            Key::Enter => LineEdit::Submit,
            Key::Esc | Key::CtrlC => LineEdit::Cancel,
            Key::Backspace => {
                buffer.pop();
                LineEdit::Redraw
            }
            Key::Char(c) => {
                buffer.push(c);
                LineEdit::Redraw
            }
            Key::Other => LineEdit::Ignore,
        }
    }
}

impl<W: Write> NumberPrompt for TerminalPrompt<W> {
    fn prompt(&mut self, label: &str) -> Option<String> {
        let answer = match self.read_line(label) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "prompt failed, treating as cancelled");
                None
            }
        };
        let _ = queue!(self.writer, Hide);
        let _ = self.writer.flush();
        answer
    }

    fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }
}
