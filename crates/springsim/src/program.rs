//! Interactive frame runner.
//!
//! [`Program`] owns a [`Simulation`] and drives it on a real terminal:
//! raw mode, optional alternate screen, hidden cursor, window title. The
//! terminal is restored on every exit path, including errors.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};

use crate::canvas::TerminalCanvas;
use crate::input::{InputEvent, InputSource, TerminalInput};
use crate::prompt::{NumberPrompt, TerminalPrompt};
use crate::render::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::simulation::{Flow, Simulation};
use crate::surface::{Rgba, Surface, SurfaceError};

/// Window title set while running.
pub const TITLE: &str = "Spring Simulation";

/// Errors that can end an interactive run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error during terminal operations.
    ///
    /// Usually means stdout is not a terminal or was closed.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to enable or disable raw mode.
    #[error("failed to {action} raw mode: {source}")]
    RawModeFailure {
        /// Whether we were trying to enable or disable raw mode.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to enter or exit the alternate screen.
    ///
    /// Try running with `--no-alt-screen`.
    #[error("failed to {action} alternate screen: {source}")]
    AltScreenFailure {
        /// Whether we were trying to enter or exit alt screen.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to poll for terminal events.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// The first frame could not be drawn.
    ///
    /// Failures on later frames are logged and skipped.
    #[error("failed to render frame: {0}")]
    Render(#[source] SurfaceError),
}

/// A specialized [`Result`] type for the frame runner.
pub type Result<T> = std::result::Result<T, Error>;

/// Options for [`Program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOptions {
    /// Use alternate screen buffer.
    pub alt_screen: bool,
    /// Emit colors.
    pub color: bool,
    /// Target frames per second.
    pub fps: u32,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: true,
            color: true,
            fps: 60,
            max_frames: None,
        }
    }
}

/// The interactive runner.
///
/// # Example
///
/// ```rust,ignore
/// use springsim::program::Program;
/// use springsim::simulation::Simulation;
///
/// let sim = Program::new(Simulation::new()).with_fps(60).run()?;
/// println!("ran {} frames", sim.frames());
/// ```
pub struct Program {
    sim: Simulation,
    options: ProgramOptions,
}

impl Program {
    /// Create a new program around a simulation.
    #[must_use]
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            options: ProgramOptions::default(),
        }
    }

    /// Set the target frames per second.
    ///
    /// Default is 60 FPS. Valid range is 1-120 FPS.
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.options.fps = fps.clamp(1, 120);
        self
    }

    /// Use or skip the alternate screen buffer.
    #[must_use]
    pub fn with_alt_screen(mut self, alt_screen: bool) -> Self {
        self.options.alt_screen = alt_screen;
        self
    }

    /// Enable or disable colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.options.color = color;
        self
    }

    /// Stop after `frames` frames.
    #[must_use]
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.options.max_frames = Some(frames);
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &ProgramOptions {
        &self.options
    }

    /// Run on stdout until a quit command and return the final simulation.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, polled, or drawn
    /// on for the first frame.
    pub fn run(self) -> Result<Simulation> {
        let (cols, rows) = terminal::size()?;
        let mut input = TerminalInput::new();
        let mut prompt = TerminalPrompt::new(io::stdout());
        self.run_with_writer(io::stdout(), (cols, rows), &mut input, &mut prompt)
    }

    /// Run with a custom writer, grid size, input and prompt.
    ///
    /// Raw mode is enabled for the duration of the run.
    ///
    /// # Errors
    ///
    /// See [`Program::run`].
    pub fn run_with_writer<W, I, P>(
        self,
        mut writer: W,
        grid: (u16, u16),
        input: &mut I,
        prompt: &mut P,
    ) -> Result<Simulation>
    where
        W: Write,
        I: InputSource + ?Sized,
        P: NumberPrompt + ?Sized,
    {
        let options = self.options.clone();

        enable_raw_mode().map_err(|source| Error::RawModeFailure {
            action: "enable",
            source,
        })?;

        let result = Self::setup(&mut writer, &options).and_then(|()| {
            let (cols, rows) = grid;
            let mut canvas =
                TerminalCanvas::new(&mut writer, SCREEN_WIDTH, SCREEN_HEIGHT, cols, rows)
                    .with_color(options.color);
            self.event_loop(&mut canvas, input, prompt)
        });

        // Cleanup terminal
        let _ = execute!(writer, Show);
        if options.alt_screen {
            let _ = execute!(writer, LeaveAlternateScreen);
        }
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(error = %err, "failed to disable raw mode");
        }

        result
    }

    fn setup<W: Write>(writer: &mut W, options: &ProgramOptions) -> Result<()> {
        if options.alt_screen {
            execute!(writer, EnterAlternateScreen).map_err(|source| Error::AltScreenFailure {
                action: "enter",
                source,
            })?;
        }
        execute!(writer, Hide, SetTitle(TITLE))?;
        Ok(())
    }

    /// Drives frames on `canvas` until quit or the frame limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the first frame cannot be drawn and
    /// [`Error::EventPoll`] if input can no longer be read.
    pub fn event_loop<W, I, P>(
        mut self,
        canvas: &mut TerminalCanvas<W>,
        input: &mut I,
        prompt: &mut P,
    ) -> Result<Simulation>
    where
        W: Write,
        I: InputSource + ?Sized,
        P: NumberPrompt + ?Sized,
    {
        let frame_duration = Duration::from_secs_f64(1.0 / f64::from(self.options.fps));
        tracing::info!(fps = self.options.fps, grid = ?canvas.grid(), "simulation started");

        canvas.clear(Rgba::BLACK).map_err(Error::Render)?;
        canvas.present().map_err(Error::Render)?;

        loop {
            let started = Instant::now();

            let events = input.poll_events().map_err(Error::EventPoll)?;
            for event in &events {
                if let InputEvent::Resize { width, height } = *event {
                    tracing::debug!(width, height, "terminal resized");
                    canvas.resize(width, height);
                }
            }
            // A prompt may have drawn over the canvas
            if !events.is_empty() {
                canvas.invalidate();
            }

            let flow = self.sim.frame(events, prompt, canvas);
            if let Some((width, height)) = prompt.take_resize() {
                tracing::debug!(width, height, "terminal resized while prompting");
                canvas.resize(width, height);
            }
            if flow == Flow::Quit {
                tracing::info!(frames = self.sim.frames(), "quit requested");
                break;
            }

            if self
                .options
                .max_frames
                .is_some_and(|max| self.sim.frames() >= max)
            {
                tracing::info!(frames = self.sim.frames(), "frame limit reached");
                break;
            }

            if let Some(rest) = frame_duration.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }

        Ok(self.sim)
    }
}
