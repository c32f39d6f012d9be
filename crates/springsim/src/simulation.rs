//! The per-frame simulation loop.
//!
//! Each frame runs three phases in order:
//!
//! 1. **Input**: drain pending events, applying edits and resets.
//! 2. **Physics**: [`SUBSTEPS`] integration steps of [`SUBSTEP_DT`], each
//!    writing the new displacement into the pending history slot, then one
//!    history advance.
//! 3. **Render**: compose the frame on a [`Surface`].
//!
//! Because the history cursor only moves once per frame, every sub-step
//! writes the same slot and the committed sample is the displacement at the
//! end of the frame.

use oscillator::{Oscillator, Parameter, fps};

use crate::command::Command;
use crate::history::HistoryBuffer;
use crate::input::InputEvent;
use crate::prompt::{NumberPrompt, parse_positive};
use crate::render::{RenderStats, render};
use crate::surface::Surface;

/// Rendered frames per simulated second.
pub const FRAME_RATE: u32 = 60;

/// Physics steps per rendered frame.
pub const SUBSTEPS: u32 = 10;

/// Length of one physics step, `1/600` s.
pub const SUBSTEP_DT: f64 = fps(FRAME_RATE * SUBSTEPS);

/// Everything the simulation mutates: the oscillator and its history.
#[derive(Debug, Clone, Default)]
pub struct SimState {
    /// Parameters and motion.
    pub oscillator: Oscillator,
    /// Displacement samples for the strip chart.
    pub history: HistoryBuffer,
}

impl SimState {
    /// Advances the oscillator by `dt` and records the new displacement in
    /// the pending history slot.
    pub fn integrate(&mut self, dt: f64) {
        let y = self.oscillator.integrate(dt);
        self.history.record(y);
    }

    /// Clears motion and history; parameters are kept.
    pub fn soft_reset(&mut self) {
        self.history.reset();
        self.oscillator.reset_motion();
    }

    /// Clears motion and history and restores default parameters.
    pub fn full_reset(&mut self) {
        self.history.reset();
        self.oscillator.reset();
    }
}

/// Whether the loop should keep going after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// A quit command was received.
    Quit,
}

/// Outcome of one parameter edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// The value was committed.
    Applied(f64),
    /// The text was not a finite positive number.
    Rejected,
    /// The prompt was cancelled.
    Cancelled,
}

/// Owns the simulation state and drives it frame by frame.
///
/// # Example
///
/// ```rust
/// use springsim::prompt::ScriptedPrompt;
/// use springsim::simulation::Simulation;
/// use springsim::surface::RecordingSurface;
///
/// let mut sim = Simulation::new();
/// let mut prompt = ScriptedPrompt::default();
/// let mut surface = RecordingSurface::new(1280, 720);
///
/// sim.frame(Vec::new(), &mut prompt, &mut surface);
///
/// assert_eq!(sim.state().history.count(), 1);
/// assert_eq!(surface.frames(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    state: SimState,
    frames: u64,
}

impl Simulation {
    /// Creates a simulation at the default state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Number of frames stepped so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Prompts for a new value of `parameter` and commits it if valid.
    pub fn edit<P: NumberPrompt + ?Sized>(
        &mut self,
        parameter: Parameter,
        prompt: &mut P,
    ) -> EditOutcome {
        let label = format!("{}:", parameter.label());
        tracing::debug!(%parameter, "editing");

        let Some(text) = prompt.prompt(&label) else {
            tracing::debug!(%parameter, "edit cancelled");
            return EditOutcome::Cancelled;
        };

        match parse_positive(&text).map(|v| self.state.oscillator.set_param(parameter, v)) {
            Some(Ok(())) => {
                let value = self.state.oscillator.params().get(parameter);
                tracing::info!(%parameter, value, "parameter updated");
                EditOutcome::Applied(value)
            }
            Some(Err(err)) => {
                tracing::debug!(error = %err, "edit rejected");
                EditOutcome::Rejected
            }
            None => {
                tracing::debug!(
                    %parameter,
                    input = %text,
                    "edit rejected, not a positive number"
                );
                EditOutcome::Rejected
            }
        }
    }

    /// Applies one command.
    pub fn apply<P: NumberPrompt + ?Sized>(
        &mut self,
        command: Command,
        prompt: &mut P,
    ) -> Flow {
        match command {
            Command::Edit(parameter) => {
                self.edit(parameter, prompt);
            }
            Command::SoftReset => {
                tracing::info!("soft reset");
                self.state.soft_reset();
            }
            Command::FullReset => {
                tracing::info!("full reset");
                self.state.full_reset();
            }
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Input phase: applies every event in order.
    ///
    /// Stops early and returns [`Flow::Quit`] on a quit command; events after
    /// it are dropped. Events that map to no command are ignored.
    pub fn handle_input<I, P>(&mut self, events: I, prompt: &mut P) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
        P: NumberPrompt + ?Sized,
    {
        for event in events {
            let InputEvent::Key(key) = event else {
                continue;
            };
            let Some(command) = Command::from_key(key) else {
                tracing::trace!(%key, "ignored key");
                continue;
            };
            if self.apply(command, prompt) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Physics phase plus history bookkeeping for one frame.
    pub fn step_physics(&mut self) {
        for _ in 0..SUBSTEPS {
            self.state.integrate(SUBSTEP_DT);
        }
        self.state.history.advance();
        self.frames += 1;
    }

    /// Runs one complete frame: input, physics, render.
    ///
    /// Returns [`Flow::Quit`] without stepping or drawing if a quit command
    /// arrived.
    pub fn frame<I, P, S>(&mut self, events: I, prompt: &mut P, surface: &mut S) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
        P: NumberPrompt + ?Sized,
        S: Surface + ?Sized,
    {
        if self.handle_input(events, prompt) == Flow::Quit {
            return Flow::Quit;
        }
        self.step_physics();
        self.render(surface);
        Flow::Continue
    }

    /// Render phase on its own.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> RenderStats {
        render(&self.state, surface)
    }
}
