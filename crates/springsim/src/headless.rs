//! Headless self-check.
//!
//! Steps the simulation against scripted input and a recording surface,
//! then summarizes the final state as a serializable report. No terminal
//! is touched, so this runs in CI.

use std::io;

use serde::Serialize;

use oscillator::{Motion, Params};

use crate::config::{Config, ConfigError};
use crate::input::{InputSource, ScriptedInput};
use crate::prompt::ScriptedPrompt;
use crate::render::{RenderStats, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::simulation::{Flow, Simulation};
use crate::surface::RecordingSurface;

/// Errors raised by [`run`].
#[derive(Debug, thiserror::Error)]
pub enum SelfCheckError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scripted input failed.
    #[error("input error: {0}")]
    Input(#[from] io::Error),
}

/// Physical parameters at the end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamsReport {
    /// Mass `m` in kg.
    pub mass: f64,
    /// Spring constant `k` in N/m.
    pub spring_constant: f64,
    /// Damping constant `B` in kg/s.
    pub damping_constant: f64,
    /// Unstretched spring length `L`.
    pub unstretched_length: f64,
}

impl From<Params> for ParamsReport {
    fn from(p: Params) -> Self {
        Self {
            mass: p.mass(),
            spring_constant: p.spring_constant(),
            damping_constant: p.damping_constant(),
            unstretched_length: p.unstretched_length(),
        }
    }
}

/// Motion state at the end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionReport {
    /// Displacement from equilibrium.
    pub y: f64,
    /// Velocity, `dy/dt`.
    pub yp: f64,
    /// Acceleration, `d²y/dt²`.
    pub ypp: f64,
}

impl From<Motion> for MotionReport {
    fn from(m: Motion) -> Self {
        Self {
            y: m.y,
            yp: m.yp,
            ypp: m.ypp,
        }
    }
}

/// Summary printed by `--self-check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfCheckReport {
    /// Frames actually stepped.
    pub frames: u64,
    /// Whether the script ended the run with a quit key.
    pub quit: bool,
    /// Parameters after all scripted edits.
    pub params: ParamsReport,
    /// Motion state after the last frame.
    pub motion: MotionReport,
    /// Samples visible in the strip chart.
    pub history_count: usize,
    /// Drawing calls in the last presented frame, including the present.
    pub last_frame_calls: usize,
    /// Drawing calls that failed over the whole run.
    pub draw_failures: usize,
    /// Prompt labels shown, in order.
    pub prompts: Vec<String>,
    /// Scripted answers left unused.
    pub unused_answers: usize,
}

/// Runs the self-check described by `config`.
///
/// Keys from the script are delivered before the first frame.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn run(config: &Config) -> Result<SelfCheckReport, SelfCheckError> {
    config.validate()?;

    let mut input = ScriptedInput::keys(config.key_script()?);
    let mut prompt = ScriptedPrompt::new(config.answers.iter().cloned());
    let mut surface = RecordingSurface::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut sim = Simulation::new();

    let mut quit = false;
    let mut last = RenderStats::default();
    let mut draw_failures = 0;

    tracing::info!(frames = config.frames, keys = %config.keys, "self-check started");

    for _ in 0..config.frames {
        let events = input.poll_events()?;
        if sim.handle_input(events, &mut prompt) == Flow::Quit {
            quit = true;
            break;
        }
        sim.step_physics();
        last = sim.render(&mut surface);
        draw_failures += last.failures;
    }

    let state = sim.state();
    let report = SelfCheckReport {
        frames: sim.frames(),
        quit,
        params: state.oscillator.params().into(),
        motion: state.oscillator.motion().into(),
        history_count: state.history.count(),
        last_frame_calls: last.calls,
        draw_failures,
        prompts: prompt.asked().to_vec(),
        unused_answers: prompt.remaining(),
    };

    tracing::info!(
        frames = report.frames,
        y = report.motion.y,
        history = report.history_count,
        "self-check finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(frames: u64, keys: &str, answers: &[&str]) -> Config {
        Config {
            self_check: true,
            frames,
            keys: keys.to_string(),
            answers: answers.iter().map(ToString::to_string).collect(),
            ..Config::default()
        }
    }

    #[test]
    fn default_run_counts_frames() {
        let report = run(&config(60, "", &[])).unwrap();

        assert_eq!(report.frames, 60);
        assert!(!report.quit);
        assert_eq!(report.history_count, 60);
        // clear + 6 texts + mass + spring + 2 axes + 60 points + present
        assert_eq!(report.last_frame_calls, 72);
        assert_eq!(report.draw_failures, 0);
        assert!((report.motion.y - 0.369_710_605_205_951_17).abs() < 1e-12);
    }

    #[test]
    fn scripted_edit_applies() {
        let report = run(&config(1, "m", &["12.5"])).unwrap();

        assert_eq!(report.params.mass, 12.5);
        assert_eq!(report.prompts, ["Mass (m):"]);
        assert_eq!(report.unused_answers, 0);
    }

    #[test]
    fn quit_key_stops_before_first_frame() {
        let report = run(&config(10, "q", &[])).unwrap();

        assert!(report.quit);
        assert_eq!(report.frames, 0);
        assert_eq!(report.history_count, 0);
        assert_eq!(report.last_frame_calls, 0);
    }

    #[test]
    fn invalid_config_rejected() {
        let err = run(&config(0, "", &[])).unwrap_err();
        assert!(matches!(err, SelfCheckError::Config(ConfigError::NoFrames)));
    }

    #[test]
    fn report_describes_final_motion() {
        let report = run(&config(1, "", &[])).unwrap();

        assert_eq!(report.params.spring_constant, 10.0);
        assert_eq!(report.params.damping_constant, 5.0);
        assert_eq!(report.params.unstretched_length, 1.0);
        assert!((report.motion.y - 0.996_418).abs() < 1e-6);
        assert!((report.motion.yp + 0.032_983).abs() < 1e-6);
        assert!((report.motion.ypp + 1.959_854).abs() < 1e-6);
    }

    #[test]
    fn report_serializes() {
        let report = run(&config(1, "", &[])).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["frames"], 1);
        assert_eq!(json["params"]["mass"], 5.0);
        assert_eq!(json["history_count"], 1);
    }
}
