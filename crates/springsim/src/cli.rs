//! Command-line interface for `springsim`.
//!
//! # Examples
//!
//! ```bash
//! # Run interactively at 60 fps
//! springsim
//!
//! # Log debug output to a file of your choice
//! springsim -vv --log-file /tmp/spring.log
//!
//! # Headless run: edit the mass to 12.5, then step 120 frames
//! springsim --self-check --frames 120 --keys m --answer 12.5
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Damped harmonic oscillator in the terminal.
///
/// Press m, k or b to edit mass, spring constant or damping constant,
/// Enter to restart the motion, r to restore defaults, q to quit.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(
    name = "springsim",
    author,
    version,
    about = "Damped harmonic oscillator in the terminal"
)]
pub struct Cli {
    /// Target frame rate, clamped to 1..=120
    #[arg(long, default_value_t = 60, env = "SPRINGSIM_FPS")]
    pub fps: u32,

    /// Disable alternate screen mode
    #[arg(long, env = "SPRINGSIM_NO_ALT_SCREEN")]
    pub no_alt_screen: bool,

    /// Force color output off
    ///
    /// Respects `NO_COLOR` environment variable
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Force color output on (overrides `NO_COLOR`)
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Write logs to this file instead of the default
    ///
    /// Interactive runs default to `springsim.log` in the temp directory.
    /// Headless runs log to stderr unless this is set.
    #[arg(long, env = "SPRINGSIM_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run headless self-check and exit
    ///
    /// Steps the simulation without a terminal and prints a JSON report
    #[arg(long)]
    pub self_check: bool,

    /// Frames to step in self-check mode
    #[arg(long, default_value_t = 60, env = "SPRINGSIM_FRAMES")]
    pub frames: u64,

    /// Keys pressed before the first self-check frame
    ///
    /// Special keys are written `<enter>`, `<esc>` and `<backspace>`
    #[arg(long)]
    pub keys: Option<String>,

    /// Answer for the next parameter prompt in self-check mode
    ///
    /// Repeat for several prompts
    #[arg(long = "answer", value_name = "TEXT")]
    pub answers: Vec<String>,

    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the resolved configuration
    Diagnostics,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Maps a `-v` count to a level.
    #[must_use]
    pub const fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
