#![forbid(unsafe_code)]

//! `springsim` binary.
//!
//! ```bash
//! cargo run -p springsim
//! cargo run -p springsim -- --self-check --frames 120
//! ```

use anyhow::Context;

use springsim::cli::{Cli, Command};
use springsim::config::Config;
use springsim::program::Program;
use springsim::simulation::Simulation;
use springsim::{headless, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::from_cli(&cli);

    if let Some(Command::Diagnostics) = cli.command {
        println!("{}", config.to_diagnostic_string());
        return Ok(());
    }

    config.validate().context("invalid configuration")?;
    let log_file = logging::init(&config).context("failed to set up logging")?;
    tracing::debug!(log_file = ?log_file, fps = config.fps, "configuration loaded");

    if config.is_headless() {
        let report = headless::run(&config).context("self-check failed")?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let sim = Program::new(Simulation::new())
        .with_fps(config.fps)
        .with_alt_screen(config.alt_screen)
        .with_color(config.use_color())
        .run()
        .inspect_err(|err| tracing::error!(error = %err, "terminal run failed"))
        .context("failed to run simulation")?;

    tracing::info!(frames = sim.frames(), "exited");
    Ok(())
}
