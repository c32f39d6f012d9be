//! Runtime configuration.
//!
//! [`Config`] is the single source of truth for runtime options,
//! independent of whether they came from flags or environment variables.
//! Tests construct it directly without parsing a command line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::{Cli, LogLevel};
use crate::key::{Key, parse_key_script};

/// Lowest accepted frame rate.
pub const MIN_FPS: u32 = 1;
/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 120;

/// Log file name used when none is given.
pub const DEFAULT_LOG_FILE: &str = "springsim.log";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Target frames per second, within `MIN_FPS..=MAX_FPS`.
    pub fps: u32,

    /// Color output mode.
    pub color_mode: ColorMode,

    /// Whether to use alternate screen mode.
    pub alt_screen: bool,

    /// Explicit log file.
    pub log_file: Option<PathBuf>,

    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,

    /// Whether running in headless self-check mode.
    pub self_check: bool,

    /// Frames stepped by the self-check.
    pub frames: u64,

    /// Keys injected before the first self-check frame.
    pub keys: String,

    /// Scripted prompt answers for the self-check.
    pub answers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            color_mode: ColorMode::Auto,
            alt_screen: true,
            log_file: None,
            verbosity: 0,
            self_check: false,
            frames: 60,
            keys: String::new(),
            answers: Vec::new(),
        }
    }
}

impl Config {
    /// Create config from CLI arguments.
    ///
    /// The frame rate is clamped into range.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let color_mode = if cli.force_color {
            ColorMode::Always
        } else if cli.no_color {
            ColorMode::Never
        } else {
            ColorMode::Auto
        };

        Self {
            fps: cli.fps.clamp(MIN_FPS, MAX_FPS),
            color_mode,
            alt_screen: !cli.no_alt_screen,
            log_file: cli.log_file.clone(),
            verbosity: cli.verbose,
            self_check: cli.self_check,
            frames: cli.frames,
            keys: cli.keys.clone().unwrap_or_default(),
            answers: cli.answers.clone(),
        }
    }

    /// Check if colors should be used.
    #[must_use]
    pub fn use_color(&self) -> bool {
        match self.color_mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Check if running in headless mode.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.self_check
    }

    /// Log level for the configured verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        LogLevel::from_verbosity(self.verbosity)
    }

    /// Where logs go: the explicit file, a temp-dir file for interactive
    /// runs, or `None` (stderr) for headless runs.
    #[must_use]
    pub fn effective_log_file(&self) -> Option<PathBuf> {
        match (&self.log_file, self.self_check) {
            (Some(path), _) => Some(path.clone()),
            (None, false) => Some(std::env::temp_dir().join(DEFAULT_LOG_FILE)),
            (None, true) => None,
        }
    }

    /// The parsed key script.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKey`] for an unknown `<...>` name.
    pub fn key_script(&self) -> Result<Vec<Key>, ConfigError> {
        parse_key_script(&self.keys).map_err(ConfigError::InvalidKey)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::FpsOutOfRange(self.fps));
        }

        if self.self_check && self.frames == 0 {
            return Err(ConfigError::NoFrames);
        }

        self.key_script()?;

        if let Some(ref path) = self.log_file {
            if path.is_dir() {
                return Err(ConfigError::LogFileIsDirectory(path.clone()));
            }
            let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
            if let Some(dir) = parent
                && !dir.is_dir()
            {
                return Err(ConfigError::LogDirNotFound(dir.to_path_buf()));
            }
        }

        Ok(())
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("FPS: {}", self.fps));
        lines.push(format!("Color mode: {:?}", self.color_mode));
        lines.push(format!(
            "Alt screen: {}",
            if self.alt_screen { "on" } else { "off" }
        ));
        match self.effective_log_file() {
            Some(path) => lines.push(format!("Log file: {}", path.display())),
            None => lines.push("Log file: stderr".to_string()),
        }
        lines.push(format!("Verbosity: {}", self.verbosity));
        lines.push(format!("Self-check: {}", self.self_check));
        if self.self_check {
            lines.push(format!("Frames: {}", self.frames));
            lines.push(format!("Keys: {:?}", self.keys));
            lines.push(format!("Answers: {:?}", self.answers));
        }

        lines.join("\n")
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Use colors unless `NO_COLOR` is set.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Frame rate outside the accepted range.
    #[error("fps must be between 1 and 120, got {0}")]
    FpsOutOfRange(u32),

    /// Self-check asked to step zero frames.
    #[error("self-check needs at least one frame")]
    NoFrames,

    /// Unknown key name in the key script.
    #[error("invalid key in script: {0}")]
    InvalidKey(String),

    /// Log file directory does not exist.
    #[error("Log directory not found: {0}")]
    LogDirNotFound(PathBuf),

    /// Log file path names a directory.
    #[error("Log file is a directory: {0}")]
    LogFileIsDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = Config::default();

        assert_eq!(config.fps, 60);
        assert_eq!(config.color_mode, ColorMode::Auto);
        assert!(config.alt_screen);
        assert!(config.log_file.is_none());
        assert!(!config.self_check);
        assert_eq!(config.frames, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_from_cli_clamps_fps() {
        let cli = Cli::try_parse_from(["springsim", "--fps", "500"]).unwrap();
        assert_eq!(Config::from_cli(&cli).fps, 120);

        let cli = Cli::try_parse_from(["springsim", "--fps", "0"]).unwrap();
        assert_eq!(Config::from_cli(&cli).fps, 1);
    }

    #[test]
    fn config_from_cli_color_modes() {
        let cli = Cli::try_parse_from(["springsim", "--no-color"]).unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.color_mode, ColorMode::Never);
        assert!(!config.use_color());

        let cli = Cli::try_parse_from(["springsim", "--force-color"]).unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.color_mode, ColorMode::Always);
        assert!(config.use_color());
    }

    #[test]
    fn config_from_cli_flags() {
        let cli = Cli::try_parse_from([
            "springsim",
            "--no-alt-screen",
            "--self-check",
            "--keys",
            "m<enter>",
            "--answer",
            "7",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);

        assert!(!config.alt_screen);
        assert!(config.is_headless());
        assert_eq!(config.key_script().unwrap(), vec![Key::Char('m'), Key::Enter]);
        assert_eq!(config.answers, ["7"]);
    }

    #[test]
    fn effective_log_file_by_mode() {
        let config = Config::default();
        assert_eq!(
            config.effective_log_file(),
            Some(std::env::temp_dir().join(DEFAULT_LOG_FILE))
        );

        let config = Config {
            self_check: true,
            ..Config::default()
        };
        assert_eq!(config.effective_log_file(), None);

        let config = Config {
            self_check: true,
            log_file: Some(PathBuf::from("run.log")),
            ..Config::default()
        };
        assert_eq!(config.effective_log_file(), Some(PathBuf::from("run.log")));
    }

    #[test]
    fn validate_rejects_fps_out_of_range() {
        let config = Config {
            fps: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FpsOutOfRange(0)));
    }

    #[test]
    fn validate_rejects_zero_frames() {
        let config = Config {
            self_check: true,
            frames: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoFrames));
    }

    #[test]
    fn validate_rejects_unknown_key_name() {
        let config = Config {
            keys: "m<tab>".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidKey("<tab>".to_string()))
        );
    }

    #[test]
    fn validate_checks_log_location() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config {
            log_file: Some(dir.path().join("springsim.log")),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        let config = Config {
            log_file: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LogFileIsDirectory(_))
        ));

        let missing = dir.path().join("missing").join("springsim.log");
        let config = Config {
            log_file: Some(missing),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LogDirNotFound(_))
        ));
    }

    #[test]
    fn diagnostic_string_lists_settings() {
        let config = Config {
            self_check: true,
            frames: 12,
            ..Config::default()
        };
        let diag = config.to_diagnostic_string();

        assert!(diag.contains("FPS: 60"));
        assert!(diag.contains("Alt screen: on"));
        assert!(diag.contains("Log file: stderr"));
        assert!(diag.contains("Frames: 12"));
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
