//! End-to-end tests for the springsim binary.
//!
//! Only headless paths are exercised; the interactive mode needs a TTY.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the springsim binary.
#[allow(deprecated)]
fn springsim_cmd() -> Command {
    let mut cmd = Command::cargo_bin("springsim").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env_remove("SPRINGSIM_FPS")
        .env_remove("SPRINGSIM_FRAMES")
        .env_remove("SPRINGSIM_LOG_FILE")
        .env_remove("SPRINGSIM_NO_ALT_SCREEN");
    cmd
}

fn report(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Self-check
// =============================================================================

mod self_check {
    use super::*;

    #[test]
    fn test_default_self_check() {
        let json = report(springsim_cmd().arg("--self-check"));

        assert_eq!(json["frames"], 60);
        assert_eq!(json["history_count"], 60);
        assert_eq!(json["quit"], false);
        assert_eq!(json["params"]["mass"], 5.0);
        assert_eq!(json["params"]["spring_constant"], 10.0);
        assert_eq!(json["params"]["damping_constant"], 5.0);
        let y = json["motion"]["y"].as_f64().unwrap();
        assert!((y - 0.369_710_605_205_951_17).abs() < 1e-12);
    }

    #[test]
    fn test_frames_flag() {
        let json = report(springsim_cmd().args(["--self-check", "--frames", "5"]));
        assert_eq!(json["frames"], 5);
        assert_eq!(json["history_count"], 5);
    }

    #[test]
    fn test_frames_from_env() {
        let json = report(
            springsim_cmd()
                .arg("--self-check")
                .env("SPRINGSIM_FRAMES", "3"),
        );
        assert_eq!(json["frames"], 3);
    }

    #[test]
    fn test_scripted_edits() {
        let json = report(springsim_cmd().args([
            "--self-check",
            "--frames",
            "1",
            "--keys",
            "mkb",
            "--answer",
            "12.5",
            "--answer",
            "oops",
            "--answer",
            "2",
        ]));

        assert_eq!(json["params"]["mass"], 12.5);
        assert_eq!(json["params"]["spring_constant"], 10.0);
        assert_eq!(json["params"]["damping_constant"], 2.0);
        assert_eq!(json["unused_answers"], 0);
        assert_eq!(
            json["prompts"],
            serde_json::json!(["Mass (m):", "Spring constant (k):", "Damping constant (B):"])
        );
    }

    #[test]
    fn test_full_reset_key() {
        let json = report(springsim_cmd().args([
            "--self-check",
            "--frames",
            "2",
            "--keys",
            "mr",
            "--answer",
            "9",
        ]));
        assert_eq!(json["params"]["mass"], 5.0);
        assert_eq!(json["history_count"], 2);
    }

    #[test]
    fn test_quit_key() {
        springsim_cmd()
            .args(["--self-check", "--keys", "<esc>"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"quit\": true"))
            .stdout(predicate::str::contains("\"frames\": 0"));
    }

    #[test]
    fn test_logs_to_stderr_when_verbose() {
        springsim_cmd()
            .args(["--self-check", "--frames", "1", "-v"])
            .assert()
            .success()
            .stderr(predicate::str::contains("self-check finished"));
    }

    #[test]
    fn test_logs_to_file() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("run.log");

        springsim_cmd()
            .args(["--self-check", "--frames", "1", "-v", "--log-file"])
            .arg(&log)
            .assert()
            .success()
            .stderr(predicate::str::is_empty());

        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(contents.contains("self-check started"));
        assert!(!contents.contains('\u{1b}'), "log file contains ANSI escapes");
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

mod diagnostics {
    use super::*;

    #[test]
    fn test_prints_resolved_config() {
        springsim_cmd()
            .args(["--fps", "500", "--no-alt-screen", "diagnostics"])
            .assert()
            .success()
            .stdout(predicate::str::contains("FPS: 120"))
            .stdout(predicate::str::contains("Alt screen: off"));
    }
}

// =============================================================================
// Error Handling
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_invalid_fps() {
        springsim_cmd()
            .args(["--fps", "fast"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--fps"));
    }

    #[test]
    fn test_unknown_flag() {
        springsim_cmd()
            .arg("--gravity")
            .assert()
            .failure()
            .stderr(predicate::str::contains("unexpected argument"));
    }

    #[test]
    fn test_conflicting_color_flags() {
        springsim_cmd()
            .args(["--no-color", "--force-color", "--self-check"])
            .assert()
            .failure();
    }

    #[test]
    fn test_unknown_key_name() {
        springsim_cmd()
            .args(["--self-check", "--keys", "<tab>"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid key in script: <tab>"));
    }

    #[test]
    fn test_zero_frames() {
        springsim_cmd()
            .args(["--self-check", "--frames", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("at least one frame"));
    }

    #[test]
    fn test_missing_log_directory() {
        let dir = TempDir::new().unwrap();
        springsim_cmd()
            .args(["--self-check", "--log-file"])
            .arg(dir.path().join("missing").join("run.log"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Log directory not found"));
    }
}

mod help {
    use super::*;

    #[test]
    fn test_help_lists_self_check() {
        springsim_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--self-check"));
    }

    #[test]
    fn test_version() {
        springsim_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("springsim"));
    }
}
