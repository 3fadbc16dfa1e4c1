// ABOUTME: Integration tests for the healthwait CLI commands.
// ABOUTME: Validates help output, configuration errors, init, and check results.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use support::http_server::{serve_blocking, url};

fn healthwait_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("healthwait"));
    cmd.current_dir(dir);
    for var in [
        "HEALTHWAIT_URL",
        "HEALTHWAIT_ATTRIBUTE",
        "HEALTHWAIT_STATUS",
        "HEALTHWAIT_DELAY",
        "HEALTHWAIT_TIMEOUT",
        "HEALTHWAIT_REQUEST_TIMEOUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_shows_commands() {
    let dir = tempfile::tempdir().unwrap();
    healthwait_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("init"));
}

mod validate {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let dir = tempfile::tempdir().unwrap();
        healthwait_cmd(dir.path())
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("http://localhost:8080/health"));
    }

    #[test]
    fn blank_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        healthwait_cmd(dir.path())
            .args(["validate", "--url", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Url must be specified"));
    }

    #[test]
    fn every_blank_field_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        healthwait_cmd(dir.path())
            .args(["validate", "--attribute", " ", "--status", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Attribute must be specified"))
            .stderr(predicate::str::contains("Status must be specified"));
    }

    #[test]
    fn non_numeric_delay_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        healthwait_cmd(dir.path())
            .args(["check", "--delay", "abc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Delay must be an integer"));
    }

    #[test]
    fn blank_env_status_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        healthwait_cmd(dir.path())
            .env("HEALTHWAIT_STATUS", "")
            .arg("validate")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Status must be specified"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("healthwait.yml");

        healthwait_cmd(dir.path()).arg("init").assert().success();

        assert!(config_path.exists(), "healthwait.yml should be created");
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("url:"), "Config should have url field");
    }

    #[test]
    fn refuses_to_overwrite_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("healthwait.yml"), "status: UP\n").unwrap();

        healthwait_cmd(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }
}

mod check {
    use super::*;

    #[test]
    fn healthy_endpoint_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let addr = serve_blocking(200, r#"{"status":"UP"}"#);

        healthwait_cmd(dir.path())
            .args(["check", "--url", &url(addr, "/health"), "--timeout", "10"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Health check succeeded"));
    }

    #[test]
    fn unhealthy_endpoint_fails() {
        let dir = tempfile::tempdir().unwrap();
        let addr = serve_blocking(200, r#"{"status":"DOWN"}"#);

        healthwait_cmd(dir.path())
            .args(["check", "--url", &url(addr, "/health")])
            .args(["--delay", "1", "--timeout", "1"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Health check succeeded").not())
            .stderr(predicate::str::contains("Health check failed"));
    }

    #[test]
    fn json_mode_reports_failure_event() {
        let dir = tempfile::tempdir().unwrap();
        let addr = serve_blocking(503, r#"{"status":"DOWN"}"#);

        healthwait_cmd(dir.path())
            .args(["--json", "check", "--url", &url(addr, "/health")])
            .args(["--delay", "1", "--timeout", "1"])
            .assert()
            .failure()
            .stdout(predicate::str::contains(r#""event":"failure""#))
            .stdout(predicate::str::contains("DOWN"));
    }

    #[test]
    fn config_file_is_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let addr = serve_blocking(200, r#"{"app":{"state":"ready"}}"#);
        fs::write(
            dir.path().join("healthwait.yml"),
            format!(
                "url: {}\nattribute: app.state\nstatus: READY\ntimeout: 10\n",
                url(addr, "/health")
            ),
        )
        .unwrap();

        healthwait_cmd(dir.path())
            .args(["--quiet", "check"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Health check succeeded"));
    }

    #[test]
    fn flags_override_environment() {
        let dir = tempfile::tempdir().unwrap();
        let addr = serve_blocking(200, r#"{"status":"DOWN"}"#);

        healthwait_cmd(dir.path())
            .env("HEALTHWAIT_URL", url(addr, "/health"))
            .env("HEALTHWAIT_STATUS", "UP")
            .args(["check", "--status", "down", "--timeout", "10"])
            .assert()
            .success();
    }

    #[test]
    fn missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        healthwait_cmd(dir.path())
            .args(["--config", "missing.yml", "check"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }
}
