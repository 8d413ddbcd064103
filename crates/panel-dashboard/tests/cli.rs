//! Integration tests for the `pdash` binary.
//!
//! Every test gets its own config file and record directory inside a temp
//! dir, and XDG variables point there too so the real user's files are never
//! touched.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PDASH_BIN: &str = env!("CARGO_BIN_EXE_pdash");

/// Isolated environment: config file plus record directory.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self::with_config("")
    }

    /// Writes `extra` after a `[storage]` section pointing into the sandbox.
    fn with_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let users = dir.path().join("users");
        let config = format!(
            "[storage]\ndata_dir = \"{}\"\n\n{extra}",
            users.display()
        );
        fs::write(dir.path().join("config.toml"), config).expect("failed to write config");
        Self { dir }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn record_path(&self, user: &str) -> PathBuf {
        self.dir.path().join("users").join(format!("{user}.json"))
    }

    /// `pdash --config <sandbox config> <args>`
    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = bare_cmd(self.dir.path());
        cmd.arg("--config").arg(self.config_path()).args(args);
        cmd
    }

    /// Runs a command expected to succeed and parses its stdout as JSON.
    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd(args).output().expect("failed to run pdash");
        assert!(
            output.status.success(),
            "pdash {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }
}

/// `pdash` with XDG paths redirected into `home` and no log override.
fn bare_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(PDASH_BIN);
    cmd.env("XDG_CONFIG_HOME", home.join("xdg-config"))
        .env("XDG_DATA_HOME", home.join("xdg-data"))
        .env_remove("PDASH_LOG");
    cmd
}

// ---------------------------------------------------------------------------
// Panel selection
// ---------------------------------------------------------------------------

#[test]
fn test_new_user_sees_every_builtin_panel_enabled() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["panels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] onlineusers"))
        .stdout(predicate::str::contains("[x] traffic"))
        .stdout(predicate::str::contains("(required by traffic)"));
    // Reads never create a record.
    assert!(!sandbox.record_path("guest").exists());
}

#[test]
fn test_enable_replaces_selection() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["enable", "news", "weather"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enabled panels: news, weather"));

    sandbox
        .cmd(&["panels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] news"))
        .stdout(predicate::str::contains("[ ] map"));
    assert!(sandbox.record_path("guest").exists());
}

#[test]
fn test_enable_without_dependency_fails_and_keeps_record() {
    let sandbox = Sandbox::new();
    sandbox.cmd(&["enable", "news"]).assert().success();
    let before = fs::read_to_string(sandbox.record_path("guest")).expect("record");

    sandbox
        .cmd(&["enable", "traffic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("traffic"))
        .stderr(predicate::str::contains("map"));

    let after = fs::read_to_string(sandbox.record_path("guest")).expect("record");
    assert_eq!(before, after);
}

#[test]
fn test_enable_drops_unknown_panels() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["enable", "news", "horoscope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enabled panels: news\n"));
}

#[test]
fn test_reset_enables_everything_and_keeps_layouts() {
    let sandbox = Sandbox::new();
    sandbox.cmd(&["enable", "news"]).assert().success();
    sandbox.cmd(&["move", "news=1:0"]).assert().success();
    sandbox
        .cmd(&["reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enabled all 6 panels"));

    let layout = sandbox.json(&["layout"]);
    assert_eq!(layout["panels"].as_object().expect("object").len(), 6);
    assert_eq!(layout["panels"]["news"]["column"], 1);
}

// ---------------------------------------------------------------------------
// Layout per columns-count
// ---------------------------------------------------------------------------

#[test]
fn test_move_then_render_columns() {
    let sandbox = Sandbox::new();
    sandbox.cmd(&["enable", "news", "weather", "events"]).assert().success();
    sandbox
        .cmd(&["move", "weather=0:1", "news=0:0", "events=2:0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 3 panel(s) at 3 columns"));

    let grid = sandbox.json(&["columns"]);
    assert_eq!(grid["columns_count"], 3);
    assert_eq!(
        grid["columns"],
        serde_json::json!([["news", "weather"], [], ["events"]])
    );
    assert_eq!(grid["unpositioned"], serde_json::json!([]));
}

#[test]
fn test_columns_counts_are_independent() {
    let sandbox = Sandbox::new();
    sandbox.cmd(&["enable", "news", "weather"]).assert().success();
    sandbox
        .cmd(&["move", "--columns", "2", "news=1:0"])
        .assert()
        .success();

    let two = sandbox.json(&["columns", "--columns", "2"]);
    assert_eq!(two["columns"], serde_json::json!([[], ["news"]]));
    assert_eq!(two["unpositioned"], serde_json::json!(["weather"]));

    let three = sandbox.json(&["columns"]);
    assert_eq!(three["columns"], serde_json::json!([]));
    assert_eq!(three["unpositioned"], serde_json::json!(["news", "weather"]));
}

#[test]
fn test_move_out_of_range_is_rejected_atomically() {
    let sandbox = Sandbox::new();
    sandbox.cmd(&["enable", "news", "weather"]).assert().success();
    sandbox
        .cmd(&["move", "news=0:0", "weather=3:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("weather"));

    let layout = sandbox.json(&["layout"]);
    assert!(layout["panels"]["news"].get("column").is_none());
}

#[test]
fn test_collapse_and_expand() {
    let sandbox = Sandbox::new();
    sandbox.cmd(&["enable", "map"]).assert().success();
    sandbox.cmd(&["move", "map=1:4"]).assert().success();
    sandbox
        .cmd(&["collapse", "map"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Collapsed map at 3 columns"));

    let layout = sandbox.json(&["layout"]);
    assert_eq!(
        layout["panels"]["map"],
        serde_json::json!({ "collapsed": true, "column": 1, "order": 4 })
    );
    let other = sandbox.json(&["layout", "--columns", "4"]);
    assert_eq!(other["panels"]["map"], serde_json::json!({ "collapsed": false }));

    sandbox.cmd(&["expand", "map"]).assert().success();
    let layout = sandbox.json(&["layout"]);
    assert_eq!(layout["panels"]["map"]["collapsed"], false);
}

#[test]
fn test_collapse_disabled_panel_fails() {
    let sandbox = Sandbox::new();
    sandbox.cmd(&["enable", "news"]).assert().success();
    sandbox.cmd(&["collapse", "weather"]).assert().failure();
}

#[test]
fn test_columns_flag_above_max_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["columns", "--columns", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 1..=5"));
}

// ---------------------------------------------------------------------------
// Users and config
// ---------------------------------------------------------------------------

#[test]
fn test_users_are_isolated() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["--user", "alice", "enable", "news"])
        .assert()
        .success();
    sandbox
        .cmd(&["enable", "weather", "--user", "bob"])
        .assert()
        .success();

    let alice = sandbox.json(&["layout", "--user", "alice"]);
    let bob = sandbox.json(&["layout", "--user", "bob"]);
    assert!(alice["panels"].get("news").is_some());
    assert!(alice["panels"].get("weather").is_none());
    assert!(bob["panels"].get("weather").is_some());
    assert!(!sandbox.record_path("guest").exists());
}

#[test]
fn test_invalid_user_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["--user", "../escape", "panels"])
        .assert()
        .failure();
}

#[test]
fn test_configured_defaults_apply() {
    let sandbox = Sandbox::with_config(
        "[dashboard]\ndefault_columns = 2\nmax_columns = 2\n\n[[panels]]\nname = \"radar\"\ndependencies = [\"weather\"]\n",
    );
    sandbox
        .cmd(&["panels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] radar"))
        .stdout(predicate::str::contains("(required by radar)"));

    let grid = sandbox.json(&["columns"]);
    assert_eq!(grid["columns_count"], 2);
    sandbox.cmd(&["columns", "--columns", "3"]).assert().failure();
}

#[test]
fn test_broken_config_reports_position() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.config_path(), "[dashboard]\ndefault_columns = \"x\"\n")
        .expect("write config");
    sandbox
        .cmd(&["panels"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml:2:"));
}

#[test]
fn test_config_init_path_validate() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("xdg-config/panel-dashboard/config.toml");

    bare_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.display().to_string()));

    bare_cmd(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration"));
    assert!(path.exists());

    bare_cmd(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    bare_cmd(dir.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Panels:          6"));
}

#[test]
fn test_config_validate_rejects_inconsistent_columns() {
    let sandbox = Sandbox::with_config("[dashboard]\ndefault_columns = 4\nmax_columns = 3\n");
    sandbox
        .cmd(&["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_columns"));
}

#[test]
fn test_default_data_dir_follows_xdg() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    bare_cmd(dir.path())
        .args(["enable", "news"])
        .assert()
        .success();
    assert!(dir
        .path()
        .join("xdg-data/panel-dashboard/users/guest.json")
        .exists());
}
