//! Shared E2E test helpers for `gatekeep` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::Path;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables that would leak host configuration into a test.
const GATEKEEP_VARS: &[&str] = &[
    "GATEKEEP_APP_TITLE",
    "GATEKEEP_HOME_ROUTE",
    "GATEKEEP_GUEST_FALLBACK",
    "RUST_LOG",
];

/// Build a Command for the `gatekeep` binary isolated from host config.
///
/// `HOME` points at a fresh temp dir so no global config is read, and the
/// project root is that same dir. Returns (command, _guard): keep the
/// guard alive for the test's duration.
pub fn gatekeep_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir for home");
    let cmd = gatekeep_cmd_in(tmp.path());
    (cmd, tmp)
}

/// Build an isolated Command rooted at `dir`.
pub fn gatekeep_cmd_in(dir: &Path) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("gatekeep");
    cmd.timeout(TIMEOUT_BASIC);
    for var in GATEKEEP_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", dir);
    cmd.args(["-C", dir.to_str().expect("valid utf8")]);
    cmd
}

/// Same as [`gatekeep_cmd`] with guest fallback enabled.
pub fn guest_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let (mut cmd, guard) = gatekeep_cmd();
    cmd.env("GATEKEEP_GUEST_FALLBACK", "1");
    (cmd, guard)
}

/// Writes `<dir>/.gatekeep/config.toml`.
pub fn write_project_config(dir: &Path, content: &str) {
    let config_dir = dir.join(".gatekeep");
    std::fs::create_dir_all(&config_dir).expect("create .gatekeep");
    std::fs::write(config_dir.join("config.toml"), content).expect("write config");
}
