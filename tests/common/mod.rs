use assert_cmd::Command;
use tempfile::TempDir;

pub const BIN_NAME: &str = "spend_smart_cli";

/// Script-mode command with its own home directory.
pub fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SPEND_SMART_CLI_SCRIPT", "1")
        .env("SPEND_SMART_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

pub fn home() -> TempDir {
    TempDir::new().expect("create temp dir")
}
