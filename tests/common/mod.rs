// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Run the built binary with the given arguments, ignoring any rc files
pub fn run_scar(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_scar-analyzer"))
        .arg("--no-config")
        .args(args)
        .env_remove("SCAR_CONFIG")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute scar-analyzer");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// One firmware log line: "[time][origin][F1] message"
pub fn log_line(time: &str, origin: &str, message: &str) -> String {
    format!("[{}][{}][F1] {}", time, origin, message)
}

/// Timestamp in the firmware's format for the given clock time
pub fn at(clock: &str) -> String {
    format!("2024-05-01 {}.000-09:00", clock)
}

/// Write lines to `dir/name`, newline-terminated
pub fn write_log(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).expect("Failed to write log file");
    path
}

pub fn authorize_request(clock: &str, id: &str, tag: &str) -> String {
    log_line(
        &at(clock),
        "ocpp16.cpp:210",
        &format!(
            r#"[2,"{}","Authorize",{{"idToken":{{"idToken":"{}","type":"ISO14443"}}}}]"#,
            id, tag
        ),
    )
}

pub fn id_token_response(clock: &str, id: &str, status: &str) -> String {
    log_line(
        &at(clock),
        "ocpp16.cpp:388",
        &format!(r#"[3,"{}",{{"idTokenInfo":{{"status":"{}"}}}}]"#, id, status),
    )
}
