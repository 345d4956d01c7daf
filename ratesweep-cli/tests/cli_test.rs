//! End-to-end tests of the `ratesweep` binary

use std::path::Path;
use std::process::{Command, Output};

fn ratesweep(args: &[&str], path_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ratesweep"))
        .args(args)
        .env("PATH", path_dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("RATESWEEP_HTTPERF")
        .env_remove("RATESWEEP_SERVER")
        .env_remove("RATESWEEP_HOST")
        .env_remove("RATESWEEP_PORT")
        .env_remove("RATESWEEP_RATE")
        .env_remove("RATESWEEP_USERNAME")
        .env_remove("RATESWEEP_PASSWORD")
        .output()
        .unwrap()
}

fn write_config(dir: &Path, contents: &str) -> String {
    let path = dir.join("sweep.yaml");
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    for flag in ["-v", "--version"] {
        let output = ratesweep(&[flag], dir.path());
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_sample_config() {
    let dir = tempfile::tempdir().unwrap();
    let output = ratesweep(&["--sample-config"], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("server: localhost"));
    assert!(stdout.contains("connections: 200"));
}

#[test]
fn test_unset_binary_exits_with_status_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = ratesweep(&[], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("httperf binary is not configured"));
}

#[test]
fn test_nonexistent_binary_exits_with_status_1() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "httperf: /nonexistent/bin/httperf\n");
    let output = ratesweep(&["-c", &config], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("httperf binary not found at /nonexistent/bin/httperf"));
}

#[test]
fn test_missing_config_file_shows_usage() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    let output = ratesweep(&["--config", missing.to_str().unwrap()], dir.path());

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"));
    assert!(stderr.contains("Usage:"));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn test_sweep_with_fake_httperf() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("httperf");
    std::fs::write(
        &script,
        r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    --rate=*) rate="${arg#--rate=}" ;;
  esac
done
echo "Request rate: $rate.5 req/s (1.0 ms/req)"
if [ "$rate" = "20" ]; then
  echo "Errors: total 3 client-timo 3 socket-timo 0 connrefused 0 connreset 0"
fi
"#,
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let config = write_config(
        dir.path(),
        "low_rate: 10\nhigh_rate: 30\nrate_step: 10\nunknown_key: ignored\n",
    );
    let output = ratesweep(&["-c", &config], dir.path());

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("(1 run)"));
    assert!(stdout.contains("(2 runs)"));
    assert!(stdout.contains("(3 runs)"));
    assert!(stdout.contains("10.5"));
    assert!(stdout.contains("20.5"));
    assert!(stdout.contains("30.5"));
    assert_eq!(stdout.matches("httperf output for / at 20 req/s").count(), 1);
    assert!(stdout.contains("client-timo 3"));
}
