//! The probe client's own output must never reach the gate's streams.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_wait-for-postgres");

#[test]
fn test_probe_output_is_discarded() {
    let dir = tempfile::tempdir().unwrap();

    // Fails once, then succeeds; chatty on both streams every time.
    let marker = dir.path().join("seen");
    let probe_path = dir.path().join("noisy-psql");
    fs::write(
        &probe_path,
        format!(
            "#!/bin/sh\necho PROBE-STDOUT\necho PROBE-STDERR >&2\nif [ -e '{0}' ]; then exit 0; fi\ntouch '{0}'\nexit 2\n",
            marker.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&probe_path, fs::Permissions::from_mode(0o755)).unwrap();

    let config_path = dir.path().join("gate.toml");
    fs::write(
        &config_path,
        format!(
            "[probe]\nprogram = \"{}\"\n\n[retry]\ninterval_ms = 10\nmax_interval_ms = 10\n",
            probe_path.display()
        ),
    )
    .unwrap();

    let output = Command::new(BIN)
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["legacy-host", "echo", "handed-off"])
        .env("DB_HOST", "db")
        .env("DB_USER", "app")
        .env("DB_PASSWORD", "pw")
        .env("DB_NAME", "app")
        .env("RUST_LOG", "wait_for_postgres=debug")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout, "Waiting for Postgres at db...\nhanded-off\n");
    assert!(!stdout.contains("PROBE-"));
    assert!(!stderr.contains("PROBE-"));
}
