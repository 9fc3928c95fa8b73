//! Fake solver executables for runner tests.
//!
//! Each helper writes a small shell script that stands in for the SBDART
//! binary. Unix-only, like the runners that exercise them.

use std::path::{Path, PathBuf};

/// Write an executable script with the given body under `dir`.
#[cfg(unix)]
pub fn write_fake_solver(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let script = format!("#!/bin/sh\n{}\n", body);
    std::fs::write(&path, script).expect("write fake solver script");

    let mut perms = std::fs::metadata(&path)
        .expect("stat fake solver script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod fake solver script");

    path
}

/// A solver that prints `stdout_payload` and exits 0.
#[cfg(unix)]
pub fn echoing_solver(dir: &Path, stdout_payload: &str) -> PathBuf {
    let body = format!("cat <<'PAYLOAD'\n{}\nPAYLOAD", stdout_payload.trim_end());
    write_fake_solver(dir, "fake-sbdart", &body)
}

/// A solver that writes to stderr and exits with `code`.
#[cfg(unix)]
pub fn failing_solver(dir: &Path, code: i32, stderr_message: &str) -> PathBuf {
    let body = format!("echo '{}' >&2\nexit {}", stderr_message, code);
    write_fake_solver(dir, "fake-sbdart", &body)
}

/// A solver that sleeps longer than any reasonable test timeout.
#[cfg(unix)]
pub fn hanging_solver(dir: &Path) -> PathBuf {
    write_fake_solver(dir, "fake-sbdart", "sleep 600")
}

/// A solver that copies its INPUT namelist to stdout before the payload,
/// so tests can assert what was materialized for the invocation.
#[cfg(unix)]
pub fn input_echoing_solver(dir: &Path, payload: &str) -> PathBuf {
    let body = format!(
        "cat INPUT\ncat <<'PAYLOAD'\n{}\nPAYLOAD",
        payload.trim_end()
    );
    write_fake_solver(dir, "fake-sbdart", &body)
}
