// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! Child-process helpers for the privilege probe and `getprop`.

use std::io::Write;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ProbeError;
use crate::indicators::PRIVILEGE_PROBE_INPUT;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Spawns `program`, asks it to `exit` and reports whether it exited with 0.
///
/// Stdin is closed before waiting so the child sees EOF even if it ignores
/// the `exit` line. Without a `timeout` the wait is unbounded.
pub fn run_privilege_probe(program: &str, timeout: Option<Duration>) -> Result<bool, ProbeError> {
    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ProbeError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if let Err(err) = send_exit(&mut child, program) {
        reap(&mut child);
        return Err(err);
    }

    let status = match timeout {
        Some(limit) => wait_bounded(&mut child, program, limit)?,
        None => child.wait().map_err(|source| ProbeError::Wait {
            program: program.to_string(),
            source,
        })?,
    };

    log::debug!("{} exited with {}", program, status);
    Ok(status.success())
}

fn send_exit(child: &mut Child, program: &str) -> Result<(), ProbeError> {
    let mut stdin = child.stdin.take().ok_or_else(|| ProbeError::StdinUnavailable {
        program: program.to_string(),
    })?;
    let io_err = |source| ProbeError::Stdin {
        program: program.to_string(),
        source,
    };
    stdin.write_all(PRIVILEGE_PROBE_INPUT).map_err(io_err)?;
    stdin.flush().map_err(io_err)?;
    // stdin dropped here, closing the pipe
    Ok(())
}

fn wait_bounded(
    child: &mut Child,
    program: &str,
    limit: Duration,
) -> Result<ExitStatus, ProbeError> {
    let start_time = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {}
            Err(source) => {
                reap(child);
                return Err(ProbeError::Wait {
                    program: program.to_string(),
                    source,
                });
            }
        }

        if start_time.elapsed() >= limit {
            reap(child);
            return Err(ProbeError::TimedOut {
                program: program.to_string(),
                timeout: limit,
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Runs `getprop <name>` and returns the first output line, if non-empty.
pub fn read_property(program: &str, name: &str) -> Result<Option<String>, ProbeError> {
    let output = Command::new(program)
        .arg(name)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|source| ProbeError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value = stdout.lines().next().unwrap_or("").trim();
    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.to_string()))
    }
}
