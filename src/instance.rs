//! Single-instance enforcement and process discovery.
//!
//! The daemon takes an exclusive lock on a PID-bearing file under
//! `$XDG_RUNTIME_DIR` at startup. Control subcommands read that PID back to
//! find and signal the running daemon. Stale locks (process no longer in
//! `/proc`) are detected and removed so a crashed daemon doesn't wedge the
//! next start.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use crate::constants::LOCK_FILE_NAME;

/// Path of the single-instance lock file.
pub fn get_lock_path() -> String {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    format!("{runtime_dir}/{LOCK_FILE_NAME}")
}

/// Acquire an exclusive lock on the lock file.
///
/// The lock file's first line is our PID, written after the flock is held.
/// If the lock is taken by a live process this fails with an error naming
/// the running PID; a stale lock is removed and acquisition retried once.
pub fn acquire_lock() -> Result<(File, String)> {
    let lock_path = get_lock_path();

    // Open without truncating so a concurrent holder's PID line survives
    // until we actually hold the flock
    let mut lock_file = open_lock_file(&lock_path)?;

    match lock_file.try_lock_exclusive() {
        Ok(()) => {
            write_lock_contents(&mut lock_file)?;
            Ok((lock_file, lock_path))
        }
        Err(_) => {
            handle_lock_conflict(&lock_path)?;

            // Conflict was a stale lock and has been cleaned up; retry
            let mut retry_lock_file = open_lock_file(&lock_path)?;
            retry_lock_file
                .try_lock_exclusive()
                .context("failed to acquire lock after stale-lock cleanup")?;
            write_lock_contents(&mut retry_lock_file)?;
            Ok((retry_lock_file, lock_path))
        }
    }
}

/// Release the lock and remove the lock file (graceful shutdown path).
pub fn release_lock(lock_file: File, lock_path: &str) {
    let _ = FileExt::unlock(&lock_file);
    drop(lock_file);
    let _ = std::fs::remove_file(lock_path);
}

fn open_lock_file(lock_path: &str) -> Result<File> {
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .with_context(|| format!("failed to open lock file {lock_path}"))
}

fn write_lock_contents(lock_file: &mut File) -> Result<()> {
    lock_file.set_len(0)?;
    lock_file.seek(SeekFrom::Start(0))?;
    writeln!(lock_file, "{}", std::process::id())?;
    lock_file.flush()?;
    Ok(())
}

/// Resolve a held-lock conflict.
///
/// Returns `Ok(())` only if the lock turned out to be stale and was removed;
/// a live instance is an error that aborts startup.
fn handle_lock_conflict(lock_path: &str) -> Result<()> {
    let lock_content = match std::fs::read_to_string(lock_path) {
        Ok(content) => content,
        // Lock file vanished between the failed flock and now
        Err(_) => return Ok(()),
    };

    let pid = match parse_lock_pid(&lock_content) {
        Some(pid) => pid,
        None => {
            log_warning!("Lock file contains invalid PID, removing stale lock");
            let _ = std::fs::remove_file(lock_path);
            return Ok(());
        }
    };

    if !is_instance_running(pid) {
        log_warning!("Removing stale lock file (process {pid} no longer running)");
        let _ = std::fs::remove_file(lock_path);
        return Ok(());
    }

    log_pipe!();
    log_error!("pomod is already running (PID: {pid})");
    log_block_start!("Did you mean to:");
    log_indented!("• Start or pause it: pomod toggle");
    log_indented!("• Start a fresh timer: pomod reset");
    log_indented!("• Stop it: pomod stop");
    anyhow::bail!("another pomod instance is running (PID: {pid})")
}

/// Extract the PID from lock file contents (first line).
fn parse_lock_pid(contents: &str) -> Option<u32> {
    contents.lines().next()?.trim().parse::<u32>().ok()
}

/// Check if a process with the given PID is still running.
pub fn is_instance_running(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

/// Get the PID of the running pomod instance from the lock file.
pub fn get_running_instance_pid() -> Result<u32> {
    let lock_path = get_lock_path();
    let lock_content =
        std::fs::read_to_string(&lock_path).context("pomod isn't running (no lock file)")?;

    let pid = parse_lock_pid(&lock_content)
        .with_context(|| format!("lock file {lock_path} contains an invalid PID"))?;

    if is_instance_running(pid) {
        Ok(pid)
    } else {
        anyhow::bail!("pomod isn't running (stale lock for PID {pid})")
    }
}

fn send_signal(pid: u32, signal: nix::sys::signal::Signal) -> Result<()> {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), signal)
        .map_err(|e| anyhow::anyhow!("failed to send {signal} to process {pid}: {e}"))
}

/// Send a toggle signal (SIGUSR1) to a running instance.
pub fn send_toggle_signal(pid: u32) -> Result<()> {
    send_signal(pid, nix::sys::signal::Signal::SIGUSR1)
}

/// Send a reset signal (SIGUSR2) to a running instance.
pub fn send_reset_signal(pid: u32) -> Result<()> {
    send_signal(pid, nix::sys::signal::Signal::SIGUSR2)
}

/// Terminate a running instance by sending SIGTERM.
pub fn terminate_instance(pid: u32) -> Result<()> {
    send_signal(pid, nix::sys::signal::Signal::SIGTERM)
}
