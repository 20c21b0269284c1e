//! Implementation of the control subcommands.
//!
//! Each verb finds the running daemon through the lock file and delivers
//! the corresponding signal: `toggle` sends SIGUSR1, `reset` sends SIGUSR2,
//! `stop` sends SIGTERM and waits for the process to actually exit.

use anyhow::{Context, Result};

use crate::instance;

/// Handle the toggle command: start or pause the running timer.
pub fn handle_toggle_command() -> Result<()> {
    log_version!();

    let pid = instance::get_running_instance_pid()?;
    instance::send_toggle_signal(pid).context("failed to signal the running pomod instance")?;

    log_block_start!("Sent toggle signal to pomod (PID: {pid})");
    log_end!();
    Ok(())
}

/// Handle the reset command: discard the running timer and start fresh.
pub fn handle_reset_command() -> Result<()> {
    log_version!();

    let pid = instance::get_running_instance_pid()?;
    instance::send_reset_signal(pid).context("failed to signal the running pomod instance")?;

    log_block_start!("Sent reset signal to pomod (PID: {pid})");
    log_end!();
    Ok(())
}

/// Handle the stop command to terminate a running pomod instance.
pub fn handle_stop_command() -> Result<()> {
    log_version!();

    let pid = instance::get_running_instance_pid()?;
    log_block_start!("Stopping pomod instance (PID: {pid})...");

    instance::terminate_instance(pid).context("failed to terminate the running pomod instance")?;

    // Wait up to 3 seconds for the process to actually terminate
    let max_attempts = 30;
    for _ in 0..max_attempts {
        if !instance::is_instance_running(pid) {
            log_pipe!();
            log_info!("Process terminated successfully");
            log_end!();
            return Ok(());
        }
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    log_pipe!();
    log_warning!("Process did not terminate within the expected time");
    log_indented!("The termination signal was sent, but the process may still be shutting down");
    log_end!();
    Ok(())
}
