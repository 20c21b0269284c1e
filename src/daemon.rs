//! Application coordinator and driver loop.
//!
//! This module handles resource acquisition and the daemon's main loop:
//! - Lock file management for single-instance enforcement
//! - Signal handler setup
//! - Timer construction with the notification hook attached
//! - The signal-aware poll loop and status-line rendering
//!
//! The loop blocks on the signal channel with a bounded timeout (the poll
//! quantum), so the timer is polled and the status line re-rendered at
//! least once per quantum even with no control events, and immediately
//! after any event.

use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use crate::constants::POLL_QUANTUM_MS;
use crate::instance;
use crate::notify;
use crate::signals::{SignalMessage, setup_signal_handler};
use crate::time_source::MonotonicSource;
use crate::timer::{IntervalKind, Timer};

/// Runner for the pomod daemon.
pub struct Pomod {
    debug_enabled: bool,
}

impl Pomod {
    /// Create a new runner with defaults matching normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled }
    }

    /// Execute the daemon with the configured settings.
    ///
    /// This method handles the complete application lifecycle including lock
    /// acquisition, signal handler setup, the driver loop, and graceful
    /// shutdown with lock cleanup.
    pub fn run(self) -> Result<()> {
        log_version!();

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled - showing timer state transitions");
        }

        let (lock_file, lock_path) = instance::acquire_lock()?;
        let signal_state = setup_signal_handler()?;

        log_block_start!("Lock acquired, starting pomod...");
        log_indented!("toggle: SIGUSR1 (pomod toggle)");
        log_indented!("reset:  SIGUSR2 (pomod reset)");

        let mut timer = Timer::new(Arc::new(MonotonicSource));
        timer.on_state_change(notify::notify_expiry);

        let quantum = Duration::from_millis(POLL_QUANTUM_MS);
        let mut stdout = std::io::stdout();

        loop {
            // Bounded wait: either a control event arrives or the quantum
            // elapses, so the poll cadence is guaranteed either way
            match signal_state.signal_receiver.recv_timeout(quantum) {
                Ok(SignalMessage::Toggle) => {
                    log_debug!("Handling toggle event");
                    timer.toggle();
                }
                Ok(SignalMessage::Reset) => {
                    log_debug!("Handling reset event");
                    timer.reset();
                }
                Ok(SignalMessage::Shutdown) => break,
                Err(RecvTimeoutError::Timeout) => {
                    // Normal quiet quantum
                }
                Err(RecvTimeoutError::Disconnected) => {
                    if !signal_state.running.load(Ordering::SeqCst) {
                        // Signal thread already delivered shutdown and exited
                        break;
                    }
                    // The control-input channel is broken; the daemon can no
                    // longer be driven, so terminate
                    anyhow::bail!("signal channel disconnected unexpectedly");
                }
            }

            timer.poll();

            // Status bars read line-by-line from a pipe; unflushed output
            // stalls the bar
            writeln!(stdout, "{}", format_status(timer.kind(), timer.remaining()))
                .and_then(|_| stdout.flush())
                .context("failed to write status line")?;
        }

        instance::release_lock(lock_file, &lock_path);

        log_block_start!("Shutting down pomod...");
        log_end!();
        Ok(())
    }
}

/// Render the status line: `"<icon> <MM>:<SS>"`, zero-padded.
pub fn format_status(kind: IntervalKind, remaining: Duration) -> String {
    let total_secs = remaining.as_secs();
    format!(
        "{} {:02}:{:02}",
        kind.icon(),
        total_secs / 60,
        total_secs % 60
    )
}
