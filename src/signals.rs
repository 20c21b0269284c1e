//! Signal handling for pomod.
//!
//! Control events arrive as POSIX signals: SIGUSR1 toggles the timer,
//! SIGUSR2 resets it, SIGINT/SIGTERM request graceful shutdown. A dedicated
//! signal-iterator thread forwards each delivered signal as a typed message
//! over an mpsc channel; the driver loop consumes them with a bounded
//! `recv_timeout` so signals arriving mid-render are queued rather than
//! lost. Signal coalescing is acceptable per the control contract.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGINT, SIGTERM, SIGUSR1, SIGUSR2},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

/// Typed control message delivered over the signal channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMessage {
    /// Start/pause the timer (SIGUSR1)
    Toggle,
    /// Discard the timer and start fresh (SIGUSR2)
    Reset,
    /// Graceful shutdown (SIGINT, SIGTERM)
    Shutdown,
}

/// Signal handling state shared between the signal thread and the driver loop.
pub struct SignalState {
    /// Atomic flag indicating if the application should keep running
    pub running: Arc<AtomicBool>,
    /// Channel receiver for typed signal messages
    pub signal_receiver: std::sync::mpsc::Receiver<SignalMessage>,
}

/// Set up signal handling for the daemon.
///
/// Returns a SignalState containing the running flag and signal receiver
/// channel. Spawns a background thread that monitors for signals and sends
/// the corresponding message via the channel. The thread is detached; it
/// exits with the process or when the receiver side is dropped.
pub fn setup_signal_handler() -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));
    let (signal_sender, signal_receiver) = std::sync::mpsc::channel::<SignalMessage>();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGUSR1, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running_clone = running.clone();

    thread::spawn(move || {
        for sig in signals.forever() {
            let message = match sig {
                SIGUSR1 => {
                    log_debug!("Received SIGUSR1 (toggle)");
                    SignalMessage::Toggle
                }
                SIGUSR2 => {
                    log_debug!("Received SIGUSR2 (reset)");
                    SignalMessage::Reset
                }
                SIGINT => {
                    log_pipe!();
                    log_info!("Received interrupt signal, initiating graceful shutdown...");
                    SignalMessage::Shutdown
                }
                SIGTERM => {
                    log_pipe!();
                    log_info!("Received termination request, initiating graceful shutdown...");
                    SignalMessage::Shutdown
                }
                _ => continue,
            };

            if message == SignalMessage::Shutdown {
                running_clone.store(false, Ordering::SeqCst);
            }

            if signal_sender.send(message).is_err() {
                // Main loop is gone; nothing left to deliver to
                running_clone.store(false, Ordering::SeqCst);
                break;
            }

            if message == SignalMessage::Shutdown {
                break;
            }
        }
    });

    Ok(SignalState {
        running,
        signal_receiver,
    })
}
