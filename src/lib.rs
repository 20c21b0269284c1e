//! # pomod Library
//!
//! Internal library for the pomod binary application.
//!
//! This library exists to enable testing of the timer internals and provide
//! clean separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Core**: `timer` holds the interval state machine driven by toggle/reset
//!   signals and periodic polls
//! - **Driver**: `daemon` owns the signal-aware poll loop and the status-line
//!   output
//! - **Control**: `signals` forwards POSIX signals as typed messages,
//!   `instance` manages the single-instance lock, `commands` delivers control
//!   verbs to a running daemon
//! - **Egress**: `notify` dispatches desktop notifications on interval expiry
//! - **Infrastructure**: logging macros, build-time constants, and the
//!   monotonic time source abstraction

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod constants;
pub mod daemon;
pub mod instance;
pub mod notify;
pub mod signals;
pub mod time_source;
pub mod timer;

// Re-export for binary
pub use daemon::Pomod;
pub use timer::{IntervalKind, Timer};
