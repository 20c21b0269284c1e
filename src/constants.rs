//! Build-time configuration constants for pomod.
//!
//! All durations, icons, and the break-cycle length are fixed at build time;
//! pomod has no runtime configuration surface. Change a value here and
//! rebuild to change the schedule.

/// Length of one work interval in seconds (25 minutes).
pub const WORK_SECS: u64 = 25 * 60;

/// Length of one short break in seconds (5 minutes).
pub const SHORT_BREAK_SECS: u64 = 5 * 60;

/// Length of one long break in seconds (30 minutes).
pub const LONG_BREAK_SECS: u64 = 30 * 60;

/// Number of completed work intervals per break cycle. Every cycle's last
/// break is a long break instead of a short one.
pub const BREAK_CYCLE: u32 = 4;

/// Driver-loop polling quantum in milliseconds. The timer is polled and the
/// status line re-rendered at least once per quantum.
pub const POLL_QUANTUM_MS: u64 = 500;

/// Application name attached to desktop notifications.
pub const NOTIFICATION_APP_NAME: &str = "pomod";

/// Summary line of the expiry notification.
pub const NOTIFICATION_SUMMARY: &str = "pomod: time is up";

/// Freedesktop sound-spec name hinted on the expiry notification.
pub const NOTIFICATION_SOUND: &str = "alarm-clock-elapsed";

/// Name of the single-instance lock file under $XDG_RUNTIME_DIR.
pub const LOCK_FILE_NAME: &str = "pomod.lock";
