//! Desktop notification egress.
//!
//! On every interval expiry one notification is dispatched naming the
//! upcoming interval. Dispatch is fire-and-forget from the timer's
//! perspective: delivery failure is downgraded to a warning and never
//! reaches the timer or the status-line output.

use notify_rust::{Notification, Urgency};

use crate::constants::{NOTIFICATION_APP_NAME, NOTIFICATION_SOUND, NOTIFICATION_SUMMARY};
use crate::timer::IntervalKind;

/// Show the "time is up" notification for an expiry into `next`.
///
/// Runs inline with the poll loop, so it must not block interval accounting;
/// `show()` only performs the D-Bus round trip and returns. No timeout
/// override is set (notification service default applies). The sound-name
/// hint lets notification daemons that honor the freedesktop sound spec
/// chime on expiry.
pub fn notify_expiry(next: IntervalKind) {
    let result = Notification::new()
        .appname(NOTIFICATION_APP_NAME)
        .summary(NOTIFICATION_SUMMARY)
        .body(&format!("next up: {}", next.label()))
        .urgency(Urgency::Critical)
        .sound_name(NOTIFICATION_SOUND)
        .show();

    if let Err(e) = result {
        log_pipe!();
        log_warning!("Failed to send expiry notification: {e}");
        log_indented!("Timer continues normally");
    }
}
