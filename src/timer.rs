//! The countdown-timer state machine.
//!
//! A [`Timer`] tracks elapsed and remaining time across a repeating sequence
//! of labeled work/break intervals. It is mutated only by the driver loop
//! (single-threaded, no internal locking) through four control operations
//! (`start`, `stop`, `toggle`, `reset`) and a periodic `poll` that detects
//! interval expiry and advances the rotation. Interval expiry fires an
//! injected notification hook with the new interval kind.
//!
//! All operations are total: there are no error conditions in the timer
//! itself. The accounting runs against a monotonic [`TimeSource`], never
//! wall-clock time.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::constants::{BREAK_CYCLE, LONG_BREAK_SECS, SHORT_BREAK_SECS, WORK_SECS};
use crate::time_source::TimeSource;

/// One timed phase of the rotation.
///
/// `Planned` is the pre-start placeholder: a fresh timer sits in `Planned`
/// until the first `start()` moves it into `Work`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    Planned,
    Work,
    ShortBreak,
    LongBreak,
}

impl IntervalKind {
    /// Nominal duration of this interval kind.
    ///
    /// `Planned` shows the work duration: the pre-start display equals a
    /// full work interval.
    pub fn duration(self) -> Duration {
        use IntervalKind::*;

        let seconds = match self {
            Planned | Work => WORK_SECS,
            ShortBreak => SHORT_BREAK_SECS,
            LongBreak => LONG_BREAK_SECS,
        };

        Duration::from_secs(seconds)
    }

    /// Status-bar icon for this interval kind (Pomicons glyphs).
    pub fn icon(self) -> &'static str {
        use IntervalKind::*;

        match self {
            Planned => "\u{e002}",
            Work => "\u{e003}",
            ShortBreak => "\u{e005}",
            LongBreak => "\u{e006}",
        }
    }

    /// Human-readable label used in notification bodies and logs.
    pub fn label(self) -> &'static str {
        use IntervalKind::*;

        match self {
            Planned => "planned",
            Work => "work",
            ShortBreak => "short break",
            LongBreak => "long break",
        }
    }

    /// The interval that follows this one, given the number of work
    /// intervals completed so far in the current break cycle.
    ///
    /// Breaks (and the initial `Planned` placeholder) always lead back to
    /// `Work`. `Work` leads to `ShortBreak`, except when it completes a full
    /// break cycle, which earns a `LongBreak`.
    fn next(self, break_count: u32) -> IntervalKind {
        use IntervalKind::*;

        match self {
            Planned | ShortBreak | LongBreak => Work,
            Work => {
                if break_count < BREAK_CYCLE - 1 {
                    ShortBreak
                } else {
                    LongBreak
                }
            }
        }
    }
}

/// Notification hook invoked on every expiry-driven interval transition.
type ExpiryHook = Box<dyn FnMut(IntervalKind)>;

/// The countdown timer.
///
/// Owned by the driver loop and passed by `&mut` into each operation; there
/// is no process-wide singleton.
pub struct Timer {
    clock: Arc<dyn TimeSource>,
    running: bool,
    kind: IntervalKind,
    started_at: Option<Instant>,
    remaining: Duration,
    last_polled: Instant,
    break_count: u32,
    on_expire: Option<ExpiryHook>,
}

impl Timer {
    /// Construct a fresh timer: `Planned`, not running, full pre-start
    /// duration on the clock.
    pub fn new(clock: Arc<dyn TimeSource>) -> Self {
        let now = clock.now();
        Timer {
            clock,
            running: false,
            kind: IntervalKind::Planned,
            started_at: None,
            remaining: IntervalKind::Planned.duration(),
            last_polled: now,
            break_count: 0,
            on_expire: None,
        }
    }

    /// Whether time is currently elapsing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The current interval kind.
    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    /// Time left in the current interval; the authoritative display value.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Completed work intervals modulo the break cycle length.
    pub fn break_count(&self) -> u32 {
        self.break_count
    }

    /// Move to the next interval and reload `remaining` with its duration.
    ///
    /// The break counter only ticks when leaving `Work`; breaks and the
    /// initial placeholder don't count toward the cycle. Does not invoke the
    /// expiry hook; the caller decides whether the transition was
    /// expiry-driven.
    fn advance(&mut self) {
        let next = self.kind.next(self.break_count);
        if self.kind == IntervalKind::Work {
            self.break_count = (self.break_count + 1) % BREAK_CYCLE;
        }
        self.kind = next;
        self.remaining = next.duration();
    }

    /// Start (or resume) the timer. No-op if already running.
    ///
    /// The very first start after construction or reset records the start
    /// instant and moves off `Planned` into `Work`; later resumes just flip
    /// the running flag and let the preserved `remaining` continue.
    pub fn start(&mut self) {
        if !self.running {
            if self.started_at.is_none() {
                self.started_at = Some(self.clock.now());
                self.advance();
                log_debug!("Timer started: entering {} interval", self.kind.label());
            }
            self.running = true;
        }
    }

    /// Pause the timer, preserving `remaining`. No-op if already stopped.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
        }
    }

    /// `stop()` if running, else `start()`.
    pub fn toggle(&mut self) {
        if !self.running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Discard all state and become a freshly constructed timer, keeping the
    /// same clock and re-attaching the registered expiry hook.
    pub fn reset(&mut self) {
        let hook = self.on_expire.take();
        *self = Timer::new(self.clock.clone());
        self.on_expire = hook;
    }

    /// Register the expiry notification hook, overwriting any previous
    /// registration.
    pub fn on_state_change<F>(&mut self, callback: F)
    where
        F: FnMut(IntervalKind) + 'static,
    {
        self.on_expire = Some(Box::new(callback));
    }

    /// Advance the accounting by one driver-loop tick.
    ///
    /// While paused, only the poll instant is refreshed, so no time elapses
    /// against the interval. While running, expiry is tested *before* the
    /// elapsed delta is applied: the poll that finds `remaining` already at
    /// zero rolls over to the next interval and fires the hook, while an
    /// ordinary poll subtracts the delta (saturating at zero, to be caught
    /// on the next poll). The zero reading is therefore visible for at most
    /// one poll quantum past an interval boundary, which is accepted
    /// imprecision.
    pub fn poll(&mut self) {
        let now = self.clock.now();
        if self.running {
            if self.remaining.is_zero() {
                self.advance();
                log_debug!("Interval expired: entering {} interval", self.kind.label());
                let new_kind = self.kind;
                if let Some(callback) = self.on_expire.as_mut() {
                    callback(new_kind);
                }
            } else {
                let delta = now.duration_since(self.last_polled);
                self.remaining = self.remaining.saturating_sub(delta);
            }
        }
        self.last_polled = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_source::ManualSource;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manual_timer() -> (Arc<ManualSource>, Timer) {
        let clock = Arc::new(ManualSource::new());
        let timer = Timer::new(clock.clone());
        (clock, timer)
    }

    /// Advance the clock past the current interval and poll twice: once to
    /// clamp `remaining` at zero, once to roll over into the next interval.
    fn expire_current_interval(clock: &Arc<ManualSource>, timer: &mut Timer) {
        clock.advance(timer.remaining());
        timer.poll();
        assert!(timer.remaining().is_zero());
        timer.poll();
    }

    #[test]
    fn fresh_timer_is_planned_and_stopped() {
        let (_clock, timer) = manual_timer();
        assert!(!timer.is_running());
        assert_eq!(timer.kind(), IntervalKind::Planned);
        assert_eq!(timer.remaining(), IntervalKind::Planned.duration());
        assert_eq!(timer.break_count(), 0);
    }

    #[test]
    fn planned_shares_the_work_duration() {
        assert_eq!(
            IntervalKind::Planned.duration(),
            IntervalKind::Work.duration()
        );
    }

    #[test]
    fn first_start_enters_work() {
        let (_clock, mut timer) = manual_timer();
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.kind(), IntervalKind::Work);
        assert_eq!(timer.remaining(), IntervalKind::Work.duration());
        assert_eq!(timer.break_count(), 0);
    }

    #[test]
    fn start_is_idempotent() {
        let (_clock, mut timer) = manual_timer();
        timer.start();
        let kind = timer.kind();
        let remaining = timer.remaining();
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.kind(), kind);
        assert_eq!(timer.remaining(), remaining);
    }

    #[test]
    fn stop_is_idempotent() {
        let (_clock, mut timer) = manual_timer();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.kind(), IntervalKind::Planned);

        timer.start();
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.kind(), IntervalKind::Work);
    }

    #[test]
    fn toggle_complements_running() {
        let (_clock, mut timer) = manual_timer();
        timer.toggle();
        assert!(timer.is_running());
        timer.toggle();
        assert!(!timer.is_running());
        timer.toggle();
        assert!(timer.is_running());
    }

    #[test]
    fn resume_does_not_restart_interval() {
        let (clock, mut timer) = manual_timer();
        timer.start();
        clock.advance(Duration::from_secs(60));
        timer.poll();
        let remaining = timer.remaining();

        timer.stop();
        timer.start();
        // Resume keeps the interval where the pause left it
        assert_eq!(timer.kind(), IntervalKind::Work);
        assert_eq!(timer.remaining(), remaining);
    }

    #[test]
    fn poll_subtracts_elapsed_delta() {
        let (clock, mut timer) = manual_timer();
        timer.start();
        clock.advance(Duration::from_secs(90));
        timer.poll();
        assert_eq!(
            timer.remaining(),
            IntervalKind::Work.duration() - Duration::from_secs(90)
        );
    }

    #[test]
    fn poll_while_paused_elapses_no_time() {
        let (clock, mut timer) = manual_timer();
        timer.start();
        clock.advance(Duration::from_secs(30));
        timer.poll();
        let remaining = timer.remaining();

        timer.stop();
        for _ in 0..5 {
            clock.advance(Duration::from_secs(600));
            timer.poll();
        }
        assert_eq!(timer.remaining(), remaining);

        // The paused polls kept last_polled fresh: resuming doesn't charge
        // the paused stretch against the interval
        timer.start();
        clock.advance(Duration::from_secs(1));
        timer.poll();
        assert_eq!(timer.remaining(), remaining - Duration::from_secs(1));
    }

    #[test]
    fn oversized_delta_clamps_at_zero() {
        let (clock, mut timer) = manual_timer();
        timer.start();
        clock.advance(IntervalKind::Work.duration() + Duration::from_secs(300));
        timer.poll();
        assert!(timer.remaining().is_zero());
        // Still Work: the rollover happens on the next poll
        assert_eq!(timer.kind(), IntervalKind::Work);
    }

    #[test]
    fn expiry_advances_within_the_detecting_poll() {
        let (clock, mut timer) = manual_timer();
        timer.start();
        expire_current_interval(&clock, &mut timer);
        assert_eq!(timer.kind(), IntervalKind::ShortBreak);
        assert_eq!(timer.remaining(), IntervalKind::ShortBreak.duration());
        assert_eq!(timer.break_count(), 1);
    }

    #[test]
    fn expiry_hook_fires_once_per_transition() {
        let (clock, mut timer) = manual_timer();
        let seen: Rc<RefCell<Vec<IntervalKind>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        timer.on_state_change(move |kind| sink.borrow_mut().push(kind));

        timer.start();
        assert!(seen.borrow().is_empty(), "initial start is not an expiry");

        expire_current_interval(&clock, &mut timer);
        assert_eq!(*seen.borrow(), vec![IntervalKind::ShortBreak]);

        expire_current_interval(&clock, &mut timer);
        assert_eq!(
            *seen.borrow(),
            vec![IntervalKind::ShortBreak, IntervalKind::Work]
        );
    }

    #[test]
    fn long_break_every_fourth_work_interval() {
        let (clock, mut timer) = manual_timer();
        timer.start();

        let mut breaks = Vec::new();
        for _ in 0..BREAK_CYCLE {
            // Work interval expires into some break
            expire_current_interval(&clock, &mut timer);
            breaks.push(timer.kind());
            // Break expires back into work
            expire_current_interval(&clock, &mut timer);
            assert_eq!(timer.kind(), IntervalKind::Work);
        }

        assert_eq!(
            breaks,
            vec![
                IntervalKind::ShortBreak,
                IntervalKind::ShortBreak,
                IntervalKind::ShortBreak,
                IntervalKind::LongBreak,
            ]
        );
        assert_eq!(timer.break_count(), 0, "counter wraps after a full cycle");
    }

    #[test]
    fn pauses_do_not_disturb_the_break_cycle() {
        let (clock, mut timer) = manual_timer();
        timer.start();

        for expected_count in 1..BREAK_CYCLE {
            timer.stop();
            clock.advance(Duration::from_secs(3600));
            timer.poll();
            timer.start();

            expire_current_interval(&clock, &mut timer);
            assert_eq!(timer.kind(), IntervalKind::ShortBreak);
            assert_eq!(timer.break_count(), expected_count);
            expire_current_interval(&clock, &mut timer);
        }

        expire_current_interval(&clock, &mut timer);
        assert_eq!(timer.kind(), IntervalKind::LongBreak);
    }

    #[test]
    fn reset_yields_a_fresh_timer() {
        let (clock, mut timer) = manual_timer();
        timer.start();
        expire_current_interval(&clock, &mut timer);
        clock.advance(Duration::from_secs(42));
        timer.poll();

        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.kind(), IntervalKind::Planned);
        assert_eq!(timer.remaining(), IntervalKind::Planned.duration());
        assert_eq!(timer.break_count(), 0);
    }

    #[test]
    fn reset_keeps_the_expiry_hook() {
        let (clock, mut timer) = manual_timer();
        let fired = Rc::new(RefCell::new(0u32));
        let sink = fired.clone();
        timer.on_state_change(move |_| *sink.borrow_mut() += 1);

        timer.start();
        timer.reset();

        // The re-attached hook still fires on the fresh timer's expiries
        timer.start();
        expire_current_interval(&clock, &mut timer);
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn started_at_survives_pause_and_resume() {
        let (clock, mut timer) = manual_timer();
        timer.start();
        timer.stop();
        clock.advance(Duration::from_secs(10));
        timer.start();
        // A resume must not re-run the Planned -> Work transition
        assert_eq!(timer.kind(), IntervalKind::Work);
        assert_eq!(timer.break_count(), 0);
    }
}
