//! Single-shot mode timer.
//!
//! The session never blocks on time. It drives a [`ModeTimer`] and
//! expects the host to feed expiry back as
//! [`InputEvent::TimerExpired`](crate::session::InputEvent::TimerExpired)
//! through the same event path as button presses.
//!
//! Every arm or reschedule is tagged with a fresh [`TimerToken`]. An
//! expiry carrying anything but the live token is stale and dropped,
//! which closes the window between a cancel and an already-queued
//! expiry.

use crate::session::InputEvent;

/// Generation tag of one countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerToken(pub u32);

impl TimerToken {
    pub fn next(self) -> Self {
        TimerToken(self.0.wrapping_add(1))
    }
}

/// Host-provided countdown.
///
/// At most one countdown is outstanding. `arm` and `reschedule` replace
/// whatever was pending. `cancel` must be idempotent, and after it returns
/// the cancelled countdown must not fire.
pub trait ModeTimer {
    /// Start a countdown of `duration_ms`.
    fn arm(&mut self, duration_ms: u32, token: TimerToken);

    /// Restart the pending countdown to the full `duration_ms` from now.
    fn reschedule(&mut self, duration_ms: u32, token: TimerToken);

    /// Drop the pending countdown, if any.
    fn cancel(&mut self);
}

/// Deadline-based timer over a host millisecond clock.
///
/// The host sets `now` before handing events to the session and polls
/// with the current time; the event loop can sleep until [`deadline`].
///
/// [`deadline`]: DeadlineTimer::deadline
#[derive(Clone, Copy, Debug, Default)]
pub struct DeadlineTimer {
    now_ms: u64,
    pending: Option<(u64, TimerToken)>,
}

impl DeadlineTimer {
    pub const fn new() -> Self {
        Self {
            now_ms: 0,
            pending: None,
        }
    }

    /// Update the clock used by the next `arm`/`reschedule`.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Instant at which the pending countdown fires.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.map(|(at, _)| at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the countdown if its deadline has passed. Fires at most once.
    pub fn poll(&mut self, now_ms: u64) -> Option<InputEvent> {
        self.now_ms = now_ms;
        match self.pending {
            Some((at, token)) if now_ms >= at => {
                self.pending = None;
                Some(InputEvent::TimerExpired(token))
            }
            _ => None,
        }
    }
}

impl ModeTimer for DeadlineTimer {
    fn arm(&mut self, duration_ms: u32, token: TimerToken) {
        self.pending = Some((self.now_ms + u64::from(duration_ms), token));
    }

    fn reschedule(&mut self, duration_ms: u32, token: TimerToken) {
        self.arm(duration_ms, token);
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T: ModeTimer + ?Sized> ModeTimer for &mut T {
    fn arm(&mut self, duration_ms: u32, token: TimerToken) {
        (**self).arm(duration_ms, token)
    }

    fn reschedule(&mut self, duration_ms: u32, token: TimerToken) {
        (**self).reschedule(duration_ms, token)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}
