//! Timer abstraction for the glitch filter and hold timers.

use crate::latch::EdgeLatch;
use crate::signal::Flag;

/// Handle a timer uses to report expiry to the owning engine.
///
/// Cheap to copy. Platform timer implementations store it when started and
/// call [`notify`](Self::notify) from their expiry context (interrupt or timer
/// service task). Notifying never runs engine logic directly; it only posts a
/// flag that the consumer task picks up.
#[derive(Clone, Copy)]
pub struct Notifier<'a> {
    latch: &'a EdgeLatch,
    flag: Flag,
}

impl<'a> Notifier<'a> {
    pub(crate) fn new(latch: &'a EdgeLatch, flag: Flag) -> Self {
        Self { latch, flag }
    }

    /// Posts the expiry flag to the consumer task.
    #[inline]
    pub fn notify(&self) {
        self.latch.post(self.flag);
    }

    /// The flag this notifier posts.
    pub fn flag(&self) -> Flag {
        self.flag
    }
}

impl core::fmt::Debug for Notifier<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Notifier").field("flag", &self.flag).finish()
    }
}

/// Trait for abstracting a hardware or RTOS timer.
///
/// Starting a timer that is already running restarts it with the new
/// timeout and notifier.
pub trait Timer<'a> {
    /// Starts a one-shot timer that calls `on_expiry` once after `timeout_us`.
    fn start_once(&mut self, timeout_us: u32, on_expiry: Notifier<'a>);

    /// Starts a periodic timer that calls `on_tick` every `period_us`.
    fn start_periodic(&mut self, period_us: u32, on_tick: Notifier<'a>);

    /// Stops the timer. No-op when not running.
    fn stop(&mut self);

    /// Returns true while the timer is armed.
    fn is_running(&self) -> bool;
}
