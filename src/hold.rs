//! Periodic hold timer management.

use crate::timer::{Notifier, Timer};

/// Owns the periodic hold timer and tracks whether it is running.
///
/// Started on a confirmed press when an interval is configured, stopped on
/// release, on a repeated press (which then restarts it) and on disable.
pub struct HoldScheduler<'a, T: Timer<'a>> {
    timer: T,
    on_tick: Notifier<'a>,
    interval_us: u32,
    running: bool,
}

impl<'a, T: Timer<'a>> HoldScheduler<'a, T> {
    /// Creates a scheduler with holds disabled.
    pub fn new(timer: T, on_tick: Notifier<'a>) -> Self {
        Self {
            timer,
            on_tick,
            interval_us: 0,
            running: false,
        }
    }

    /// Hold period in microseconds, 0 when disabled.
    pub fn interval_us(&self) -> u32 {
        self.interval_us
    }

    /// Sets the period used by the next [`start`](Self::start).
    ///
    /// A running timer keeps its current period until restarted.
    pub fn set_interval_us(&mut self, interval_us: u32) {
        self.interval_us = interval_us;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// (Re)starts the timer for a confirmed press.
    ///
    /// Stops a running timer first. Returns true if the timer is running
    /// afterwards, i.e. an interval is configured.
    pub fn start(&mut self) -> bool {
        self.stop();
        if self.interval_us > 0 {
            self.timer.start_periodic(self.interval_us, self.on_tick);
            self.running = true;
        }
        self.running
    }

    /// Stops the timer if running.
    pub fn stop(&mut self) {
        if self.running {
            self.timer.stop();
            self.running = false;
        }
    }

    /// Stops the timer and clears the interval.
    pub fn disable(&mut self) {
        self.stop();
        self.interval_us = 0;
    }

    /// Stops the hardware timer regardless of the running flag.
    pub(crate) fn shutdown(&mut self) {
        self.timer.stop();
        self.running = false;
    }
}
