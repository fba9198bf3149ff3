//! Shared test infrastructure for push-button integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use push_button::{
    Edge, EdgeLatch, InputLine, Level, Notifier, Outcome, PushButton, Pull, Timer,
};

// ============================================================================
// Mock Line
// ============================================================================

/// Mock input line that behaves like a GPIO with a single edge trigger.
///
/// Driving it to a new level fires the armed edge (if any) through the latch,
/// the way the hardware interrupt would.
pub struct MockLine {
    level: Cell<Level>,
    readable: Cell<bool>,
    armed: Cell<Option<Edge>>,
    pull: Cell<Pull>,
    disarms: Cell<u32>,
    arm_history: RefCell<heapless::Vec<Edge, 64>>,
}

impl MockLine {
    pub fn new(level: Level) -> Self {
        Self {
            level: Cell::new(level),
            readable: Cell::new(true),
            armed: Cell::new(None),
            pull: Cell::new(Pull::None),
            disarms: Cell::new(0),
            arm_history: RefCell::new(heapless::Vec::new()),
        }
    }

    /// Moves the line to `level`, firing the armed trigger if it matches.
    pub fn drive(&self, level: Level, latch: &EdgeLatch) {
        let previous = self.level.replace(level);
        if previous == level {
            return;
        }

        match (self.armed.get(), level) {
            (Some(Edge::Rising), Level::High) => latch.on_rise(self),
            (Some(Edge::Falling), Level::Low) => latch.on_fall(self),
            _ => {}
        }
    }

    /// Changes the level without going through the trigger logic.
    pub fn set_level_silently(&self, level: Level) {
        self.level.set(level);
    }

    pub fn set_readable(&self, readable: bool) {
        self.readable.set(readable);
    }

    pub fn armed(&self) -> Option<Edge> {
        self.armed.get()
    }

    pub fn pull(&self) -> Pull {
        self.pull.get()
    }

    pub fn disarm_count(&self) -> u32 {
        self.disarms.get()
    }

    pub fn arm_count(&self) -> usize {
        self.arm_history.borrow().len()
    }

    pub fn last_armed(&self) -> Option<Edge> {
        self.arm_history.borrow().last().copied()
    }
}

impl InputLine for MockLine {
    fn level(&self) -> Option<Level> {
        if self.readable.get() {
            Some(self.level.get())
        } else {
            None
        }
    }

    fn arm_rising(&self) {
        self.armed.set(Some(Edge::Rising));
        let _ = self.arm_history.borrow_mut().push(Edge::Rising);
    }

    fn arm_falling(&self) {
        self.armed.set(Some(Edge::Falling));
        let _ = self.arm_history.borrow_mut().push(Edge::Falling);
    }

    fn disarm(&self) {
        self.armed.set(None);
        self.disarms.set(self.disarms.get() + 1);
    }

    fn set_pull(&self, pull: Pull) {
        self.pull.set(pull);
    }
}

// ============================================================================
// Simulated Clock and Timers
// ============================================================================

/// Microsecond clock shared by the simulated timers.
pub struct SimClock {
    now_us: Cell<u64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            now_us: Cell::new(0),
        }
    }

    pub fn now(&self) -> u64 {
        self.now_us.get()
    }

    fn set(&self, now_us: u64) {
        self.now_us.set(now_us);
    }
}

/// Timer driven by a [`SimClock`].
pub struct SimTimer<'a> {
    clock: &'a SimClock,
    deadline_us: Cell<Option<u64>>,
    period_us: Cell<Option<u32>>,
    notifier: Cell<Option<Notifier<'a>>>,
    starts: Cell<u32>,
    last_timeout_us: Cell<u32>,
}

impl<'a> SimTimer<'a> {
    pub fn new(clock: &'a SimClock) -> Self {
        Self {
            clock,
            deadline_us: Cell::new(None),
            period_us: Cell::new(None),
            notifier: Cell::new(None),
            starts: Cell::new(0),
            last_timeout_us: Cell::new(0),
        }
    }

    pub fn running(&self) -> bool {
        self.deadline_us.get().is_some()
    }

    pub fn start_count(&self) -> u32 {
        self.starts.get()
    }

    pub fn last_timeout_us(&self) -> u32 {
        self.last_timeout_us.get()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline_us.get()
    }

    /// Fires the timer if its deadline has passed. Returns true if it fired.
    pub fn fire_due(&self) -> bool {
        let Some(deadline) = self.deadline_us.get() else {
            return false;
        };
        if deadline > self.clock.now() {
            return false;
        }

        match self.period_us.get() {
            Some(period) => self.deadline_us.set(Some(deadline + period as u64)),
            None => self.deadline_us.set(None),
        }
        if let Some(notifier) = self.notifier.get() {
            notifier.notify();
        }
        true
    }

    fn arm(&self, timeout_us: u32, period: Option<u32>, notifier: Notifier<'a>) {
        self.deadline_us
            .set(Some(self.clock.now() + timeout_us as u64));
        self.period_us.set(period);
        self.notifier.set(Some(notifier));
        self.starts.set(self.starts.get() + 1);
        self.last_timeout_us.set(timeout_us);
    }
}

impl<'a> Timer<'a> for &SimTimer<'a> {
    fn start_once(&mut self, timeout_us: u32, on_expiry: Notifier<'a>) {
        self.arm(timeout_us, None, on_expiry);
    }

    fn start_periodic(&mut self, period_us: u32, on_tick: Notifier<'a>) {
        self.arm(period_us, Some(period_us), on_tick);
    }

    fn stop(&mut self) {
        self.deadline_us.set(None);
        self.period_us.set(None);
    }

    fn is_running(&self) -> bool {
        self.running()
    }
}

pub type SimButton<'a, 't, L> = PushButton<'a, u32, L, &'t SimTimer<'a>>;

/// Advances the clock by `us`, servicing the engine and then firing timers in
/// deadline order until no deadline is left inside the window. Returns every
/// outcome handled.
pub fn advance<'a, L: InputLine>(
    button: &mut SimButton<'a, '_, L>,
    clock: &SimClock,
    timers: [&SimTimer<'a>; 2],
    us: u64,
) -> std::vec::Vec<Outcome> {
    let target = clock.now() + us;
    let mut outcomes = std::vec::Vec::new();

    loop {
        outcomes.extend(button.service());

        let next = timers
            .iter()
            .filter_map(|t| t.deadline())
            .filter(|&d| d <= target)
            .min();
        let Some(next) = next else {
            break;
        };

        clock.set(next);
        for timer in timers {
            timer.fire_due();
        }
    }

    clock.set(target);
    outcomes
}

// ============================================================================
// Callback Counters
// ============================================================================

/// Counts calls and remembers the last identifier seen.
pub struct Counter {
    calls: Cell<u32>,
    last_id: Cell<Option<u32>>,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
            last_id: Cell::new(None),
        }
    }

    pub fn hit(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    pub fn hit_with(&self, id: u32) {
        self.last_id.set(Some(id));
        self.hit();
    }

    pub fn count(&self) -> u32 {
        self.calls.get()
    }

    pub fn last_id(&self) -> Option<u32> {
        self.last_id.get()
    }
}

/// Filter window used by most tests.
pub const FILTER_US: u32 = 20_000;
