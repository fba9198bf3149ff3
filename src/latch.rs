//! Interrupt-context edge latch and the flag handoff to the consumer task.
//!
//! [`EdgeLatch`] is the only state shared between interrupt context and the
//! engine. Everything in it sits behind a `critical_section::Mutex`, so the
//! edge handlers are short, bounded and allocation-free on every target,
//! including cores without compare-and-swap.

use core::cell::Cell;
use core::future::{Future, poll_fn};
use core::task::Poll;

use critical_section::Mutex;
use embassy_sync::waitqueue::AtomicWaker;

use crate::line::{InputLine, Level};
use crate::signal::{Flag, FlagSet};

#[derive(Clone, Copy)]
struct LatchState {
    flags: u8,
    latched: Level,
    injected: Option<Level>,
    injection_armed: bool,
    claimed: bool,
}

impl LatchState {
    const fn new() -> Self {
        Self {
            flags: 0,
            latched: Level::Low,
            injected: None,
            injection_armed: false,
            claimed: false,
        }
    }
}

/// Captures line edges in interrupt context and hands them to the engine.
///
/// Typically placed in a `static` so the interrupt handler can reach it:
///
/// ```ignore
/// static LATCH: EdgeLatch = EdgeLatch::new();
///
/// #[interrupt]
/// fn EXTI0() {
///     let line = /* the board's input line */;
///     if line.rose() {
///         LATCH.on_rise(&line);
///     } else {
///         LATCH.on_fall(&line);
///     }
/// }
/// ```
///
/// One latch serves exactly one engine; the engine claims it on construction
/// and releases it when dropped.
pub struct EdgeLatch {
    state: Mutex<Cell<LatchState>>,
    waker: AtomicWaker,
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeLatch {
    /// Creates an unclaimed latch with no pending flags.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(LatchState::new())),
            waker: AtomicWaker::new(),
        }
    }

    /// Rising-edge handler. Call from the line's interrupt.
    ///
    /// Disarms both triggers, latches `High` and posts [`Flag::Rise`].
    pub fn on_rise<L: InputLine + ?Sized>(&self, line: &L) {
        line.disarm();
        self.latch_edge(Level::High, Flag::Rise);
    }

    /// Falling-edge handler. Call from the line's interrupt.
    ///
    /// Disarms both triggers, latches `Low` and posts [`Flag::Fall`].
    pub fn on_fall<L: InputLine + ?Sized>(&self, line: &L) {
        line.disarm();
        self.latch_edge(Level::Low, Flag::Fall);
    }

    /// Feeds a level in software-driven mode.
    ///
    /// The injected level is always recorded as the current level. A change
    /// is latched and posted as the matching edge only while the software
    /// trigger is armed, and posting disarms it, just like a line trigger.
    /// Re-injecting the same level posts nothing. Safe to call from any
    /// context.
    pub fn inject(&self, level: Level) {
        let posted = critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut st = cell.get();
            let post = st.injection_armed && st.injected != Some(level);
            st.injected = Some(level);
            if post {
                st.injection_armed = false;
                st.latched = level;
                st.flags |= edge_flag(level).mask();
            }
            cell.set(st);
            post
        });

        if posted {
            self.waker.wake();
        }
    }

    /// Posts a flag and wakes the consumer.
    pub fn post(&self, flag: Flag) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut st = cell.get();
            st.flags |= flag.mask();
            cell.set(st);
        });
        self.waker.wake();
    }

    /// Takes and clears all pending flags.
    pub fn take(&self) -> FlagSet {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut st = cell.get();
            let flags = FlagSet::from_bits(st.flags);
            st.flags = 0;
            cell.set(st);
            flags
        })
    }

    /// Returns pending flags without clearing them.
    pub fn pending(&self) -> FlagSet {
        critical_section::with(|cs| FlagSet::from_bits(self.state.borrow(cs).get().flags))
    }

    /// Waits until at least one flag is pending, then takes them all.
    pub fn wait(&self) -> impl Future<Output = FlagSet> + '_ {
        poll_fn(move |cx| {
            self.waker.register(cx.waker());
            let flags = self.take();
            if flags.is_empty() {
                Poll::Pending
            } else {
                Poll::Ready(flags)
            }
        })
    }

    /// Level captured by the most recent edge or injection.
    pub fn latched(&self) -> Level {
        critical_section::with(|cs| self.state.borrow(cs).get().latched)
    }

    /// Most recently injected level, if any.
    pub fn injected(&self) -> Option<Level> {
        critical_section::with(|cs| self.state.borrow(cs).get().injected)
    }

    /// Claims the latch for one engine, resetting it. Returns false if it is
    /// already claimed.
    pub(crate) fn claim(&self, initial: Level, software: bool) -> bool {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            if cell.get().claimed {
                return false;
            }
            cell.set(LatchState {
                flags: 0,
                latched: initial,
                injected: if software { Some(initial) } else { None },
                injection_armed: false,
                claimed: true,
            });
            true
        })
    }

    pub(crate) fn release(&self) {
        critical_section::with(|cs| self.state.borrow(cs).set(LatchState::new()));
    }

    /// Arms the software trigger: the next injected change becomes an edge.
    pub(crate) fn arm_injection(&self) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut st = cell.get();
            st.injection_armed = true;
            cell.set(st);
        });
    }

    /// Latches `level` as a fresh edge from task context.
    pub(crate) fn repost(&self, level: Level) {
        self.latch_edge(level, edge_flag(level));
    }

    fn latch_edge(&self, level: Level, flag: Flag) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut st = cell.get();
            st.latched = level;
            st.flags |= flag.mask();
            cell.set(st);
        });
        self.waker.wake();
    }
}

fn edge_flag(level: Level) -> Flag {
    match level {
        Level::High => Flag::Rise,
        Level::Low => Flag::Fall,
    }
}
