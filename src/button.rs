//! Debounced push-button engine.
//!
//! Provides [`PushButton`], which turns latched line edges into Press, Hold
//! and Release callbacks. The engine is the single consumer of its
//! [`EdgeLatch`]: it is the only place that starts timers, re-arms line
//! triggers or calls user code.

use heapless::Vec;

use crate::config::{ButtonConfig, ConfigError, hold_interval_us};
use crate::filter::{Decision, classify};
use crate::hold::HoldScheduler;
use crate::latch::EdgeLatch;
use crate::line::{InputLine, Level, NoLine};
use crate::registry::{Callbacks, EventKind, IdHandler, PlainHandler};
use crate::signal::{Flag, FlagSet};
use crate::timer::{Notifier, Timer};

/// What the engine did with one batch of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Press confirmed, press callbacks fired.
    Press,
    /// Hold period elapsed, hold callbacks fired.
    Hold,
    /// Release confirmed, release callbacks fired.
    Release,
    /// Edge discarded as a glitch.
    Noise,
    /// Level unreadable after filtering. Triggers re-armed, nothing fired.
    InvalidLevel,
}

impl Outcome {
    /// True for outcomes delivered to user callbacks.
    pub fn is_event(self) -> bool {
        matches!(self, Outcome::Press | Outcome::Hold | Outcome::Release)
    }
}

impl From<Decision> for Outcome {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Press => Outcome::Press,
            Decision::Release => Outcome::Release,
            Decision::Noise => Outcome::Noise,
            Decision::InvalidLevel => Outcome::InvalidLevel,
        }
    }
}

/// Outcomes handled by one [`PushButton::service`] call, in order.
///
/// A batch holds at most a hold tick, a filter expiry and an inline decision.
pub type Serviced = Vec<Outcome, 4>;

/// Debounced event engine for a single button.
///
/// # Type Parameters
/// * `'a` - Lifetime of the line, latch and callback references
/// * `Id` - Identifier passed to identifier-style callbacks
/// * `L` - Line implementation type ([`NoLine`] in software-driven mode)
/// * `T` - Timer implementation type, used for both the filter and hold timers
pub struct PushButton<'a, Id, L: InputLine, T: Timer<'a>> {
    line: Option<&'a L>,
    latch: &'a EdgeLatch,
    filter_timer: T,
    on_filter: Notifier<'a>,
    hold: HoldScheduler<'a, T>,
    callbacks: Callbacks<'a, Id>,
    config: ButtonConfig,
    id: Id,
    level: Level,
    pending: bool,
}

impl<'a, Id: Copy, L: InputLine, T: Timer<'a>> PushButton<'a, Id, L, T> {
    /// Creates an engine bound to a physical line.
    ///
    /// Applies the configured pull, reads the initial level and arms the
    /// trigger for the opposite edge.
    ///
    /// # Errors
    /// * [`ConfigError::ZeroFilterTimeout`] - filter enabled with a zero window
    /// * [`ConfigError::LatchInUse`] - `latch` already belongs to another engine
    pub fn new(
        line: &'a L,
        latch: &'a EdgeLatch,
        filter_timer: T,
        hold_timer: T,
        id: Id,
        config: ButtonConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        line.set_pull(config.pull);
        let initial = line
            .level()
            .unwrap_or_else(|| config.polarity.inactive_level());

        let mut button = Self::build(
            Some(line),
            latch,
            filter_timer,
            hold_timer,
            id,
            config,
            initial,
        )?;
        button.rearm();
        Ok(button)
    }

    fn build(
        line: Option<&'a L>,
        latch: &'a EdgeLatch,
        filter_timer: T,
        hold_timer: T,
        id: Id,
        config: ButtonConfig,
        initial: Level,
    ) -> Result<Self, ConfigError> {
        if !latch.claim(initial, line.is_none()) {
            return Err(ConfigError::LatchInUse);
        }

        if config.debug {
            debug!(
                "push button created: polarity {:?}, initial level {:?}, filter {} us",
                config.polarity,
                initial,
                config.filter_timeout_us
            );
        }

        Ok(Self {
            line,
            latch,
            filter_timer,
            on_filter: Notifier::new(latch, Flag::FilterElapsed),
            hold: HoldScheduler::new(hold_timer, Notifier::new(latch, Flag::HoldTick)),
            callbacks: Callbacks::default(),
            config,
            id,
            level: initial,
            pending: false,
        })
    }

    /// Installs an identifier-style press handler.
    pub fn enable_press_events(&mut self, handler: IdHandler<'a, Id>) {
        self.callbacks.slot_mut(EventKind::Press).set_with_id(Some(handler));
        self.arm_if_settled();
    }

    /// Installs a no-argument press handler.
    pub fn enable_press_events_plain(&mut self, handler: PlainHandler<'a>) {
        self.callbacks.slot_mut(EventKind::Press).set_plain(Some(handler));
        self.arm_if_settled();
    }

    /// Removes both press handlers.
    pub fn disable_press_events(&mut self) {
        self.callbacks.slot_mut(EventKind::Press).clear();
    }

    /// Installs an identifier-style hold handler fired every `millis` while
    /// pressed. `millis == 0` disables hold events.
    ///
    /// The new interval applies from the next confirmed press.
    pub fn enable_hold_events(
        &mut self,
        handler: IdHandler<'a, Id>,
        millis: u32,
    ) -> Result<(), ConfigError> {
        if millis == 0 {
            self.disable_hold_events();
            return Ok(());
        }
        self.hold.set_interval_us(hold_interval_us(millis)?);
        self.callbacks.slot_mut(EventKind::Hold).set_with_id(Some(handler));
        self.arm_if_settled();
        Ok(())
    }

    /// Installs a no-argument hold handler. See
    /// [`enable_hold_events`](Self::enable_hold_events).
    pub fn enable_hold_events_plain(
        &mut self,
        handler: PlainHandler<'a>,
        millis: u32,
    ) -> Result<(), ConfigError> {
        if millis == 0 {
            self.disable_hold_events();
            return Ok(());
        }
        self.hold.set_interval_us(hold_interval_us(millis)?);
        self.callbacks.slot_mut(EventKind::Hold).set_plain(Some(handler));
        self.arm_if_settled();
        Ok(())
    }

    /// Removes both hold handlers, stops a running hold timer and clears the
    /// interval.
    pub fn disable_hold_events(&mut self) {
        self.hold.disable();
        self.callbacks.slot_mut(EventKind::Hold).clear();
    }

    /// Installs an identifier-style release handler.
    pub fn enable_release_events(&mut self, handler: IdHandler<'a, Id>) {
        self.callbacks.slot_mut(EventKind::Release).set_with_id(Some(handler));
        self.arm_if_settled();
    }

    /// Installs a no-argument release handler.
    pub fn enable_release_events_plain(&mut self, handler: PlainHandler<'a>) {
        self.callbacks.slot_mut(EventKind::Release).set_plain(Some(handler));
        self.arm_if_settled();
    }

    /// Removes both release handlers.
    pub fn disable_release_events(&mut self) {
        self.callbacks.slot_mut(EventKind::Release).clear();
    }

    /// Routes future edges through the glitch filter timer.
    ///
    /// # Errors
    /// [`ConfigError::ZeroFilterTimeout`] if the configured window is zero.
    pub fn enable_glitch_filter(&mut self) -> Result<(), ConfigError> {
        let config = self.config.with_glitch_filter(true);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Classifies future edges immediately. An edge already waiting on the
    /// filter timer is still classified when the timer expires.
    pub fn disable_glitch_filter(&mut self) {
        self.config.glitch_filter = false;
    }

    /// Changes the glitch filter window for future edges.
    pub fn set_filter_timeout_us(&mut self, timeout_us: u32) -> Result<(), ConfigError> {
        let config = self.config.with_filter_timeout_us(timeout_us);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Takes pending flags from the latch and handles them.
    ///
    /// Call from the consumer task whenever the latch may have been signaled.
    /// Returns immediately with an empty list when nothing is pending.
    pub fn service(&mut self) -> Serviced {
        let flags = self.latch.take();
        self.dispatch(flags)
    }

    /// Consumer task body: waits on the latch and services every batch.
    /// Never returns.
    pub async fn run(&mut self) {
        loop {
            let flags = self.latch.wait().await;
            self.dispatch(flags);
        }
    }

    /// Handles one batch of flags.
    ///
    /// Hold ticks are handled first, then filter expiry, then new edges. A
    /// filter expiry arriving together with a new edge is superseded by it,
    /// since the edge restarts the window.
    pub fn dispatch(&mut self, flags: FlagSet) -> Serviced {
        let mut serviced = Serviced::new();

        if flags.contains(Flag::HoldTick) && self.hold.is_running() {
            self.fire(EventKind::Hold);
            let _ = serviced.push(Outcome::Hold);
        }

        let edge = flags.contains(Flag::Rise) || flags.contains(Flag::Fall);

        if flags.contains(Flag::FilterElapsed) && self.pending && !edge {
            let _ = serviced.push(self.settle());
        }

        if edge {
            self.pending = true;
            if self.config.glitch_filter {
                self.filter_timer
                    .start_once(self.config.filter_timeout_us, self.on_filter);
                if self.config.debug {
                    trace!("edge latched, filter started");
                }
            } else {
                let _ = serviced.push(self.settle());
            }
        }

        serviced
    }

    /// Returns the settled level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// True if the settled level is the active level.
    pub fn is_pressed(&self) -> bool {
        self.config.polarity.is_pressed(self.level)
    }

    /// True while an edge is latched and awaiting classification.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_hold_running(&self) -> bool {
        self.hold.is_running()
    }

    /// Hold period in microseconds, 0 when hold events are disabled.
    pub fn hold_interval_us(&self) -> u32 {
        self.hold.interval_us()
    }

    pub fn is_glitch_filter_enabled(&self) -> bool {
        self.config.glitch_filter
    }

    /// True if any handler is installed for `kind`.
    pub fn is_enabled(&self, kind: EventKind) -> bool {
        self.callbacks.slot(kind).is_enabled()
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Classifies the latched edge and acts on the decision.
    fn settle(&mut self) -> Outcome {
        self.pending = false;
        let latched = self.latch.latched();
        let decision = classify(latched, self.current_level(), self.config.polarity);

        match decision {
            Decision::Noise => {
                if self.config.debug {
                    trace!("noise discarded, latched {:?}", latched);
                }
            }
            Decision::Release => {
                self.hold.stop();
                self.level = latched;
                if self.config.debug {
                    debug!("release");
                }
                self.fire(EventKind::Release);
            }
            Decision::Press => {
                self.hold.start();
                self.level = latched;
                if self.config.debug {
                    debug!("press, hold running: {}", self.hold.is_running());
                }
                self.fire(EventKind::Press);
            }
            Decision::InvalidLevel => {
                warn!("line level unreadable, edge dropped");
                self.hold.stop();
            }
        }

        self.rearm();
        decision.into()
    }

    fn current_level(&self) -> Option<Level> {
        match self.line {
            Some(line) => line.level(),
            None => self.latch.injected(),
        }
    }

    /// Arms the trigger opposite to the settled level, or the software
    /// trigger when there is no line.
    ///
    /// If the level already differs from the settled one, the transition
    /// happened while triggers were off; it is latched as a new edge instead
    /// of arming.
    fn rearm(&mut self) {
        match self.current_level() {
            Some(level) if level != self.level => {
                if self.config.debug {
                    trace!("line moved to {:?} while disarmed", level);
                }
                self.latch.repost(level);
            }
            _ => match self.line {
                Some(line) => line.arm(self.level.next_edge()),
                None => self.latch.arm_injection(),
            },
        }
    }

    /// Re-arms only when no edge is awaiting classification, including one
    /// latched by the interrupt but not yet serviced.
    fn arm_if_settled(&mut self) {
        let unserviced = self.latch.pending();
        if self.pending || unserviced.contains(Flag::Rise) || unserviced.contains(Flag::Fall) {
            return;
        }
        self.rearm();
    }

    fn fire(&self, kind: EventKind) {
        if self.config.debug && kind == EventKind::Hold {
            debug!("hold");
        }
        self.callbacks.fire(kind, self.id);
    }
}

impl<'a, Id: Copy, T: Timer<'a>> PushButton<'a, Id, NoLine, T> {
    /// Creates a software-driven engine with no physical line.
    ///
    /// The level comes from [`inject_level`](Self::inject_level) (or
    /// [`EdgeLatch::inject`]). The latch's software trigger stands in for the
    /// line triggers: injected changes are ignored while a decision is
    /// pending.
    pub fn software(
        latch: &'a EdgeLatch,
        filter_timer: T,
        hold_timer: T,
        id: Id,
        config: ButtonConfig,
        initial: Level,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut button = Self::build(None, latch, filter_timer, hold_timer, id, config, initial)?;
        button.rearm();
        Ok(button)
    }

    /// Feeds the current level. A change while armed is handled like an edge.
    pub fn inject_level(&self, level: Level) {
        self.latch.inject(level);
    }
}

impl<'a, Id, L: InputLine, T: Timer<'a>> Drop for PushButton<'a, Id, L, T> {
    fn drop(&mut self) {
        if let Some(line) = self.line {
            line.disarm();
        }
        self.filter_timer.stop();
        self.hold.shutdown();
        self.latch.release();
    }
}
