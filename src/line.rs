//! Input line abstraction for platform-agnostic edge detection.

/// Logic level of a two-level digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0.
    Low,
    /// Logic 1.
    High,
}

impl Level {
    /// Returns the opposite level.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Returns the edge that moves the line away from this level.
    #[inline]
    pub fn next_edge(self) -> Edge {
        match self {
            Level::Low => Edge::Rising,
            Level::High => Edge::Falling,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

/// Edge selection for line triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high transition.
    Rising,
    /// High to low transition.
    Falling,
}

impl Edge {
    /// Level the line settles at after this edge.
    #[inline]
    pub fn resulting_level(self) -> Level {
        match self {
            Edge::Rising => Level::High,
            Edge::Falling => Level::Low,
        }
    }
}

/// Pull resistor configuration for the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input.
    #[default]
    None,
    /// Internal pull-up.
    Up,
    /// Internal pull-down.
    Down,
}

/// Trait for abstracting an interrupt-capable input line.
///
/// All methods take `&self`: the same line is touched from the edge interrupt
/// (to disarm) and from the consumer task (to read and re-arm), so
/// implementations are expected to go through peripheral registers or a
/// critical section rather than Rust-level exclusive access.
///
/// At most one trigger is armed at a time. Arming one edge replaces whatever
/// was armed before.
pub trait InputLine {
    /// Reads the current logic level.
    ///
    /// Returns `None` when the level cannot be determined (e.g. a port
    /// expander read failed).
    fn level(&self) -> Option<Level>;

    /// Arms the rising-edge trigger and disarms the falling one.
    fn arm_rising(&self);

    /// Arms the falling-edge trigger and disarms the rising one.
    fn arm_falling(&self);

    /// Disarms both triggers. Must be idempotent and ISR-safe.
    fn disarm(&self);

    /// Applies a pull configuration. Lines without configurable pulls can
    /// ignore this.
    fn set_pull(&self, _pull: Pull) {}

    /// Arms the trigger for `edge`.
    fn arm(&self, edge: Edge) {
        match edge {
            Edge::Rising => self.arm_rising(),
            Edge::Falling => self.arm_falling(),
        }
    }
}

/// Placeholder line for software-driven engines.
///
/// Never read or armed: a software-driven engine takes its level from
/// [`EdgeLatch::inject`](crate::EdgeLatch::inject).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLine;

impl InputLine for NoLine {
    fn level(&self) -> Option<Level> {
        None
    }

    fn arm_rising(&self) {}

    fn arm_falling(&self) {}

    fn disarm(&self) {}
}
