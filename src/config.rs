//! Engine configuration and construction errors.

use crate::line::{Level, Pull};

/// Default glitch filter window: 20 ms from the edge to the decision.
pub const DEFAULT_FILTER_TIMEOUT_US: u32 = 20_000;

/// Which logic level means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pressed reads low (button to ground, pull-up).
    #[default]
    ActiveLow,
    /// Pressed reads high (button to supply, pull-down).
    ActiveHigh,
}

impl Polarity {
    /// Level that represents a pressed button.
    #[inline]
    pub fn active_level(self) -> Level {
        match self {
            Polarity::ActiveLow => Level::Low,
            Polarity::ActiveHigh => Level::High,
        }
    }

    /// Level that represents a released button.
    #[inline]
    pub fn inactive_level(self) -> Level {
        self.active_level().toggled()
    }

    /// True if `level` means pressed under this polarity.
    #[inline]
    pub fn is_pressed(self, level: Level) -> bool {
        level == self.active_level()
    }
}

/// Engine configuration.
///
/// Build with [`Default`] and the `with_*` methods:
///
/// ```
/// use push_button::{ButtonConfig, Polarity, Pull};
///
/// let config = ButtonConfig::default()
///     .with_polarity(Polarity::ActiveHigh)
///     .with_pull(Pull::Down)
///     .with_filter_timeout_us(10_000);
/// assert!(config.glitch_filter);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Which level means pressed.
    pub polarity: Polarity,

    /// Pull applied to the line at construction.
    pub pull: Pull,

    /// Glitch filter window in microseconds.
    pub filter_timeout_us: u32,

    /// Whether edges wait for the filter window before being classified.
    pub glitch_filter: bool,

    /// Enables debug traces for this instance.
    pub debug: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::ActiveLow,
            pull: Pull::None,
            filter_timeout_us: DEFAULT_FILTER_TIMEOUT_US,
            glitch_filter: true,
            debug: false,
        }
    }
}

impl ButtonConfig {
    #[must_use]
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    #[must_use]
    pub fn with_pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    #[must_use]
    pub fn with_filter_timeout_us(mut self, timeout_us: u32) -> Self {
        self.filter_timeout_us = timeout_us;
        self
    }

    #[must_use]
    pub fn with_glitch_filter(mut self, enabled: bool) -> Self {
        self.glitch_filter = enabled;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.glitch_filter && self.filter_timeout_us == 0 {
            return Err(ConfigError::ZeroFilterTimeout);
        }
        Ok(())
    }
}

/// Converts a hold interval in milliseconds to timer microseconds.
pub(crate) fn hold_interval_us(millis: u32) -> Result<u32, ConfigError> {
    millis
        .checked_mul(1000)
        .ok_or(ConfigError::HoldIntervalOverflow { millis })
}

/// Errors raised when building or reconfiguring an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Glitch filter enabled with a zero-length window.
    ZeroFilterTimeout,

    /// The edge latch is already owned by another engine.
    LatchInUse,

    /// Hold interval does not fit the timer's microsecond range.
    HoldIntervalOverflow {
        /// The requested interval.
        millis: u32,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroFilterTimeout => {
                write!(f, "glitch filter enabled with a zero timeout")
            }
            ConfigError::LatchInUse => {
                write!(f, "edge latch is already claimed by another engine")
            }
            ConfigError::HoldIntervalOverflow { millis } => {
                write!(f, "hold interval of {} ms overflows the timer range", millis)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
