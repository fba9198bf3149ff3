//! Debounce classification of a latched edge against the re-read line level.

use crate::config::Polarity;
use crate::line::Level;

/// Classification of a latched edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// The level settled at the active level.
    Press,
    /// The level settled at the inactive level.
    Release,
    /// The line moved back before the filter window closed. Discarded.
    Noise,
    /// The level could not be matched to either state.
    InvalidLevel,
}

/// Classifies a settled edge.
///
/// `latched` is the level recorded when the edge fired, `current` the level
/// read after the filter window (or `None` if the read failed).
pub fn classify(latched: Level, current: Option<Level>, polarity: Polarity) -> Decision {
    let Some(current) = current else {
        return Decision::InvalidLevel;
    };

    if current != latched {
        return Decision::Noise;
    }

    if current == polarity.inactive_level() {
        Decision::Release
    } else {
        Decision::Press
    }
}
