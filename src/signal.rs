//! Flags posted from interrupt context to the consumer task.

/// A single event flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Flag {
    /// Rising edge latched.
    Rise = 1 << 0,
    /// Falling edge latched.
    Fall = 1 << 1,
    /// One-shot glitch filter timer expired.
    FilterElapsed = 1 << 2,
    /// Periodic hold timer ticked.
    HoldTick = 1 << 3,
}

impl Flag {
    /// Bit mask of this flag.
    #[inline]
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

/// Set of pending flags, taken atomically from an [`EdgeLatch`](crate::EdgeLatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlagSet(u8);

impl FlagSet {
    /// Empty set.
    pub const EMPTY: Self = FlagSet(0);

    /// Creates a set from a raw bit mask, dropping unknown bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        FlagSet(bits & Self::ALL_BITS)
    }

    const ALL_BITS: u8 = Flag::Rise.mask()
        | Flag::Fall.mask()
        | Flag::FilterElapsed.mask()
        | Flag::HoldTick.mask();

    /// Raw bit mask.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, flag: Flag) -> bool {
        self.0 & flag.mask() != 0
    }

    /// Returns the set with `flag` added.
    #[inline]
    #[must_use]
    pub const fn with(self, flag: Flag) -> Self {
        FlagSet(self.0 | flag.mask())
    }

    /// Returns the set with `flag` removed.
    #[inline]
    #[must_use]
    pub const fn without(self, flag: Flag) -> Self {
        FlagSet(self.0 & !flag.mask())
    }
}

impl From<Flag> for FlagSet {
    fn from(flag: Flag) -> Self {
        FlagSet(flag.mask())
    }
}

impl core::ops::BitOr<Flag> for FlagSet {
    type Output = FlagSet;

    fn bitor(self, flag: Flag) -> FlagSet {
        self.with(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_occupy_distinct_bits() {
        let all = [Flag::Rise, Flag::Fall, Flag::FilterElapsed, Flag::HoldTick];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_eq!(a.mask() & b.mask(), 0);
            }
        }
    }

    #[test]
    fn set_tracks_membership() {
        let set = FlagSet::EMPTY | Flag::Rise | Flag::HoldTick;
        assert!(set.contains(Flag::Rise));
        assert!(set.contains(Flag::HoldTick));
        assert!(!set.contains(Flag::Fall));
        assert!(!set.contains(Flag::FilterElapsed));

        let set = set.without(Flag::Rise);
        assert!(!set.contains(Flag::Rise));
        assert!(!set.is_empty());
        assert!(set.without(Flag::HoldTick).is_empty());
    }

    #[test]
    fn from_bits_drops_unknown_bits() {
        assert_eq!(FlagSet::from_bits(0xF0), FlagSet::EMPTY);
        assert_eq!(FlagSet::from_bits(0xFF).bits(), 0x0F);
    }
}
