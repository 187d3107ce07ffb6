use num_traits::{PrimInt, Unsigned};

/// Unsigned machine word the range strategies operate on.
///
/// Segment values (8 and 16 bit) are usually carried in `u32`, combined
/// addresses in `u64`, and IPv6 values in `u128`. The logical width of a value
/// is given separately by its `max_value`, so a word may be wider than the
/// values it carries.
pub trait Word: PrimInt + Unsigned + std::fmt::Debug {
    /// Number of bits in the word itself (not the logical width).
    #[inline]
    fn word_bits() -> u32 {
        Self::zero().count_zeros()
    }

    /// Index (counted from the least significant bit) of the highest set bit.
    ///
    /// The value must be non-zero.
    #[inline]
    fn top_bit(self) -> u32 {
        debug_assert!(!self.is_zero());
        Self::word_bits() - 1 - self.leading_zeros()
    }

    /// All bits strictly below bit `index`.
    #[inline]
    fn bits_below(index: u32) -> Self {
        if index == 0 {
            Self::zero()
        } else {
            Self::max_value() >> (Self::word_bits() - index) as usize
        }
    }

    /// All bits at or below bit `index`.
    #[inline]
    fn bits_through(index: u32) -> Self {
        Self::max_value() >> (Self::word_bits() - 1 - index) as usize
    }

    #[inline]
    fn bit(index: u32) -> Self {
        Self::one() << index as usize
    }

    /// Whether the value has the shape `0..01..1` (including zero).
    #[inline]
    fn is_low_ones(self) -> bool {
        (self & self.wrapping_add_one()).is_zero()
    }

    #[inline]
    fn wrapping_add_one(self) -> Self {
        if self == Self::max_value() {
            Self::zero()
        } else {
            self + Self::one()
        }
    }
}

impl<T: PrimInt + Unsigned + std::fmt::Debug> Word for T {}
