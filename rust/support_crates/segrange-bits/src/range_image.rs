//! Shared analysis behind [`crate::Masker`] and [`crate::BitwiseOrer`].
//!
//! Both operations are described in terms of the *varying* bits of the mask:
//! the bits through which a value's own bit survives. For AND these are the set
//! bits of the mask, for OR they are the clear bits. Every other bit is forced
//! to a constant, so the shape of the image depends only on the varying bits.

use crate::word::Word;

/// Shape of `{v op mask : v in [value, upper_value]}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RangeImage<T> {
    /// The image bounds are the bounds of the range with the mask applied and
    /// the image has no gaps.
    Trivial,
    /// Same bounds as `Trivial`, but the image has gaps. Produced for the full
    /// value range when the varying bits are not a run of low ones.
    TrivialNonSequential,
    /// The varying bits at and below the highest varying bit of the range span
    /// every combination (or, when not sequential, at least reach both
    /// extremes), so the image bounds are obtained by clearing/setting
    /// `full_range_bits` in the range bounds.
    FullRange { full_range_bits: T, sequential: bool },
    /// The image has gaps and its bounds come from these two range members.
    Specific { lower: T, upper: T },
}

impl<T: Word> RangeImage<T> {
    pub(crate) fn is_sequential(&self) -> bool {
        match self {
            RangeImage::Trivial => true,
            RangeImage::TrivialNonSequential | RangeImage::Specific { .. } => false,
            RangeImage::FullRange { sequential, .. } => *sequential,
        }
    }

    /// The range member whose image is the lowest.
    #[inline]
    pub(crate) fn lower_source(&self, value: T) -> T {
        match *self {
            RangeImage::Trivial | RangeImage::TrivialNonSequential => value,
            RangeImage::FullRange {
                full_range_bits, ..
            } => value & !full_range_bits,
            RangeImage::Specific { lower, .. } => lower,
        }
    }

    /// The range member whose image is the highest.
    #[inline]
    pub(crate) fn upper_source(&self, upper_value: T) -> T {
        match *self {
            RangeImage::Trivial | RangeImage::TrivialNonSequential => upper_value,
            RangeImage::FullRange {
                full_range_bits, ..
            } => upper_value | full_range_bits,
            RangeImage::Specific { upper, .. } => upper,
        }
    }
}

/// Analyzes the image of `[value, upper_value]` under an operation whose
/// varying bits are `varying`.
///
/// `max_value` is the all-ones value of the logical width and bounds both
/// range ends. The ends may be given in either order.
pub(crate) fn analyze<T: Word>(value: T, upper_value: T, varying: T, max_value: T) -> RangeImage<T> {
    let (value, upper_value) = if value <= upper_value {
        (value, upper_value)
    } else {
        (upper_value, value)
    };
    debug_assert!(upper_value <= max_value);

    if value == upper_value || varying.is_zero() || varying == max_value {
        return RangeImage::Trivial;
    }
    if value.is_zero() && upper_value == max_value {
        // Every combination of the varying bits is present.
        return if varying.is_low_ones() {
            RangeImage::Trivial
        } else {
            RangeImage::TrivialNonSequential
        };
    }

    // Bits above the highest differing bit are the same in every value of the
    // range, so only the varying bits at or below it matter.
    let top_differing = (value ^ upper_value).top_bit();
    let varying_in_range = varying & T::bits_through(top_differing);
    if varying_in_range.is_zero() {
        return RangeImage::Trivial;
    }
    let top_varying = varying_in_range.top_bit();
    let below = T::bits_below(top_varying);
    let all_varying_below = (varying & below) == below;

    if top_varying < top_differing {
        // The range crosses a boundary above the top varying bit, so the low
        // (top_varying + 1) bits wrap and reach both all-zeros and all-ones.
        // Every combination appears only if the range holds at least
        // 2^(top_varying + 1) values.
        let full_range_bits = below | T::bit(top_varying);
        let sequential = all_varying_below && (upper_value - value) >= full_range_bits;
        return RangeImage::FullRange {
            full_range_bits,
            sequential,
        };
    }

    if all_varying_below {
        return RangeImage::Trivial;
    }

    // The top varying bit is the top differing bit. The lowest image comes from
    // the half of the range with that bit clear, the highest from the half with
    // it set; pick the extreme members greedily, one varying bit at a time.
    let mut upper_candidate = upper_value & !below;
    let mut lower_candidate = value | below;
    let mut bit = top_varying;
    while bit > 0 {
        bit -= 1;
        let bit_value = T::bit(bit);
        if !(varying & bit_value).is_zero() {
            let candidate = upper_candidate | bit_value;
            if candidate <= upper_value {
                upper_candidate = candidate;
            }
            let candidate = lower_candidate & !bit_value;
            if candidate >= value {
                lower_candidate = candidate;
            }
        }
    }
    RangeImage::Specific {
        lower: lower_candidate,
        upper: upper_candidate,
    }
}
