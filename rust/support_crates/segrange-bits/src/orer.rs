//! Bitwise OR of a mask with every value of a contiguous range.

use crate::{
    range_image::{RangeImage, analyze},
    word::Word,
};

/// Strategy describing `{v | mask : v in [value, upper_value]}`.
///
/// The OR counterpart of [`crate::Masker`]: the bits that let a value's own bit
/// through are the clear bits of the mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitwiseOrer<T>(RangeImage<T>);

impl<T: Word> BitwiseOrer<T> {
    pub const DEFAULT: BitwiseOrer<T> = BitwiseOrer(RangeImage::Trivial);

    pub const DEFAULT_NON_SEQUENTIAL: BitwiseOrer<T> =
        BitwiseOrer(RangeImage::TrivialNonSequential);

    #[inline]
    pub fn ored_lower(&self, value: T, mask_value: T) -> T {
        self.0.lower_source(value) | mask_value
    }

    #[inline]
    pub fn ored_upper(&self, upper_value: T, mask_value: T) -> T {
        self.0.upper_source(upper_value) | mask_value
    }

    #[inline]
    pub fn is_sequential(&self) -> bool {
        self.0.is_sequential()
    }
}

/// Computes the OR strategy for `[value, upper_value] | mask_value`.
///
/// `max_value` is the all-ones value for the logical width of the range. The
/// range ends may be given in either order; [`BitwiseOrer::ored_lower`] is then
/// applied to the smaller one and [`BitwiseOrer::ored_upper`] to the larger one.
pub fn bitwise_or_range<T: Word>(
    value: T,
    upper_value: T,
    mask_value: T,
    max_value: T,
) -> BitwiseOrer<T> {
    BitwiseOrer(analyze(value, upper_value, !mask_value & max_value, max_value))
}
