//! Bitwise AND of a mask with every value of a contiguous range.

use crate::{
    range_image::{RangeImage, analyze},
    word::Word,
};

/// Strategy describing `{v & mask : v in [value, upper_value]}`.
///
/// Obtained from [`mask_range`]. The masker is applied to the bounds of the
/// same range and the same mask it was computed for:
/// [`Masker::masked_lower`] and [`Masker::masked_upper`] return the exact
/// minimum and maximum of the masked image, and [`Masker::is_sequential`] tells
/// whether every value between them is part of the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Masker<T>(RangeImage<T>);

impl<T: Word> Masker<T> {
    /// The masker for which masking the bounds is enough and the image is
    /// sequential.
    pub const DEFAULT: Masker<T> = Masker(RangeImage::Trivial);

    /// Like [`Masker::DEFAULT`], but the image has gaps.
    pub const DEFAULT_NON_SEQUENTIAL: Masker<T> = Masker(RangeImage::TrivialNonSequential);

    #[inline]
    pub fn masked_lower(&self, value: T, mask_value: T) -> T {
        self.0.lower_source(value) & mask_value
    }

    #[inline]
    pub fn masked_upper(&self, upper_value: T, mask_value: T) -> T {
        self.0.upper_source(upper_value) & mask_value
    }

    #[inline]
    pub fn is_sequential(&self) -> bool {
        self.0.is_sequential()
    }

    /// Bits that range over every combination below the highest masked bit that
    /// differs within the range, if the image has that shape.
    pub fn full_range_bits(&self) -> Option<T> {
        match self.0 {
            RangeImage::FullRange {
                full_range_bits, ..
            } => Some(full_range_bits),
            _ => None,
        }
    }
}

/// Computes the masking strategy for `[value, upper_value] & mask_value`.
///
/// `max_value` is the all-ones value for the logical width of the range (for
/// example `0xff` for an 8-bit segment carried in a `u32`). The range ends may
/// be given in either order; [`Masker::masked_lower`] is then applied to the
/// smaller one and [`Masker::masked_upper`] to the larger one.
///
/// # Example
/// ```rust
/// use segrange_bits::mask_range;
///
/// // [4, 7] & 0b1111_1100 = {4}
/// let masker = mask_range(4u32, 7, 0b1111_1100, 0xff);
/// assert!(masker.is_sequential());
/// assert_eq!(masker.masked_lower(4, 0b1111_1100), 4);
/// assert_eq!(masker.masked_upper(7, 0b1111_1100), 4);
/// ```
pub fn mask_range<T: Word>(value: T, upper_value: T, mask_value: T, max_value: T) -> Masker<T> {
    Masker(analyze(value, upper_value, mask_value & max_value, max_value))
}
