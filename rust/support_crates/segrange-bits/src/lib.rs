//! Bitwise masking of contiguous value ranges.
//!
//! Applying a mask (AND) or an OR-mask to every value of a contiguous range
//! `[value, upper_value]` produces a set of values that may or may not be
//! contiguous itself. This crate decides, without enumerating the range:
//!
//! - the minimum and maximum of the resulting image, and
//! - whether the image is sequential (gap-free), which is what allows a masked
//!   segment range to be represented as a range again.
//!
//! # Key Types
//!
//! - [`Masker`] - strategy produced by [`mask_range`] for bitwise AND
//! - [`BitwiseOrer`] - strategy produced by [`bitwise_or_range`] for bitwise OR
//! - [`ExtendedMasker`] / [`ExtendedBitwiseOrer`] - the same strategies over
//!   values wider than 64 bits, expressed as [`ExtendedValue`] halves
//!
//! Strategies are small `Copy` values; they capture only what the range and
//! mask imply and are applied to the range bounds afterwards:
//!
//! ```rust
//! use segrange_bits::mask_range;
//!
//! // [2, 5] & 0b1111_1110 = {2, 4}
//! let masker = mask_range(2u32, 5, 0b1111_1110, 0xff);
//! assert!(!masker.is_sequential());
//! assert_eq!(masker.masked_lower(2, 0b1111_1110), 2);
//! assert_eq!(masker.masked_upper(5, 0b1111_1110), 4);
//! ```

pub mod extended;
pub mod masker;
pub mod orer;
mod range_image;
pub mod word;

pub use extended::{
    ExtendedBitwiseOrer, ExtendedMasker, ExtendedValue, bitwise_or_extended_range,
    mask_extended_range,
};
pub use masker::{Masker, mask_range};
pub use orer::{BitwiseOrer, bitwise_or_range};
pub use word::Word;
