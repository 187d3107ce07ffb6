//! Range strategies for values wider than 64 bits.
//!
//! Values such as IPv6 addresses are handled as two 64-bit halves: the
//! *extended* (high) half and the *regular* (low) half. When the highest
//! differing bit of a range lies in the extended half while the highest
//! masked bit lies in the regular half, value counts no longer fit in 64 bits;
//! the analysis therefore runs on the joined 128-bit values, which makes it
//! agree bit-for-bit with the 64-bit strategies whenever the extended halves
//! are zero.

use crate::{
    masker::{Masker, mask_range},
    orer::{BitwiseOrer, bitwise_or_range},
};

/// A value of up to 128 bits as its high and low 64-bit halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtendedValue {
    pub extended: u64,
    pub regular: u64,
}

impl ExtendedValue {
    pub const MAX: ExtendedValue = ExtendedValue::new(u64::MAX, u64::MAX);

    pub const fn new(extended: u64, regular: u64) -> ExtendedValue {
        ExtendedValue { extended, regular }
    }

    pub const fn from_u128(value: u128) -> ExtendedValue {
        ExtendedValue {
            extended: (value >> 64) as u64,
            regular: value as u64,
        }
    }

    pub const fn to_u128(self) -> u128 {
        ((self.extended as u128) << 64) | self.regular as u128
    }
}

impl From<u128> for ExtendedValue {
    fn from(value: u128) -> Self {
        ExtendedValue::from_u128(value)
    }
}

impl From<ExtendedValue> for u128 {
    fn from(value: ExtendedValue) -> Self {
        value.to_u128()
    }
}

/// Masking strategy over [`ExtendedValue`] ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendedMasker(Masker<u128>);

impl ExtendedMasker {
    pub fn masked_lower(&self, value: ExtendedValue, mask_value: ExtendedValue) -> ExtendedValue {
        self.0
            .masked_lower(value.to_u128(), mask_value.to_u128())
            .into()
    }

    pub fn masked_upper(
        &self,
        upper_value: ExtendedValue,
        mask_value: ExtendedValue,
    ) -> ExtendedValue {
        self.0
            .masked_upper(upper_value.to_u128(), mask_value.to_u128())
            .into()
    }

    pub fn is_sequential(&self) -> bool {
        self.0.is_sequential()
    }
}

/// OR strategy over [`ExtendedValue`] ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendedBitwiseOrer(BitwiseOrer<u128>);

impl ExtendedBitwiseOrer {
    pub fn ored_lower(&self, value: ExtendedValue, mask_value: ExtendedValue) -> ExtendedValue {
        self.0.ored_lower(value.to_u128(), mask_value.to_u128()).into()
    }

    pub fn ored_upper(&self, upper_value: ExtendedValue, mask_value: ExtendedValue) -> ExtendedValue {
        self.0
            .ored_upper(upper_value.to_u128(), mask_value.to_u128())
            .into()
    }

    pub fn is_sequential(&self) -> bool {
        self.0.is_sequential()
    }
}

pub fn mask_extended_range(
    value: ExtendedValue,
    upper_value: ExtendedValue,
    mask_value: ExtendedValue,
    max_value: ExtendedValue,
) -> ExtendedMasker {
    ExtendedMasker(mask_range(
        value.to_u128(),
        upper_value.to_u128(),
        mask_value.to_u128(),
        max_value.to_u128(),
    ))
}

pub fn bitwise_or_extended_range(
    value: ExtendedValue,
    upper_value: ExtendedValue,
    mask_value: ExtendedValue,
    max_value: ExtendedValue,
) -> ExtendedBitwiseOrer {
    ExtendedBitwiseOrer(bitwise_or_range(
        value.to_u128(),
        upper_value.to_u128(),
        mask_value.to_u128(),
        max_value.to_u128(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW_MAX: ExtendedValue = ExtendedValue::new(0, u64::MAX);

    #[test]
    fn test_agrees_with_regular_path() {
        fastrand::seed(1337);
        for _ in 0..5000 {
            let a = fastrand::u64(..);
            let b = a.saturating_add(fastrand::u64(0..1u64 << fastrand::u32(1..40)));
            let mask = fastrand::u64(..);

            let regular = mask_range(a, b, mask, u64::MAX);
            let extended = mask_extended_range(
                ExtendedValue::new(0, a),
                ExtendedValue::new(0, b),
                ExtendedValue::new(0, mask),
                LOW_MAX,
            );
            assert_eq!(regular.is_sequential(), extended.is_sequential());
            assert_eq!(
                extended.masked_lower(ExtendedValue::new(0, a), ExtendedValue::new(0, mask)),
                ExtendedValue::new(0, regular.masked_lower(a, mask))
            );
            assert_eq!(
                extended.masked_upper(ExtendedValue::new(0, b), ExtendedValue::new(0, mask)),
                ExtendedValue::new(0, regular.masked_upper(b, mask))
            );

            let regular = bitwise_or_range(a, b, mask, u64::MAX);
            let extended = bitwise_or_extended_range(
                ExtendedValue::new(0, a),
                ExtendedValue::new(0, b),
                ExtendedValue::new(0, mask),
                LOW_MAX,
            );
            assert_eq!(regular.is_sequential(), extended.is_sequential());
            assert_eq!(
                extended.ored_upper(ExtendedValue::new(0, b), ExtendedValue::new(0, mask)),
                ExtendedValue::new(0, regular.ored_upper(b, mask))
            );
        }
    }

    /// Embeds an 8-bit range at bits 60..68, straddling the two halves, with
    /// every bit below left free. The image is the 8-bit image scaled up, so
    /// an 8-bit masker predicts the 128-bit result.
    #[test]
    fn test_straddling_halves() {
        const SHIFT: u32 = 60;
        let low = (1u128 << SHIFT) - 1;
        for mask in (0u32..=0xff).step_by(7) {
            for lower in (0u32..=0xff).step_by(3) {
                for upper in (lower..=0xff).step_by(5) {
                    let small = mask_range(lower, upper, mask, 0xff);

                    let value = ExtendedValue::from_u128((lower as u128) << SHIFT);
                    let upper_value = ExtendedValue::from_u128(((upper as u128) << SHIFT) | low);
                    let mask_value = ExtendedValue::from_u128(((mask as u128) << SHIFT) | low);
                    let masker =
                        mask_extended_range(value, upper_value, mask_value, ExtendedValue::MAX);

                    assert_eq!(masker.is_sequential(), small.is_sequential());
                    assert_eq!(
                        masker.masked_lower(value, mask_value).to_u128(),
                        (small.masked_lower(lower, mask) as u128) << SHIFT
                    );
                    assert_eq!(
                        masker.masked_upper(upper_value, mask_value).to_u128(),
                        ((small.masked_upper(upper, mask) as u128) << SHIFT) | low
                    );
                }
            }
        }
    }

    #[test]
    fn test_value_halves() {
        let v = ExtendedValue::from_u128(0x0123_4567_89ab_cdef_fedc_ba98_7654_3210);
        assert_eq!(v.extended, 0x0123_4567_89ab_cdef);
        assert_eq!(v.regular, 0xfedc_ba98_7654_3210);
        assert_eq!(u128::from(v), 0x0123_4567_89ab_cdef_fedc_ba98_7654_3210);
        assert!(ExtendedValue::new(1, 0) > ExtendedValue::new(0, u64::MAX));
    }
}
