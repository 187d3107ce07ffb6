//! Conversions between single-valued series and integers, and increments.

use num_bigint::BigUint;
use segrange_common::{Error, Result, verify_arg};

use super::SegmentSeries;
use crate::{
    kind::AddressKind,
    segment::{Segment, max_value_for},
};

impl SegmentSeries {
    /// Creates a single-valued series of `segment_count` segments from the
    /// low `bits_per_segment * segment_count` bits of `value`.
    pub fn from_u128(
        kind: AddressKind,
        bits_per_segment: u32,
        segment_count: usize,
        value: u128,
    ) -> Result<SegmentSeries> {
        kind.verify_shape(bits_per_segment, segment_count)?;
        let bit_count = bits_per_segment * segment_count as u32;
        verify_arg!(value, bit_count >= 128 || value >> bit_count == 0);
        let max = max_value_for(bits_per_segment);
        let segments = (0..segment_count)
            .rev()
            .map(|i| {
                let shift = i as u32 * bits_per_segment;
                let digit = if shift >= 128 {
                    0
                } else {
                    (value >> shift) as u32 & max
                };
                Segment::new_unchecked(kind, bits_per_segment, digit, digit)
            })
            .collect();
        Ok(SegmentSeries::new_unchecked(
            kind,
            bits_per_segment,
            segments,
            None,
        ))
    }

    /// The lowest member as an integer, when the series fits in 128 bits.
    pub fn lower_u128(&self) -> Option<u128> {
        self.fold_u128(Segment::lower)
    }

    /// The highest member as an integer, when the series fits in 128 bits.
    pub fn upper_u128(&self) -> Option<u128> {
        self.fold_u128(Segment::upper)
    }

    pub fn lower_biguint(&self) -> BigUint {
        self.fold_biguint(Segment::lower)
    }

    pub fn upper_biguint(&self) -> BigUint {
        self.fold_biguint(Segment::upper)
    }

    fn fold_u128(&self, digit: impl Fn(&Segment) -> u32) -> Option<u128> {
        if self.bit_count() > 128 {
            return None;
        }
        let bps = self.bits_per_segment();
        Some(
            self.segments()
                .iter()
                .fold(0u128, |acc, s| (acc << bps) | digit(s) as u128),
        )
    }

    fn fold_biguint(&self, digit: impl Fn(&Segment) -> u32) -> BigUint {
        let bps = self.bits_per_segment();
        self.segments()
            .iter()
            .fold(BigUint::default(), |acc, s| (acc << bps) | BigUint::from(digit(s)))
    }

    /// Adds `n` to a single-valued series.
    ///
    /// Fails with `InvalidOperation` for multi-valued series and with
    /// `Overflow` when the result leaves the value range of the series. The
    /// result carries no prefix length.
    pub fn increment(&self, n: i64) -> Result<SegmentSeries> {
        if self.is_multiple() {
            return Err(Error::invalid_operation("increment of a multi-valued series"));
        }
        let bps = self.bits_per_segment();
        let max = max_value_for(bps) as u64;
        let mut values: Vec<u32> = self.segments().iter().map(Segment::lower).collect();
        if n >= 0 {
            let mut carry = n as u64;
            for value in values.iter_mut().rev() {
                if carry == 0 {
                    break;
                }
                let sum = *value as u64 + (carry & max);
                carry = (carry >> bps) + (sum >> bps);
                *value = (sum & max) as u32;
            }
            if carry != 0 {
                return Err(Error::overflow("incrementing a series"));
            }
        } else {
            let mut borrow = n.unsigned_abs();
            for value in values.iter_mut().rev() {
                if borrow == 0 {
                    break;
                }
                let digit = borrow & max;
                borrow >>= bps;
                let current = *value as u64;
                *value = if current >= digit {
                    (current - digit) as u32
                } else {
                    borrow += 1;
                    (current + max + 1 - digit) as u32
                };
            }
            if borrow != 0 {
                return Err(Error::overflow("decrementing a series"));
            }
        }
        let segments = self
            .segments()
            .iter()
            .zip(values)
            .map(|(s, value)| s.with_range(value, value))
            .collect();
        Ok(self.with_segments(segments, None))
    }

    /// The single value just below this one, wrapping at zero.
    pub(crate) fn predecessor(&self) -> SegmentSeries {
        let mut borrow = true;
        let mut segments = self.segments().to_vec();
        for s in segments.iter_mut().rev() {
            if !borrow {
                break;
            }
            let value = s.lower();
            borrow = value == 0;
            let value = if borrow { s.max_value() } else { value - 1 };
            *s = s.with_range(value, value);
        }
        self.with_segments(segments, None)
    }
}
