//! Contiguous spans of values between two single-valued series.

use std::cmp::Ordering;

use num_bigint::BigUint;
use segrange_common::Result;

use crate::{
    kind::AddressKind,
    series::SegmentSeries,
    split::{prefix_blocks_between, sequential_blocks_between},
};

/// Every value from `lower` to `upper` inclusive.
///
/// Unlike a [`SegmentSeries`], which is a product of per-segment ranges, a
/// range can describe any contiguous run, for example `1.2.3.250` through
/// `1.2.4.5`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SequentialRange {
    lower: SegmentSeries,
    upper: SegmentSeries,
}

impl SequentialRange {
    /// Creates the range spanning both series.
    ///
    /// The bounds may be given in either order; the range runs from the
    /// lowest member of either to the highest member of either. Prefix
    /// lengths are dropped. Fails with `InvalidArgument` when the series
    /// differ in shape.
    pub fn new(a: &SegmentSeries, b: &SegmentSeries) -> Result<SequentialRange> {
        a.verify_same_shape(b)?;
        let lower = match a.compare_lower_values(b) {
            Ordering::Greater => b.lower(),
            _ => a.lower(),
        };
        let upper = match a.compare_upper_values(b) {
            Ordering::Less => b.upper(),
            _ => a.upper(),
        };
        Ok(SequentialRange {
            lower: lower.without_prefix_len(),
            upper: upper.without_prefix_len(),
        })
    }

    #[inline]
    pub fn lower(&self) -> &SegmentSeries {
        &self.lower
    }

    #[inline]
    pub fn upper(&self) -> &SegmentSeries {
        &self.upper
    }

    #[inline]
    pub fn kind(&self) -> AddressKind {
        self.lower.kind()
    }

    #[inline]
    pub fn bit_count(&self) -> u32 {
        self.lower.bit_count()
    }

    #[inline]
    pub fn bits_per_segment(&self) -> u32 {
        self.lower.bits_per_segment()
    }

    pub fn is_multiple(&self) -> bool {
        self.lower != self.upper
    }

    /// Number of values in the range.
    pub fn count(&self) -> BigUint {
        match self.count_u128() {
            Some(count) => BigUint::from(count),
            None => self.upper.upper_biguint() - self.lower.lower_biguint() + 1u32,
        }
    }

    /// Number of values in the range, when it fits in a `u128`.
    pub fn count_u128(&self) -> Option<u128> {
        let lower = self.lower.lower_u128()?;
        let upper = self.upper.upper_u128()?;
        (upper - lower).checked_add(1)
    }

    /// Whether every member of `series` lies in the range.
    pub fn contains(&self, series: &SegmentSeries) -> bool {
        self.lower.has_same_shape(series)
            && self.lower.compare_lower_values(series) != Ordering::Greater
            && self.upper.compare_upper_values(series) != Ordering::Less
    }

    pub fn contains_range(&self, other: &SequentialRange) -> bool {
        self.contains(&other.lower) && self.contains(&other.upper)
    }

    /// Whether the range is exactly the members of `series`.
    pub fn is_sequential_series(&self, series: &SegmentSeries) -> bool {
        series.is_sequential()
            && self.lower.has_same_shape(series)
            && self.lower.compare_lower_values(series) == Ordering::Equal
            && self.upper.compare_upper_values(series) == Ordering::Equal
    }

    pub fn span_with_prefix_blocks(&self) -> Vec<SegmentSeries> {
        prefix_blocks_between(&self.lower, &self.upper)
    }

    pub fn span_with_sequential_blocks(&self) -> Vec<SegmentSeries> {
        sequential_blocks_between(&self.lower, &self.upper)
    }
}
