//! Ordered sequences of equal-width segments.
//!
//! A [`SegmentSeries`] is the Cartesian product of its segment ranges: every
//! combination of one value per segment is a member. Optionally a prefix
//! length marks the series as a CIDR-style network. Series are immutable;
//! every operation returns a new series.
//!
//! - Single-valued series act as individual addresses and as range bounds.
//! - A series is *sequential* when its members, enumerated in nested
//!   lexicographic order, form a gap-free run of values: every segment after
//!   the first multi-valued segment must be full range.
//! - A series is a *prefix block* when it has a prefix length and every host
//!   bit beyond it ranges over all values.

use std::{
    cmp::Ordering,
    net::{Ipv4Addr, Ipv6Addr},
};

use num_bigint::BigUint;
use segrange_common::{Error, Result, verify_arg};

use crate::{kind::AddressKind, segment::Segment};

mod arith;
mod blocks;
mod prefix;

pub use blocks::SequentialBlockIter;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SegmentSeries {
    kind: AddressKind,
    bits_per_segment: u8,
    segments: Vec<Segment>,
    prefix_len: Option<u32>,
}

impl SegmentSeries {
    /// Creates a series from segment ranges; each pair may be given in either
    /// order.
    pub fn from_ranges(
        kind: AddressKind,
        bits_per_segment: u32,
        ranges: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<SegmentSeries> {
        let segments = ranges
            .into_iter()
            .map(|(lower, upper)| Segment::new(kind, bits_per_segment, lower, upper))
            .collect::<Result<Vec<_>>>()?;
        SegmentSeries::from_segments(kind, bits_per_segment, segments)
    }

    /// Creates a single-valued series.
    pub fn from_values(
        kind: AddressKind,
        bits_per_segment: u32,
        values: impl IntoIterator<Item = u32>,
    ) -> Result<SegmentSeries> {
        SegmentSeries::from_ranges(
            kind,
            bits_per_segment,
            values.into_iter().map(|value| (value, value)),
        )
    }

    pub fn from_segments(
        kind: AddressKind,
        bits_per_segment: u32,
        segments: Vec<Segment>,
    ) -> Result<SegmentSeries> {
        kind.verify_shape(bits_per_segment, segments.len())?;
        for segment in &segments {
            verify_arg!(
                segments,
                segment.kind() == kind && segment.bit_count() == bits_per_segment
            );
        }
        Ok(SegmentSeries::new_unchecked(
            kind,
            bits_per_segment,
            segments,
            None,
        ))
    }

    pub fn mac(bytes: [u8; 6]) -> SegmentSeries {
        SegmentSeries::from_bytes(AddressKind::Mac, &bytes)
    }

    pub fn mac64(bytes: [u8; 8]) -> SegmentSeries {
        SegmentSeries::from_bytes(AddressKind::Mac, &bytes)
    }

    fn from_bytes(kind: AddressKind, bytes: &[u8]) -> SegmentSeries {
        let segments = bytes
            .iter()
            .map(|&b| Segment::new_unchecked(kind, 8, b as u32, b as u32))
            .collect();
        SegmentSeries::new_unchecked(kind, 8, segments, None)
    }

    #[inline]
    pub(crate) fn new_unchecked(
        kind: AddressKind,
        bits_per_segment: u32,
        segments: Vec<Segment>,
        prefix_len: Option<u32>,
    ) -> SegmentSeries {
        SegmentSeries {
            kind,
            bits_per_segment: bits_per_segment as u8,
            segments,
            prefix_len,
        }
    }

    /// A series of the same family and shape with different segments.
    #[inline]
    pub(crate) fn with_segments(
        &self,
        segments: Vec<Segment>,
        prefix_len: Option<u32>,
    ) -> SegmentSeries {
        debug_assert_eq!(segments.len(), self.segments.len());
        SegmentSeries::new_unchecked(self.kind, self.bits_per_segment(), segments, prefix_len)
    }

    /// Annotates the series with a prefix length, without changing its values.
    pub fn with_prefix_len(&self, prefix_len: u32) -> Result<SegmentSeries> {
        verify_arg!(prefix_len, prefix_len <= self.bit_count());
        Ok(self.with_segments(self.segments.clone(), Some(prefix_len)))
    }

    pub fn without_prefix_len(&self) -> SegmentSeries {
        self.with_segments(self.segments.clone(), None)
    }

    #[inline]
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    #[inline]
    pub fn division_count(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn bits_per_segment(&self) -> u32 {
        self.bits_per_segment as u32
    }

    #[inline]
    pub fn bit_count(&self) -> u32 {
        self.bits_per_segment() * self.segments.len() as u32
    }

    #[inline]
    pub fn prefix_len(&self) -> Option<u32> {
        self.prefix_len
    }

    #[inline]
    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index]
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether both series have the same family, segment width and segment
    /// count, which is required for any pairwise arithmetic.
    pub fn has_same_shape(&self, other: &SegmentSeries) -> bool {
        self.kind == other.kind
            && self.bits_per_segment == other.bits_per_segment
            && self.segments.len() == other.segments.len()
    }

    pub fn is_multiple(&self) -> bool {
        self.segments.iter().any(Segment::is_multiple)
    }

    /// Whether the members form a single gap-free run of values.
    pub fn is_sequential(&self) -> bool {
        match self.segments.iter().position(Segment::is_multiple) {
            Some(first) => self.segments[first + 1..].iter().all(Segment::is_full_range),
            None => true,
        }
    }

    /// Number of members.
    pub fn count(&self) -> BigUint {
        match self.count_u128() {
            Some(count) => BigUint::from(count),
            None => self
                .segments
                .iter()
                .fold(BigUint::from(1u32), |acc, s| acc * s.count()),
        }
    }

    /// Number of members, when it fits in a `u128`.
    pub fn count_u128(&self) -> Option<u128> {
        self.segments
            .iter()
            .try_fold(1u128, |acc, s| acc.checked_mul(s.count() as u128))
    }

    pub fn compare_size(&self, other: &SegmentSeries) -> Ordering {
        match (self.count_u128(), other.count_u128()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.count().cmp(&other.count()),
        }
    }

    /// Whether every member of `other` is a member of this series.
    pub fn contains(&self, other: &SegmentSeries) -> bool {
        self.has_same_shape(other)
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.contains(b))
    }

    /// The lowest member, keeping the prefix length.
    pub fn lower(&self) -> SegmentSeries {
        let segments = self
            .segments
            .iter()
            .map(|s| s.with_range(s.lower(), s.lower()))
            .collect();
        self.with_segments(segments, self.prefix_len)
    }

    /// The highest member, keeping the prefix length.
    pub fn upper(&self) -> SegmentSeries {
        let segments = self
            .segments
            .iter()
            .map(|s| s.with_range(s.upper(), s.upper()))
            .collect();
        self.with_segments(segments, self.prefix_len)
    }

    /// Compares the lowest members of both series numerically.
    pub(crate) fn compare_lower_values(&self, other: &SegmentSeries) -> Ordering {
        debug_assert_eq!(self.bits_per_segment, other.bits_per_segment);
        self.segments
            .iter()
            .map(Segment::lower)
            .cmp(other.segments.iter().map(Segment::lower))
    }

    /// Compares the highest members of both series numerically.
    pub(crate) fn compare_upper_values(&self, other: &SegmentSeries) -> Ordering {
        debug_assert_eq!(self.bits_per_segment, other.bits_per_segment);
        self.segments
            .iter()
            .map(Segment::upper)
            .cmp(other.segments.iter().map(Segment::upper))
    }

    /// Verifies a pairwise operand has the same shape as this series.
    pub(crate) fn verify_same_shape(&self, other: &SegmentSeries) -> Result<()> {
        if self.has_same_shape(other) {
            Ok(())
        } else {
            Err(Error::invalid_arg(
                "other",
                format!(
                    "shape mismatch: {:?} {}x{} bits vs {:?} {}x{} bits",
                    self.kind,
                    self.segments.len(),
                    self.bits_per_segment,
                    other.kind,
                    other.segments.len(),
                    other.bits_per_segment
                ),
            ))
        }
    }
}

impl From<Ipv4Addr> for SegmentSeries {
    fn from(addr: Ipv4Addr) -> Self {
        SegmentSeries::from_bytes(AddressKind::Ipv4, &addr.octets())
    }
}

impl From<Ipv6Addr> for SegmentSeries {
    fn from(addr: Ipv6Addr) -> Self {
        let segments = addr
            .segments()
            .iter()
            .map(|&s| Segment::new_unchecked(AddressKind::Ipv6, 16, s as u32, s as u32))
            .collect();
        SegmentSeries::new_unchecked(AddressKind::Ipv6, 16, segments, None)
    }
}
