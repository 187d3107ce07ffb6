//! A single fixed-width segment holding a contiguous range of values.

use segrange_bits::{bitwise_or_range, mask_range};
use segrange_common::{Result, verify_arg};

use crate::kind::AddressKind;

/// A contiguous range `[lower, upper]` of `bit_count`-wide unsigned values.
///
/// Values are carried in `u32`; widths up to 32 bits are supported, with 8
/// (IPv4, MAC) and 16 (IPv6) as the common cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    kind: AddressKind,
    bit_count: u8,
    lower: u32,
    upper: u32,
}

impl Segment {
    /// Creates a segment; the bounds may be given in either order.
    pub fn new(kind: AddressKind, bit_count: u32, lower: u32, upper: u32) -> Result<Segment> {
        kind.verify_segment_bits(bit_count)?;
        let max = max_value_for(bit_count);
        verify_arg!(lower, lower <= max);
        verify_arg!(upper, upper <= max);
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        Ok(Segment::new_unchecked(kind, bit_count, lower, upper))
    }

    pub fn single(kind: AddressKind, bit_count: u32, value: u32) -> Result<Segment> {
        Segment::new(kind, bit_count, value, value)
    }

    #[inline]
    pub(crate) fn new_unchecked(kind: AddressKind, bit_count: u32, lower: u32, upper: u32) -> Segment {
        debug_assert!(lower <= upper && upper <= max_value_for(bit_count));
        Segment {
            kind,
            bit_count: bit_count as u8,
            lower,
            upper,
        }
    }

    /// The same segment family and width with different bounds.
    #[inline]
    pub(crate) fn with_range(&self, lower: u32, upper: u32) -> Segment {
        Segment::new_unchecked(self.kind, self.bit_count(), lower, upper)
    }

    #[inline]
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    #[inline]
    pub fn bit_count(&self) -> u32 {
        self.bit_count as u32
    }

    #[inline]
    pub fn lower(&self) -> u32 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> u32 {
        self.upper
    }

    #[inline]
    pub fn max_value(&self) -> u32 {
        max_value_for(self.bit_count())
    }

    #[inline]
    pub fn is_multiple(&self) -> bool {
        self.lower != self.upper
    }

    #[inline]
    pub fn is_full_range(&self) -> bool {
        self.lower == 0 && self.upper == self.max_value()
    }

    /// Number of distinct values in the segment.
    #[inline]
    pub fn count(&self) -> u64 {
        (self.upper - self.lower) as u64 + 1
    }

    pub fn contains(&self, other: &Segment) -> bool {
        self.bit_count == other.bit_count && self.lower <= other.lower && other.upper <= self.upper
    }

    /// Whether the segment is exactly the block of all values sharing the top
    /// `network_bits` bits of its lower value.
    pub fn is_single_prefix_block(&self, network_bits: u32) -> bool {
        let host = host_mask_for(self.bit_count(), network_bits);
        (self.lower & host) == 0 && self.upper == (self.lower | host)
    }

    /// Applies `mask_value` to every value; `None` when the result has gaps.
    pub fn mask(&self, mask_value: u32) -> Option<Segment> {
        let max = self.max_value();
        let mask_value = mask_value & max;
        let masker = mask_range(self.lower, self.upper, mask_value, max);
        masker.is_sequential().then(|| {
            self.with_range(
                masker.masked_lower(self.lower, mask_value),
                masker.masked_upper(self.upper, mask_value),
            )
        })
    }

    /// ORs `mask_value` into every value; `None` when the result has gaps.
    pub fn bitwise_or(&self, mask_value: u32) -> Option<Segment> {
        let max = self.max_value();
        let mask_value = mask_value & max;
        let orer = bitwise_or_range(self.lower, self.upper, mask_value, max);
        orer.is_sequential().then(|| {
            self.with_range(
                orer.ored_lower(self.lower, mask_value),
                orer.ored_upper(self.upper, mask_value),
            )
        })
    }

    /// Widens the segment to cover every host value beyond `network_bits`.
    pub fn to_prefix_block(&self, network_bits: u32) -> Segment {
        let host = host_mask_for(self.bit_count(), network_bits);
        self.with_range(self.lower & !host, self.upper | host)
    }
}

#[inline]
pub(crate) fn max_value_for(bit_count: u32) -> u32 {
    u32::MAX >> (32 - bit_count)
}

/// Mask of the host bits of a `bit_count`-wide value whose top `network_bits`
/// bits form the network part.
#[inline]
pub(crate) fn host_mask_for(bit_count: u32, network_bits: u32) -> u32 {
    if network_bits >= bit_count {
        0
    } else {
        max_value_for(bit_count - network_bits)
    }
}
