//! Prefix length and host bit operations.
//!
//! A prefix length `P` counts network bits from the most significant end of
//! the series. Segment `i` covers bits `[i * bps, (i + 1) * bps)`, so its
//! network part is the top `clamp(P - i * bps, 0, bps)` bits and the rest are
//! host bits.

use segrange_common::{Error, Result, verify_arg};

use super::SegmentSeries;
use crate::segment::{Segment, host_mask_for};

impl SegmentSeries {
    /// Number of network bits that fall inside segment `index` for the given
    /// prefix length.
    #[inline]
    pub(crate) fn segment_network_bits(&self, index: usize, prefix_len: u32) -> u32 {
        let bps = self.bits_per_segment();
        prefix_len.saturating_sub(index as u32 * bps).min(bps)
    }

    #[inline]
    fn segment_host_mask(&self, index: usize, prefix_len: u32) -> u32 {
        host_mask_for(
            self.bits_per_segment(),
            self.segment_network_bits(index, prefix_len),
        )
    }

    /// Whether some member has all host bits beyond `prefix_len` clear.
    pub fn includes_zero_host_len(&self, prefix_len: u32) -> bool {
        self.segments().iter().enumerate().all(|(i, s)| {
            let host = self.segment_host_mask(i, prefix_len);
            (s.lower() & host) == 0 || (s.lower() | host) < s.upper()
        })
    }

    /// Whether some member has all host bits beyond `prefix_len` set.
    pub fn includes_max_host_len(&self, prefix_len: u32) -> bool {
        self.segments().iter().enumerate().all(|(i, s)| {
            let host = self.segment_host_mask(i, prefix_len);
            (s.upper() & host) == host || (s.upper() & !host) > s.lower()
        })
    }

    /// Clears every host bit beyond `prefix_len`.
    ///
    /// Fails with `IncompatibleMask` when a multi-valued segment would lose
    /// its contiguity. The result carries no prefix length.
    pub fn to_zero_host_len(&self, prefix_len: u32) -> Result<SegmentSeries> {
        verify_arg!(prefix_len, prefix_len <= self.bit_count());
        let segments = self
            .segments()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let host = self.segment_host_mask(i, prefix_len);
                if host == 0 {
                    Ok(*s)
                } else {
                    s.mask(!host).ok_or_else(|| Error::incompatible_mask(i))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_segments(segments, None))
    }

    /// Sets every host bit beyond `prefix_len`.
    ///
    /// Fails with `IncompatibleMask` when a multi-valued segment would lose
    /// its contiguity. The result carries no prefix length.
    pub fn to_max_host_len(&self, prefix_len: u32) -> Result<SegmentSeries> {
        verify_arg!(prefix_len, prefix_len <= self.bit_count());
        let segments = self
            .segments()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let host = self.segment_host_mask(i, prefix_len);
                if host == 0 {
                    Ok(*s)
                } else {
                    s.bitwise_or(host).ok_or_else(|| Error::incompatible_mask(i))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_segments(segments, None))
    }

    /// Widens the series to the prefix block(s) of length `prefix_len`
    /// covering it, annotated with that prefix length.
    pub fn to_prefix_block_len(&self, prefix_len: u32) -> Result<SegmentSeries> {
        verify_arg!(prefix_len, prefix_len <= self.bit_count());
        Ok(self.widen_to_prefix(prefix_len))
    }

    pub(crate) fn widen_to_prefix(&self, prefix_len: u32) -> SegmentSeries {
        debug_assert!(prefix_len <= self.bit_count());
        let segments = self
            .segments()
            .iter()
            .enumerate()
            .map(|(i, s)| s.to_prefix_block(self.segment_network_bits(i, prefix_len)))
            .collect();
        self.with_segments(segments, Some(prefix_len))
    }

    /// The lowest member with every host bit beyond `prefix_len` cleared.
    pub(crate) fn lower_with_zero_host(&self, prefix_len: u32) -> SegmentSeries {
        let segments = self
            .segments()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let value = s.lower() & !self.segment_host_mask(i, prefix_len);
                s.with_range(value, value)
            })
            .collect();
        self.with_segments(segments, None)
    }

    /// The lowest member with every host bit beyond `prefix_len` set.
    pub(crate) fn lower_with_max_host(&self, prefix_len: u32) -> SegmentSeries {
        let segments = self
            .segments()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let value = s.lower() | self.segment_host_mask(i, prefix_len);
                s.with_range(value, value)
            })
            .collect();
        self.with_segments(segments, None)
    }

    /// Whether every member's block of length `prefix_len` is included.
    pub fn contains_prefix_block(&self, prefix_len: u32) -> bool {
        prefix_len <= self.bit_count()
            && self.segments().iter().enumerate().all(|(i, s)| {
                let host = self.segment_host_mask(i, prefix_len);
                (s.lower() & host) == 0 && (s.upper() & host) == host
            })
    }

    /// Whether the series is exactly one block of length `prefix_len`.
    pub fn contains_single_prefix_block(&self, prefix_len: u32) -> bool {
        prefix_len <= self.bit_count()
            && self
                .segments()
                .iter()
                .enumerate()
                .all(|(i, s)| s.is_single_prefix_block(self.segment_network_bits(i, prefix_len)))
    }

    pub fn is_prefix_block(&self) -> bool {
        self.prefix_len()
            .is_some_and(|prefix_len| self.contains_prefix_block(prefix_len))
    }

    pub fn is_single_prefix_block(&self) -> bool {
        self.prefix_len()
            .is_some_and(|prefix_len| self.contains_single_prefix_block(prefix_len))
    }

    /// The prefix length for which the series is exactly one prefix block,
    /// if there is one.
    pub fn prefix_len_for_single_block(&self) -> Option<u32> {
        let bps = self.bits_per_segment();
        let mut prefix_len = None;
        for (i, s) in self.segments().iter().enumerate() {
            if prefix_len.is_some() {
                if !s.is_full_range() {
                    return None;
                }
                continue;
            }
            let network_bits = segment_block_network_bits(s)?;
            if network_bits < bps {
                prefix_len = Some(i as u32 * bps + network_bits);
            }
        }
        Some(prefix_len.unwrap_or(self.bit_count()))
    }
}

/// Network bits of a segment that is a single aligned block of values.
fn segment_block_network_bits(segment: &Segment) -> Option<u32> {
    let span = segment.upper() - segment.lower();
    let aligned = (span & span.wrapping_add(1)) == 0 && (segment.lower() & span) == 0;
    aligned.then(|| segment.bit_count() - (32 - span.leading_zeros()))
}
