//! Sequential blocks, spanning and per-segment masking.

use std::cmp::Ordering;

use num_bigint::BigUint;
use segrange_common::{Error, Result, verify_arg};

use super::SegmentSeries;
use crate::{
    merge::{prefix_merge, sequential_merge},
    segment::Segment,
    split::{prefix_blocks_between, sequential_blocks_between},
};

impl SegmentSeries {
    /// Builds the block that keeps segments before `index` from this series,
    /// spans `[lower, upper]` in segment `index`, and covers every value in
    /// the segments after it.
    ///
    /// The result carries no prefix length.
    pub fn to_block(&self, index: usize, lower: u32, upper: u32) -> Result<SegmentSeries> {
        verify_arg!(index, index < self.division_count());
        let max = self.segment(index).max_value();
        verify_arg!(upper, lower <= upper && upper <= max);
        Ok(self.block_at(index, lower, upper))
    }

    pub(crate) fn block_at(&self, index: usize, lower: u32, upper: u32) -> SegmentSeries {
        let segments = self
            .segments()
            .iter()
            .enumerate()
            .map(|(i, s)| match i.cmp(&index) {
                Ordering::Less => *s,
                Ordering::Equal => s.with_range(lower, upper),
                Ordering::Greater => s.with_range(0, s.max_value()),
            })
            .collect();
        self.with_segments(segments, None)
    }

    /// Index of the last segment that is not full range, or 0 when every
    /// segment is full range.
    ///
    /// For a sequential series this is the segment that bounds the run.
    pub(crate) fn sequential_boundary(&self) -> usize {
        self.segments()
            .iter()
            .rposition(|s| !s.is_full_range())
            .unwrap_or(0)
    }

    /// Iterates the sequential blocks whose union is this series, in
    /// ascending order. A sequential series yields itself.
    pub fn sequential_block_iter(&self) -> SequentialBlockIter {
        SequentialBlockIter::new(self)
    }

    pub fn sequential_block_count(&self) -> BigUint {
        let boundary = self.sequential_boundary();
        self.segments()[..boundary]
            .iter()
            .fold(BigUint::from(1u32), |acc, s| acc * s.count())
    }

    /// The minimal list of prefix blocks whose union is this series.
    pub fn span_with_prefix_blocks(&self) -> Vec<SegmentSeries> {
        if self.is_sequential() {
            prefix_blocks_between(&self.lower(), &self.upper())
        } else {
            prefix_merge(std::slice::from_ref(self))
        }
    }

    /// The minimal list of sequential blocks whose union is this series.
    pub fn span_with_sequential_blocks(&self) -> Vec<SegmentSeries> {
        if self.is_sequential() {
            sequential_blocks_between(&self.lower(), &self.upper())
        } else {
            sequential_merge(std::slice::from_ref(self))
        }
    }

    /// ANDs each segment with the lowest value of the matching mask segment.
    pub fn mask(&self, mask: &SegmentSeries) -> Result<SegmentSeries> {
        self.apply_mask(mask, Segment::mask)
    }

    /// ORs each segment with the lowest value of the matching mask segment.
    pub fn bitwise_or(&self, mask: &SegmentSeries) -> Result<SegmentSeries> {
        self.apply_mask(mask, Segment::bitwise_or)
    }

    fn apply_mask(
        &self,
        mask: &SegmentSeries,
        op: impl Fn(&Segment, u32) -> Option<Segment>,
    ) -> Result<SegmentSeries> {
        self.verify_same_shape(mask)?;
        let segments = self
            .segments()
            .iter()
            .zip(mask.segments())
            .enumerate()
            .map(|(i, (s, m))| op(s, m.lower()).ok_or_else(|| Error::incompatible_mask(i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_segments(segments, None))
    }
}

/// Odometer over the leading segments of a non-sequential series.
///
/// Segments before the boundary are enumerated value by value; the boundary
/// segment keeps its range and the full-range segments after it are left as
/// they are.
pub struct SequentialBlockIter {
    template: SegmentSeries,
    boundary: usize,
    values: Option<Vec<u32>>,
}

impl SequentialBlockIter {
    fn new(series: &SegmentSeries) -> SequentialBlockIter {
        let boundary = series.sequential_boundary();
        let values = series.segments()[..boundary]
            .iter()
            .map(Segment::lower)
            .collect();
        SequentialBlockIter {
            template: series.without_prefix_len(),
            boundary,
            values: Some(values),
        }
    }

    fn advance(&mut self) {
        let Some(values) = self.values.as_mut() else {
            return;
        };
        for (i, value) in values.iter_mut().enumerate().rev() {
            let segment = self.template.segment(i);
            if *value < segment.upper() {
                *value += 1;
                return;
            }
            *value = segment.lower();
        }
        self.values = None;
    }
}

impl Iterator for SequentialBlockIter {
    type Item = SegmentSeries;

    fn next(&mut self) -> Option<SegmentSeries> {
        let values = self.values.as_ref()?;
        let segments = self
            .template
            .segments()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i < self.boundary {
                    s.with_range(values[i], values[i])
                } else {
                    *s
                }
            })
            .collect();
        let block = self.template.with_segments(segments, None);
        self.advance();
        Some(block)
    }
}
