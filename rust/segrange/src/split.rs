//! Decomposition of a contiguous range into blocks.
//!
//! Both splitters walk the segments left to right, find the first segment
//! where the bounds differ and either emit a block or cut the range into
//! pieces. Pieces that are not processed immediately go on an explicit work
//! stack, so the output comes out in ascending order without recursion.

use segrange_common::Result;

use crate::{range::SequentialRange, series::SegmentSeries};

/// Splits `[lower, upper]` into the minimal ascending list of prefix blocks
/// whose union is exactly the range.
///
/// The bounds may be given in either order; multi-valued bounds contribute
/// their lowest and highest member. Prefix lengths on the inputs are ignored.
/// Fails with `InvalidArgument` when the bounds differ in shape.
pub fn split_into_prefix_blocks(
    lower: &SegmentSeries,
    upper: &SegmentSeries,
) -> Result<Vec<SegmentSeries>> {
    let range = SequentialRange::new(lower, upper)?;
    let blocks = prefix_blocks_between(range.lower(), range.upper());
    log::trace!(
        "split {} bit range into {} prefix blocks",
        range.bit_count(),
        blocks.len()
    );
    Ok(blocks)
}

/// Splits `[lower, upper]` into the ascending list of sequential blocks whose
/// union is exactly the range.
///
/// Every block keeps the segments before some index single-valued, spans a
/// range in that segment and covers all values after it. Same argument
/// handling as [`split_into_prefix_blocks`]. The blocks carry no prefix
/// length.
pub fn split_into_sequential_blocks(
    lower: &SegmentSeries,
    upper: &SegmentSeries,
) -> Result<Vec<SegmentSeries>> {
    let range = SequentialRange::new(lower, upper)?;
    let blocks = sequential_blocks_between(range.lower(), range.upper());
    log::trace!(
        "split {} bit range into {} sequential blocks",
        range.bit_count(),
        blocks.len()
    );
    Ok(blocks)
}

struct PrefixFrame {
    lower: SegmentSeries,
    upper: SegmentSeries,
    previous_segment_bits: u32,
    segment_index: usize,
}

/// Prefix blocks of `[lower, upper]`, for single-valued bounds of one shape
/// with `lower <= upper`.
pub(crate) fn prefix_blocks_between(lower: &SegmentSeries, upper: &SegmentSeries) -> Vec<SegmentSeries> {
    debug_assert!(lower.has_same_shape(upper));
    let segment_count = lower.division_count();
    let bps = lower.bits_per_segment();
    let bit_count = lower.bit_count();

    let mut blocks = Vec::new();
    let mut stack: Vec<PrefixFrame> = Vec::new();
    let mut lower = lower.clone();
    let mut upper = upper.clone();
    let mut previous_segment_bits = 0u32;
    let mut segment_index = 0usize;

    loop {
        let mut differing = 0u32;
        while segment_index < segment_count {
            differing = lower.segment(segment_index).lower() ^ upper.segment(segment_index).lower();
            if differing != 0 {
                break;
            }
            previous_segment_bits += bps;
            segment_index += 1;
        }

        let mut emitted = true;
        if differing == 0 {
            blocks.push(lower.widen_to_prefix(bit_count));
        } else if differing == 1 && segment_index + 1 == segment_count {
            blocks.push(lower.widen_to_prefix(bit_count - 1));
        } else {
            let differing_bit_prefix_len =
                previous_segment_bits + (differing.leading_zeros() - (32 - bps));
            if lower.includes_zero_host_len(differing_bit_prefix_len)
                && upper.includes_max_host_len(differing_bit_prefix_len)
            {
                blocks.push(lower.widen_to_prefix(differing_bit_prefix_len));
            } else {
                let lower_top = upper.lower_with_zero_host(differing_bit_prefix_len + 1);
                let upper_bottom = lower_top.predecessor();
                if differing == 1 {
                    previous_segment_bits += bps;
                    segment_index += 1;
                }
                stack.push(PrefixFrame {
                    lower: lower_top,
                    upper,
                    previous_segment_bits,
                    segment_index,
                });
                upper = upper_bottom;
                emitted = false;
            }
        }

        if emitted {
            match stack.pop() {
                Some(frame) => {
                    lower = frame.lower;
                    upper = frame.upper;
                    previous_segment_bits = frame.previous_segment_bits;
                    segment_index = frame.segment_index;
                }
                None => break,
            }
        }
    }
    blocks
}

enum SequentialFrame {
    Block(SegmentSeries),
    Range {
        lower: SegmentSeries,
        upper: SegmentSeries,
        segment_index: usize,
    },
}

/// Sequential blocks of `[lower, upper]`, for single-valued bounds of one
/// shape with `lower <= upper`.
pub(crate) fn sequential_blocks_between(
    lower: &SegmentSeries,
    upper: &SegmentSeries,
) -> Vec<SegmentSeries> {
    debug_assert!(lower.has_same_shape(upper));
    let segment_count = lower.division_count();
    let bps = lower.bits_per_segment();

    let mut blocks = Vec::new();
    let mut stack: Vec<SequentialFrame> = Vec::new();
    let mut lower = lower.without_prefix_len();
    let mut upper = upper.without_prefix_len();
    let mut segment_index = 0usize;

    'ranges: loop {
        let (current, lower_value, upper_value) = loop {
            let current = segment_index;
            let lower_value = lower.segment(current).lower();
            let upper_value = upper.segment(current).lower();
            segment_index += 1;
            if lower_value != upper_value || segment_index >= segment_count {
                break (current, lower_value, upper_value);
            }
        };
        let bits = segment_index as u32 * bps;

        let mut emitted = true;
        if lower_value == upper_value {
            blocks.push(lower.clone());
        } else {
            let lower_is_zero = lower.includes_zero_host_len(bits);
            let upper_is_max = upper.includes_max_host_len(bits);
            match (lower_is_zero, upper_is_max) {
                (true, true) => {
                    blocks.push(lower.block_at(current, lower_value, upper_value));
                }
                (true, false) => {
                    let top = upper.lower_with_zero_host(bits);
                    blocks.push(lower.block_at(current, lower_value, upper_value - 1));
                    lower = top;
                    emitted = false;
                }
                (false, true) => {
                    stack.push(SequentialFrame::Block(upper.block_at(
                        current,
                        lower_value + 1,
                        upper_value,
                    )));
                    upper = lower.lower_with_max_host(bits);
                    emitted = false;
                }
                (false, false) => {
                    stack.push(SequentialFrame::Range {
                        lower: upper.lower_with_zero_host(bits),
                        upper: upper.clone(),
                        segment_index: current,
                    });
                    if upper_value - lower_value > 1 {
                        stack.push(SequentialFrame::Block(lower.block_at(
                            current,
                            lower_value + 1,
                            upper_value - 1,
                        )));
                    }
                    upper = lower.lower_with_max_host(bits);
                    emitted = false;
                }
            }
        }

        if !emitted {
            segment_index = current;
            continue;
        }
        loop {
            match stack.pop() {
                Some(SequentialFrame::Block(b)) => blocks.push(b),
                Some(SequentialFrame::Range {
                    lower: next_lower,
                    upper: next_upper,
                    segment_index: next_index,
                }) => {
                    lower = next_lower;
                    upper = next_upper;
                    segment_index = next_index;
                    continue 'ranges;
                }
                None => break 'ranges,
            }
        }
    }
    blocks
}
