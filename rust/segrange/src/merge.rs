//! Merging collections of blocks into a minimal covering list.
//!
//! Inputs are first expanded into canonical blocks, sorted by ascending lower
//! value with larger blocks first on ties, and folded in a single pass into a
//! fresh result: a block inside the last kept block is dropped, otherwise it
//! is kept and joined with its predecessor for as long as the two newest kept
//! blocks can be combined into one.

use std::cmp::Ordering;

use segrange_common::Result;

use crate::{
    compare::AddressComparator,
    series::SegmentSeries,
    split::{prefix_blocks_between, sequential_blocks_between},
};

/// Merges `blocks` into the minimal ascending list of prefix blocks covering
/// exactly their union.
///
/// Any series is accepted; non-sequential inputs are decomposed through their
/// sequential blocks first. Fails with `InvalidArgument` when the inputs
/// differ in shape.
pub fn merge_prefix_blocks(blocks: &[SegmentSeries]) -> Result<Vec<SegmentSeries>> {
    verify_same_shapes(blocks)?;
    Ok(prefix_merge(blocks))
}

/// Merges `blocks` into the minimal ascending list of sequential blocks
/// covering exactly their union. The results carry no prefix length.
///
/// Fails with `InvalidArgument` when the inputs differ in shape.
pub fn merge_sequential_blocks(blocks: &[SegmentSeries]) -> Result<Vec<SegmentSeries>> {
    verify_same_shapes(blocks)?;
    Ok(sequential_merge(blocks))
}

fn verify_same_shapes(blocks: &[SegmentSeries]) -> Result<()> {
    if let Some((first, rest)) = blocks.split_first() {
        for block in rest {
            first.verify_same_shape(block)?;
        }
    }
    Ok(())
}

pub(crate) fn prefix_merge(blocks: &[SegmentSeries]) -> Vec<SegmentSeries> {
    let mut expanded = Vec::new();
    for block in blocks {
        if block.is_sequential() {
            expanded.extend(prefix_blocks_between(&block.lower(), &block.upper()));
        } else {
            for piece in block.sequential_block_iter() {
                expanded.extend(prefix_blocks_between(&piece.lower(), &piece.upper()));
            }
        }
    }
    let merged = fold_sorted(expanded, prefix_parent);
    log::trace!(
        "merged {} series into {} prefix blocks",
        blocks.len(),
        merged.len()
    );
    merged
}

pub(crate) fn sequential_merge(blocks: &[SegmentSeries]) -> Vec<SegmentSeries> {
    let mut expanded = Vec::new();
    for block in blocks {
        if block.is_sequential() {
            expanded.push(block.without_prefix_len());
        } else {
            expanded.extend(block.sequential_block_iter());
        }
    }
    let merged = fold_sorted(expanded, sequential_join);
    log::trace!(
        "merged {} series into {} sequential blocks",
        blocks.len(),
        merged.len()
    );
    merged
}

/// Sorts the expanded blocks and folds them into the result, using `join` to
/// combine the two newest kept blocks.
fn fold_sorted(
    mut expanded: Vec<SegmentSeries>,
    join: impl Fn(&SegmentSeries, &SegmentSeries) -> Option<SegmentSeries>,
) -> Vec<SegmentSeries> {
    if expanded.len() <= 1 {
        return expanded;
    }
    expanded.sort_by(|a, b| AddressComparator::REVERSE_LOW_VALUE.compare_series(a, b));

    let mut merged: Vec<SegmentSeries> = Vec::with_capacity(expanded.len());
    for block in expanded {
        if let Some(last) = merged.last() {
            // Lower values are ascending, so a last block ending at or after
            // this one covers it.
            if AddressComparator::REVERSE_HIGH_VALUE.compare_series(last, &block) != Ordering::Less {
                continue;
            }
        }
        merged.push(block);
        while let [.., a, b] = merged.as_slice() {
            let Some(joined) = join(a, b) else {
                break;
            };
            merged.truncate(merged.len() - 2);
            merged.push(joined);
        }
    }
    merged
}

/// The parent block of two sibling prefix blocks.
///
/// Siblings share a prefix length `P` and every bit before `P - 1`, and
/// differ in bit `P - 1`.
fn prefix_parent(a: &SegmentSeries, b: &SegmentSeries) -> Option<SegmentSeries> {
    let prefix_len = a.prefix_len()?;
    if b.prefix_len() != Some(prefix_len) || prefix_len == 0 {
        return None;
    }
    let bps = a.bits_per_segment();
    let bit = prefix_len - 1;
    let index = (bit / bps) as usize;
    if a.segments()[..index] != b.segments()[..index] {
        return None;
    }
    let shift = bps - 1 - bit % bps;
    let differs_in_last_bit =
        (a.segment(index).lower() >> shift) ^ (b.segment(index).lower() >> shift) == 1;
    differs_in_last_bit.then(|| a.widen_to_prefix(bit))
}

/// The block joining two sequential blocks whose boundary segment ranges
/// overlap or are adjacent.
fn sequential_join(a: &SegmentSeries, b: &SegmentSeries) -> Option<SegmentSeries> {
    let boundary = a.sequential_boundary();
    if b.sequential_boundary() != boundary || a.segments()[..boundary] != b.segments()[..boundary]
    {
        return None;
    }
    let a_segment = a.segment(boundary);
    let b_segment = b.segment(boundary);
    if b_segment.lower().saturating_sub(1) > a_segment.upper() {
        return None;
    }
    Some(a.block_at(
        boundary,
        a_segment.lower(),
        a_segment.upper().max(b_segment.upper()),
    ))
}
