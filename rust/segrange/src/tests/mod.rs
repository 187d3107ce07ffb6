mod division_tests;
mod split_tests;

use crate::{AddressKind, SegmentSeries};

/// Single-valued generic series of `count` segments of `bits` bits.
pub(crate) fn value_series(bits: u32, count: usize, value: u32) -> SegmentSeries {
    SegmentSeries::from_u128(AddressKind::Generic, bits, count, value as u128).unwrap()
}

pub(crate) fn lower_value(series: &SegmentSeries) -> u32 {
    series.lower_u128().unwrap() as u32
}

pub(crate) fn upper_value(series: &SegmentSeries) -> u32 {
    series.upper_u128().unwrap() as u32
}

/// Every member of a small series as an integer, ascending.
pub(crate) fn members(series: &SegmentSeries) -> Vec<u32> {
    let bits = series.bits_per_segment();
    series.segments().iter().fold(vec![0u32], |acc, s| {
        acc.iter()
            .flat_map(|&prefix| (s.lower()..=s.upper()).map(move |v| (prefix << bits) | v))
            .collect()
    })
}

/// Maximal runs of consecutive values in a sorted, deduplicated list.
pub(crate) fn runs(values: &[u32]) -> Vec<(u32, u32)> {
    let mut out: Vec<(u32, u32)> = Vec::new();
    for &v in values {
        match out.last_mut() {
            Some((_, hi)) if *hi + 1 == v => *hi = v,
            _ => out.push((v, v)),
        }
    }
    out
}

/// A random series of the given shape: a prefix block, a piece of a
/// sequential split, or an arbitrary product of segment ranges.
pub(crate) fn random_series(bits: u32, count: usize) -> SegmentSeries {
    let total = bits * count as u32;
    let max = (1u32 << total) - 1;
    let lower = fastrand::u32(0..=max);
    match fastrand::u32(0..10) {
        0..=3 => value_series(bits, count, lower)
            .to_prefix_block_len(fastrand::u32(0..=total))
            .unwrap(),
        4..=6 => {
            let upper = fastrand::u32(lower..=max);
            let blocks = crate::split_into_sequential_blocks(
                &value_series(bits, count, lower),
                &value_series(bits, count, upper),
            )
            .unwrap();
            blocks[fastrand::usize(0..blocks.len())].clone()
        }
        _ => {
            let seg_max = (1u32 << bits) - 1;
            SegmentSeries::from_ranges(
                AddressKind::Generic,
                bits,
                (0..count).map(|_| (fastrand::u32(0..=seg_max), fastrand::u32(0..=seg_max))),
            )
            .unwrap()
        }
    }
}
