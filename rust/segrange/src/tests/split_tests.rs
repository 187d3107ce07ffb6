use std::net::{Ipv4Addr, Ipv6Addr};

use segrange_common::ErrorKind;

use crate::{
    AddressKind, SegmentSeries, split_into_prefix_blocks, split_into_sequential_blocks,
    tests::{lower_value, members, upper_value, value_series},
};

/// Greedy count of the largest aligned blocks covering `[lo, hi]`.
fn minimal_prefix_block_count(mut lo: u32, hi: u32) -> usize {
    let mut count = 0;
    while lo <= hi {
        let mut size = 1u32;
        while lo % (size * 2) == 0 && lo + (size * 2 - 1) <= hi {
            size *= 2;
        }
        count += 1;
        match lo.checked_add(size) {
            Some(next) => lo = next,
            None => break,
        }
    }
    count
}

#[test]
fn test_split_small_range() {
    let blocks = split_into_prefix_blocks(&value_series(8, 1, 1), &value_series(8, 1, 3)).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(members(&blocks[0]), vec![1]);
    assert_eq!(blocks[0].prefix_len(), Some(8));
    assert_eq!(members(&blocks[1]), vec![2, 3]);
    assert_eq!(blocks[1].prefix_len(), Some(7));
}

#[test]
fn test_split_full_range() {
    let blocks =
        split_into_prefix_blocks(&value_series(8, 1, 0), &value_series(8, 1, 255)).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].prefix_len(), Some(0));
    assert!(blocks[0].segment(0).is_full_range());

    let blocks =
        split_into_prefix_blocks(&value_series(8, 1, 77), &value_series(8, 1, 77)).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].prefix_len(), Some(8));
}

#[test]
fn test_prefix_split_exhaustive() {
    for (bits, count) in [(8, 1), (3, 2), (2, 3), (4, 2)] {
        let max = (1u32 << (bits * count as u32)) - 1;
        for lo in 0..=max {
            for hi in lo..=max {
                let blocks = split_into_prefix_blocks(
                    &value_series(bits, count, lo),
                    &value_series(bits, count, hi),
                )
                .unwrap();
                let covered: Vec<u32> = blocks.iter().flat_map(members).collect();
                assert_eq!(covered, (lo..=hi).collect::<Vec<_>>(), "[{lo}, {hi}]");
                assert_eq!(blocks.len(), minimal_prefix_block_count(lo, hi));
                for block in &blocks {
                    assert!(block.is_single_prefix_block());
                    assert_eq!(block.prefix_len(), block.prefix_len_for_single_block());
                }
            }
        }
    }
}

#[test]
fn test_sequential_split_exhaustive() {
    for (bits, count) in [(8, 1), (3, 2), (2, 3), (4, 2)] {
        let max = (1u32 << (bits * count as u32)) - 1;
        for lo in 0..=max {
            for hi in lo..=max {
                let blocks = split_into_sequential_blocks(
                    &value_series(bits, count, lo),
                    &value_series(bits, count, hi),
                )
                .unwrap();
                let covered: Vec<u32> = blocks.iter().flat_map(members).collect();
                assert_eq!(covered, (lo..=hi).collect::<Vec<_>>(), "[{lo}, {hi}]");
                assert!(blocks.len() <= 2 * count - 1);
                for block in &blocks {
                    assert!(block.is_sequential());
                    assert_eq!(block.prefix_len(), None);
                }
            }
        }
    }
}

#[test]
fn test_sequential_split_across_segments() {
    let blocks = split_into_sequential_blocks(
        &SegmentSeries::from_values(AddressKind::Generic, 8, [1, 254]).unwrap(),
        &SegmentSeries::from_values(AddressKind::Generic, 8, [2, 1]).unwrap(),
    )
    .unwrap();
    let expected = vec![
        SegmentSeries::from_ranges(AddressKind::Generic, 8, [(1, 1), (254, 255)]).unwrap(),
        SegmentSeries::from_ranges(AddressKind::Generic, 8, [(2, 2), (0, 1)]).unwrap(),
    ];
    assert_eq!(blocks, expected);

    let blocks = split_into_sequential_blocks(
        &Ipv4Addr::new(1, 2, 3, 250).into(),
        &Ipv4Addr::new(1, 2, 5, 5).into(),
    )
    .unwrap();
    let expected = vec![
        SegmentSeries::from_ranges(AddressKind::Ipv4, 8, [(1, 1), (2, 2), (3, 3), (250, 255)])
            .unwrap(),
        SegmentSeries::from_ranges(AddressKind::Ipv4, 8, [(1, 1), (2, 2), (4, 4), (0, 255)])
            .unwrap(),
        SegmentSeries::from_ranges(AddressKind::Ipv4, 8, [(1, 1), (2, 2), (5, 5), (0, 5)])
            .unwrap(),
    ];
    assert_eq!(blocks, expected);
}

#[test]
fn test_split_ipv6() {
    let lower = SegmentSeries::from(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
    let upper = SegmentSeries::from(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0xff));
    let blocks = split_into_prefix_blocks(&lower, &upper).unwrap();
    let prefixes: Vec<_> = blocks.iter().map(|b| b.prefix_len().unwrap()).collect();
    assert_eq!(prefixes, vec![128, 127, 126, 125, 124, 123, 122, 121]);
    assert_eq!(blocks[7].segment(7).lower(), 0x80);
    assert_eq!(blocks[7].segment(7).upper(), 0xff);

    let lower = SegmentSeries::from(Ipv6Addr::UNSPECIFIED);
    let upper = SegmentSeries::from(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0xffff, 0xffff));
    let blocks = split_into_prefix_blocks(&lower, &upper).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].prefix_len(), Some(96));
}

#[test]
fn test_split_argument_handling() {
    // reversed bounds
    let forward =
        split_into_prefix_blocks(&value_series(8, 2, 300), &value_series(8, 2, 1000)).unwrap();
    let reversed =
        split_into_prefix_blocks(&value_series(8, 2, 1000), &value_series(8, 2, 300)).unwrap();
    assert_eq!(forward, reversed);
    assert_eq!(lower_value(&forward[0]), 300);
    assert_eq!(upper_value(forward.last().unwrap()), 1000);

    // prefix lengths on the bounds are ignored
    let annotated = split_into_prefix_blocks(
        &value_series(8, 2, 300).with_prefix_len(4).unwrap(),
        &value_series(8, 2, 1000).with_prefix_len(16).unwrap(),
    )
    .unwrap();
    assert_eq!(forward, annotated);

    // multi-valued bounds contribute their extremes
    let wide = SegmentSeries::from_ranges(AddressKind::Generic, 8, [(1, 3), (7, 9)]).unwrap();
    let blocks = split_into_sequential_blocks(&wide, &wide).unwrap();
    assert_eq!(lower_value(&blocks[0]), 0x107);
    assert_eq!(upper_value(blocks.last().unwrap()), 0x309);

    let err = split_into_prefix_blocks(&value_series(8, 2, 1), &value_series(8, 1, 1)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    let err = split_into_sequential_blocks(
        &Ipv4Addr::new(1, 2, 3, 4).into(),
        &SegmentSeries::from_values(AddressKind::Generic, 8, [1, 2, 3, 4]).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
}

#[test]
fn test_split_wide_segments() {
    let lower = SegmentSeries::from_values(AddressKind::Generic, 32, [7, 0xffff_fff0]).unwrap();
    let upper = SegmentSeries::from_values(AddressKind::Generic, 32, [8, 0x0000_000f]).unwrap();
    let blocks = split_into_prefix_blocks(&lower, &upper).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].prefix_len(), Some(60));
    assert_eq!(blocks[1].prefix_len(), Some(60));
    assert_eq!(blocks[1].segment(0).lower(), 8);

    let blocks = split_into_sequential_blocks(&lower, &upper).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].segment(1).upper(), u32::MAX);
    assert_eq!(blocks[1].segment(1).lower(), 0);
}
