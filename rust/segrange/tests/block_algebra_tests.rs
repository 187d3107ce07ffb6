use std::net::{Ipv4Addr, Ipv6Addr};

use segrange::{
    AddressComparator, AddressKind, Segment, SegmentSeries, SequentialRange, merge_prefix_blocks,
    merge_sequential_blocks, split_into_prefix_blocks, split_into_sequential_blocks,
};
use segrange_bits::mask_range;

fn byte(value: u32) -> SegmentSeries {
    SegmentSeries::from_values(AddressKind::Generic, 8, [value]).unwrap()
}

fn byte_range(lower: u32, upper: u32) -> SegmentSeries {
    SegmentSeries::from_ranges(AddressKind::Generic, 8, [(lower, upper)]).unwrap()
}

#[test]
fn test_split_into_two_blocks() {
    let blocks = split_into_prefix_blocks(&byte(1), &byte(3)).unwrap();
    assert_eq!(
        blocks,
        vec![
            byte(1).with_prefix_len(8).unwrap(),
            byte_range(2, 3).with_prefix_len(7).unwrap(),
        ]
    );
}

#[test]
fn test_split_full_segment() {
    let blocks = split_into_prefix_blocks(&byte(0), &byte(255)).unwrap();
    assert_eq!(blocks, vec![byte_range(0, 255).with_prefix_len(0).unwrap()]);
}

#[test]
fn test_merge_halves() {
    let halves = [
        byte_range(0, 127).with_prefix_len(1).unwrap(),
        byte_range(128, 255).with_prefix_len(1).unwrap(),
    ];
    let merged = merge_prefix_blocks(&halves).unwrap();
    assert_eq!(merged, vec![byte_range(0, 255).with_prefix_len(0).unwrap()]);
}

#[test]
fn test_mask_keeps_range_sequential() {
    let masker = mask_range(4u32, 7, 0b1111_1100, 0xff);
    assert!(masker.is_sequential());
    assert_eq!(masker.masked_lower(4, 0b1111_1100), 4);
    assert_eq!(masker.masked_upper(7, 0b1111_1100), 4);

    let segment = Segment::new(AddressKind::Generic, 8, 4, 7).unwrap();
    let masked = segment.mask(0b1111_1100).unwrap();
    assert_eq!((masked.lower(), masked.upper()), (4, 4));
}

#[test]
fn test_mask_breaks_range() {
    let masker = mask_range(2u32, 5, 0b1111_1110, 0xff);
    assert!(!masker.is_sequential());
    assert_eq!(masker.masked_lower(2, 0b1111_1110), 2);
    assert_eq!(masker.masked_upper(5, 0b1111_1110), 4);

    let segment = Segment::new(AddressKind::Generic, 8, 2, 5).unwrap();
    assert_eq!(segment.mask(0b1111_1110), None);
}

#[test]
fn test_sequential_split_two_segments() {
    let lower = SegmentSeries::from_values(AddressKind::Generic, 8, [1, 254]).unwrap();
    let upper = SegmentSeries::from_values(AddressKind::Generic, 8, [2, 1]).unwrap();
    let blocks = split_into_sequential_blocks(&lower, &upper).unwrap();
    assert_eq!(
        blocks,
        vec![
            SegmentSeries::from_ranges(AddressKind::Generic, 8, [(1, 1), (254, 255)]).unwrap(),
            SegmentSeries::from_ranges(AddressKind::Generic, 8, [(2, 2), (0, 1)]).unwrap(),
        ]
    );
}

#[test]
fn test_ipv4_cidr_workflow() {
    // the /24 blocks of 10.0.0.0/21, listed backwards
    let pieces: Vec<SegmentSeries> = (0u8..8)
        .rev()
        .map(|c| {
            SegmentSeries::from(Ipv4Addr::new(10, 0, c, 0))
                .to_prefix_block_len(24)
                .unwrap()
        })
        .collect();
    let merged = merge_prefix_blocks(&pieces).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].prefix_len(), Some(21));
    assert_eq!(
        merged[0].lower().without_prefix_len(),
        Ipv4Addr::new(10, 0, 0, 0).into()
    );

    let range = SequentialRange::new(
        &Ipv4Addr::new(10, 0, 0, 0).into(),
        &Ipv4Addr::new(10, 0, 7, 255).into(),
    )
    .unwrap();
    assert_eq!(range.span_with_prefix_blocks(), merged);
    assert_eq!(merge_sequential_blocks(&pieces).unwrap().len(), 1);
}

#[test]
fn test_sort_and_dedupe_ipv6() {
    let base = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0);
    let mut blocks = vec![
        SegmentSeries::from(base).to_prefix_block_len(48).unwrap(),
        SegmentSeries::from(base).to_prefix_block_len(32).unwrap(),
        SegmentSeries::from(Ipv6Addr::LOCALHOST),
        SegmentSeries::from(base).to_prefix_block_len(64).unwrap(),
    ];
    blocks.sort_by(|a, b| AddressComparator::REVERSE_LOW_VALUE.compare_series(a, b));
    let prefixes: Vec<_> = blocks.iter().map(SegmentSeries::prefix_len).collect();
    assert_eq!(prefixes, vec![None, Some(32), Some(48), Some(64)]);

    let merged = merge_prefix_blocks(&blocks).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[1].prefix_len(), Some(32));
}
