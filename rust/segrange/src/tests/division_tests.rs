use std::net::Ipv6Addr;

use num_bigint::BigUint;

use crate::{AddressKind, Division, DivisionGrouping, LargeDivision, SegmentSeries};

#[test]
fn test_division_bounds() {
    let d = Division::new(12, 40, 7).unwrap();
    assert_eq!((d.lower(), d.upper()), (7, 40));
    assert_eq!(d.count(), 34);
    assert!(d.is_multiple());
    assert!(Division::new(0, 0, 0).is_err());
    assert!(Division::new(65, 0, 0).is_err());
    assert!(Division::new(4, 16, 0).is_err());
    assert_eq!(Division::new(64, 0, u64::MAX).unwrap().count(), 1 << 64);
}

#[test]
fn test_large_division() {
    let v6 = SegmentSeries::from(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0));
    let block = v6.to_prefix_block_len(32).unwrap();
    let large = LargeDivision::from_series(&block).unwrap();
    assert_eq!(large.bit_count(), 128);
    assert_eq!(large.count(), BigUint::from(1u32) << 96u32);
    assert_eq!(
        large.lower(),
        &BigUint::from(0x2001_0db8u128 << 96)
    );
    assert!(large.is_multiple());

    let grid = SegmentSeries::from_ranges(AddressKind::Ipv6, 16, [(1, 2), (3, 4)]).unwrap();
    assert!(LargeDivision::from_series(&grid).is_err());
    assert!(LargeDivision::new(8, BigUint::from(256u32), BigUint::from(0u32)).is_err());

    let reversed = LargeDivision::new(70, BigUint::from(9u32), BigUint::from(2u32)).unwrap();
    assert_eq!(reversed.lower(), &BigUint::from(2u32));
    assert_eq!(reversed.count(), BigUint::from(8u32));
}

#[test]
fn test_ipv6_mixed_grouping() {
    let v6 = SegmentSeries::from(Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0xc0a8, 0x0102));
    let mixed = DivisionGrouping::ipv6_mixed(&v6).unwrap();
    assert!(mixed.is_mixed());
    assert_eq!(mixed.division_count(), 10);
    assert_eq!(mixed.bit_count(), 128);
    let tail: Vec<_> = mixed.divisions()[6..].iter().map(Division::lower).collect();
    assert_eq!(tail, vec![192, 168, 1, 2]);
    assert_eq!(mixed.division(5).lower(), 0xffff);

    // a /104 block leaves whole bytes free in the tail
    let block = v6.to_prefix_block_len(104).unwrap();
    let mixed = DivisionGrouping::ipv6_mixed(&block).unwrap();
    assert_eq!(mixed.count_u128(), Some(1 << 24));
    assert_eq!(mixed.count(), block.count());

    // 0x0102..0x0201 does not split into a byte pair
    let ragged = SegmentSeries::from_ranges(
        AddressKind::Ipv6,
        16,
        [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0), (0, 0), (0, 0), (0x0102, 0x0201)],
    )
    .unwrap();
    assert!(DivisionGrouping::ipv6_mixed(&ragged).is_err());

    let v4 = SegmentSeries::from_values(AddressKind::Ipv4, 8, [1, 2, 3, 4]).unwrap();
    assert!(DivisionGrouping::ipv6_mixed(&v4).is_err());

    let plain = DivisionGrouping::from_series(&v4);
    assert!(!plain.is_mixed());
    assert_eq!(plain.bit_count(), 32);
    assert!(!plain.is_multiple());
}
