//! Ordering of segments, divisions, series, groupings and ranges.
//!
//! Items are first ordered structurally and only then by their values:
//!
//! 1. class: divisions and segments, then ranges, then series and groupings;
//! 2. total bit count;
//! 3. a fixed kind rank, so an IPv4 series and a generic series of the same
//!    width never compare equal;
//! 4. the comparator's strategy, either by value or by member count.
//!
//! The value strategy compares one bound (the lowest or the highest member)
//! and breaks ties on the other, optionally in reverse. The count strategy
//! compares member counts and breaks ties by value.

use std::cmp::Ordering;

use num_bigint::BigUint;

use crate::{
    division::{Division, DivisionGrouping, LargeDivision},
    kind::AddressKind,
    range::SequentialRange,
    segment::Segment,
    series::SegmentSeries,
};

mod window;

use window::{Chunk, compare_chunks};

/// Anything the comparator can order.
#[derive(Clone, Copy, Debug)]
pub enum AddressItem<'a> {
    Series(&'a SegmentSeries),
    Grouping(&'a DivisionGrouping),
    Segment(&'a Segment),
    Division(&'a Division),
    LargeDivision(&'a LargeDivision),
    Range(&'a SequentialRange),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Lower,
    Upper,
}

impl Bound {
    #[inline]
    fn of(self, segment: &Segment) -> u32 {
        match self {
            Bound::Lower => segment.lower(),
            Bound::Upper => segment.upper(),
        }
    }

    #[inline]
    fn of_division(self, division: &Division) -> u64 {
        match self {
            Bound::Lower => division.lower(),
            Bound::Upper => division.upper(),
        }
    }
}

const MIXED_RANK: u8 = 6;

fn kind_rank(kind: AddressKind) -> u8 {
    match kind {
        AddressKind::Generic => 2,
        AddressKind::Mac => 3,
        AddressKind::Ip => 4,
        AddressKind::Ipv4 => 5,
        AddressKind::Ipv6 => 7,
    }
}

impl AddressItem<'_> {
    fn class(&self) -> u8 {
        match self {
            AddressItem::Segment(_) | AddressItem::Division(_) | AddressItem::LargeDivision(_) => 0,
            AddressItem::Range(_) => 1,
            AddressItem::Series(_) | AddressItem::Grouping(_) => 2,
        }
    }

    pub fn bit_count(&self) -> u32 {
        match self {
            AddressItem::Series(s) => s.bit_count(),
            AddressItem::Grouping(g) => g.bit_count(),
            AddressItem::Segment(s) => s.bit_count(),
            AddressItem::Division(d) => d.bit_count(),
            AddressItem::LargeDivision(d) => d.bit_count(),
            AddressItem::Range(r) => r.bit_count(),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            AddressItem::Series(s) => kind_rank(s.kind()),
            AddressItem::Range(r) => kind_rank(r.kind()),
            AddressItem::Segment(s) => kind_rank(s.kind()),
            AddressItem::Grouping(g) if g.is_mixed() => MIXED_RANK,
            AddressItem::LargeDivision(_) => 1,
            AddressItem::Grouping(_) | AddressItem::Division(_) => 0,
        }
    }

    pub fn count(&self) -> BigUint {
        match self {
            AddressItem::Series(s) => s.count(),
            AddressItem::Grouping(g) => g.count(),
            AddressItem::Segment(s) => BigUint::from(s.count()),
            AddressItem::Division(d) => BigUint::from(d.count()),
            AddressItem::LargeDivision(d) => d.count(),
            AddressItem::Range(r) => r.count(),
        }
    }

    fn count_u128(&self) -> Option<u128> {
        match self {
            AddressItem::Series(s) => s.count_u128(),
            AddressItem::Grouping(g) => g.count_u128(),
            AddressItem::Segment(s) => Some(s.count() as u128),
            AddressItem::Division(d) => Some(d.count()),
            AddressItem::LargeDivision(_) => None,
            AddressItem::Range(r) => r.count_u128(),
        }
    }

    /// Uniform-width segments holding the requested bound, if the item is
    /// made of them.
    fn segments(&self, bound: Bound) -> Option<&[Segment]> {
        match self {
            AddressItem::Series(s) => Some(s.segments()),
            AddressItem::Segment(s) => Some(std::slice::from_ref(*s)),
            AddressItem::Range(r) => Some(match bound {
                Bound::Lower => r.lower().segments(),
                Bound::Upper => r.upper().segments(),
            }),
            AddressItem::Grouping(_) | AddressItem::Division(_) | AddressItem::LargeDivision(_) => {
                None
            }
        }
    }

    /// The bound as one integer, when the item is at most 64 bits wide.
    fn value_u64(&self, bound: Bound) -> Option<u64> {
        if self.bit_count() > 64 {
            return None;
        }
        match self {
            AddressItem::Grouping(g) => Some(g.divisions().iter().fold(0, |acc, d| {
                shift_in(acc, bound.of_division(d), d.bit_count())
            })),
            AddressItem::Division(d) => Some(bound.of_division(d)),
            AddressItem::LargeDivision(d) => {
                let value = match bound {
                    Bound::Lower => d.lower(),
                    Bound::Upper => d.upper(),
                };
                Some(value.iter_u64_digits().next().unwrap_or(0))
            }
            _ => self.segments(bound).map(|segments| {
                segments
                    .iter()
                    .fold(0, |acc, s| shift_in(acc, bound.of(s) as u64, s.bit_count()))
            }),
        }
    }

    /// The bound as chunks of at most 64 bits, most significant first.
    fn chunks(&self, bound: Bound) -> Vec<Chunk> {
        match self {
            AddressItem::Grouping(g) => g
                .divisions()
                .iter()
                .map(|d| Chunk::new(bound.of_division(d), d.bit_count()))
                .collect(),
            AddressItem::Division(d) => vec![Chunk::new(bound.of_division(d), d.bit_count())],
            AddressItem::LargeDivision(d) => {
                let value = match bound {
                    Bound::Lower => d.lower(),
                    Bound::Upper => d.upper(),
                };
                large_chunks(value, d.bit_count())
            }
            _ => self
                .segments(bound)
                .unwrap_or_default()
                .iter()
                .map(|s| Chunk::new(bound.of(s) as u64, s.bit_count()))
                .collect(),
        }
    }
}

#[inline]
fn shift_in(acc: u64, value: u64, bits: u32) -> u64 {
    acc.checked_shl(bits).unwrap_or(0) | value
}

/// Splits a `bit_count`-wide big integer into 64-bit digits, most
/// significant first, with the top digit holding the remainder bits.
fn large_chunks(value: &BigUint, bit_count: u32) -> Vec<Chunk> {
    let digits = value.to_u64_digits();
    let count = bit_count.div_ceil(64) as usize;
    let top_bits = bit_count - 64 * (count as u32 - 1);
    (0..count)
        .rev()
        .map(|i| {
            let bits = if i == count - 1 { top_bits } else { 64 };
            Chunk::new(digits.get(i).copied().unwrap_or(0), bits)
        })
        .collect()
}

impl<'a> From<&'a SegmentSeries> for AddressItem<'a> {
    fn from(series: &'a SegmentSeries) -> Self {
        AddressItem::Series(series)
    }
}

impl<'a> From<&'a DivisionGrouping> for AddressItem<'a> {
    fn from(grouping: &'a DivisionGrouping) -> Self {
        AddressItem::Grouping(grouping)
    }
}

impl<'a> From<&'a Segment> for AddressItem<'a> {
    fn from(segment: &'a Segment) -> Self {
        AddressItem::Segment(segment)
    }
}

impl<'a> From<&'a Division> for AddressItem<'a> {
    fn from(division: &'a Division) -> Self {
        AddressItem::Division(division)
    }
}

impl<'a> From<&'a LargeDivision> for AddressItem<'a> {
    fn from(division: &'a LargeDivision) -> Self {
        AddressItem::LargeDivision(division)
    }
}

impl<'a> From<&'a SequentialRange> for AddressItem<'a> {
    fn from(range: &'a SequentialRange) -> Self {
        AddressItem::Range(range)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    Value { compare_high: bool, flip_second: bool },
    Count,
}

/// A total order over [`AddressItem`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressComparator {
    strategy: Strategy,
}

impl AddressComparator {
    /// Lowest member ascending, then highest member ascending.
    pub const LOW_VALUE: AddressComparator = AddressComparator::value(false, false);

    /// Highest member ascending, then lowest member ascending.
    pub const HIGH_VALUE: AddressComparator = AddressComparator::value(true, false);

    /// Lowest member ascending, then highest member descending, so that of
    /// two items starting together the larger comes first.
    pub const REVERSE_LOW_VALUE: AddressComparator = AddressComparator::value(false, true);

    /// Highest member ascending, then lowest member descending.
    pub const REVERSE_HIGH_VALUE: AddressComparator = AddressComparator::value(true, true);

    /// Member count ascending, then as [`AddressComparator::LOW_VALUE`].
    pub const COUNT: AddressComparator = AddressComparator {
        strategy: Strategy::Count,
    };

    const fn value(compare_high: bool, flip_second: bool) -> AddressComparator {
        AddressComparator {
            strategy: Strategy::Value {
                compare_high,
                flip_second,
            },
        }
    }

    pub fn compare<'a, 'b>(
        &self,
        a: impl Into<AddressItem<'a>>,
        b: impl Into<AddressItem<'b>>,
    ) -> Ordering {
        self.compare_items(&a.into(), &b.into())
    }

    pub fn compare_items(&self, a: &AddressItem, b: &AddressItem) -> Ordering {
        a.class()
            .cmp(&b.class())
            .then_with(|| a.bit_count().cmp(&b.bit_count()))
            .then_with(|| a.kind_rank().cmp(&b.kind_rank()))
            .then_with(|| self.compare_by_strategy(a, b))
    }

    pub fn compare_series(&self, a: &SegmentSeries, b: &SegmentSeries) -> Ordering {
        self.compare_items(&AddressItem::Series(a), &AddressItem::Series(b))
    }

    pub fn compare_ranges(&self, a: &SequentialRange, b: &SequentialRange) -> Ordering {
        self.compare_items(&AddressItem::Range(a), &AddressItem::Range(b))
    }

    pub fn compare_segments(&self, a: &Segment, b: &Segment) -> Ordering {
        self.compare_items(&AddressItem::Segment(a), &AddressItem::Segment(b))
    }

    fn compare_by_strategy(&self, a: &AddressItem, b: &AddressItem) -> Ordering {
        match self.strategy {
            Strategy::Value {
                compare_high,
                flip_second,
            } => compare_values(a, b, compare_high, flip_second),
            Strategy::Count => {
                compare_counts(a, b).then_with(|| compare_values(a, b, false, false))
            }
        }
    }
}

fn compare_counts(a: &AddressItem, b: &AddressItem) -> Ordering {
    match (a.count_u128(), b.count_u128()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.count().cmp(&b.count()),
    }
}

fn compare_values(
    a: &AddressItem,
    b: &AddressItem,
    compare_high: bool,
    flip_second: bool,
) -> Ordering {
    let (primary, secondary) = if compare_high {
        (Bound::Upper, Bound::Lower)
    } else {
        (Bound::Lower, Bound::Upper)
    };
    compare_bound(a, b, primary).then_with(|| {
        let ordering = compare_bound(a, b, secondary);
        if flip_second {
            ordering.reverse()
        } else {
            ordering
        }
    })
}

/// Compares one bound of two items of equal bit count.
fn compare_bound(a: &AddressItem, b: &AddressItem, bound: Bound) -> Ordering {
    if let (Some(x), Some(y)) = (a.segments(bound), b.segments(bound)) {
        let same_width = match (x.first(), y.first()) {
            (Some(s), Some(t)) => s.bit_count() == t.bit_count(),
            _ => x.len() == y.len(),
        };
        if same_width {
            return x
                .iter()
                .map(|s| bound.of(s))
                .cmp(y.iter().map(|s| bound.of(s)));
        }
    }
    if let (Some(x), Some(y)) = (a.value_u64(bound), b.value_u64(bound)) {
        return x.cmp(&y);
    }
    compare_chunks(&a.chunks(bound), &b.chunks(bound))
}
