//! Variable-width divisions and groupings of them.
//!
//! Segments all share one width; divisions do not. A [`DivisionGrouping`]
//! strings together divisions of any width, which is how an IPv6 address with
//! an embedded IPv4 tail is laid out. Divisions wider than 64 bits are carried
//! as [`LargeDivision`] with arbitrary-precision bounds.

use num_bigint::BigUint;
use segrange_common::{Error, Result, verify_arg};

use crate::{kind::AddressKind, series::SegmentSeries};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Division {
    bit_count: u8,
    lower: u64,
    upper: u64,
}

impl Division {
    /// Creates a division of 1 to 64 bits; the bounds may be given in either
    /// order.
    pub fn new(bit_count: u32, lower: u64, upper: u64) -> Result<Division> {
        verify_arg!(bit_count, (1..=64).contains(&bit_count));
        let max = u64::MAX >> (64 - bit_count);
        verify_arg!(lower, lower <= max);
        verify_arg!(upper, upper <= max);
        Ok(Division {
            bit_count: bit_count as u8,
            lower: lower.min(upper),
            upper: lower.max(upper),
        })
    }

    #[inline]
    pub fn bit_count(&self) -> u32 {
        self.bit_count as u32
    }

    #[inline]
    pub fn lower(&self) -> u64 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> u64 {
        self.upper
    }

    #[inline]
    pub fn is_multiple(&self) -> bool {
        self.lower != self.upper
    }

    #[inline]
    pub fn count(&self) -> u128 {
        (self.upper - self.lower) as u128 + 1
    }
}

/// A division wider than 64 bits, or any division held as big integers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LargeDivision {
    bit_count: u32,
    lower: BigUint,
    upper: BigUint,
}

impl LargeDivision {
    pub fn new(bit_count: u32, lower: BigUint, upper: BigUint) -> Result<LargeDivision> {
        verify_arg!(bit_count, bit_count > 0);
        verify_arg!(lower, lower.bits() <= bit_count as u64);
        verify_arg!(upper, upper.bits() <= bit_count as u64);
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        Ok(LargeDivision {
            bit_count,
            lower,
            upper,
        })
    }

    /// Collapses a sequential series into one division spanning all its bits.
    pub fn from_series(series: &SegmentSeries) -> Result<LargeDivision> {
        if !series.is_sequential() {
            return Err(Error::invalid_arg(
                "series",
                "only a sequential series forms a single division",
            ));
        }
        LargeDivision::new(
            series.bit_count(),
            series.lower_biguint(),
            series.upper_biguint(),
        )
    }

    #[inline]
    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    #[inline]
    pub fn lower(&self) -> &BigUint {
        &self.lower
    }

    #[inline]
    pub fn upper(&self) -> &BigUint {
        &self.upper
    }

    pub fn is_multiple(&self) -> bool {
        self.lower != self.upper
    }

    pub fn count(&self) -> BigUint {
        &self.upper - &self.lower + 1u32
    }
}

/// Ordered divisions of possibly different widths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DivisionGrouping {
    divisions: Vec<Division>,
    mixed: bool,
}

impl DivisionGrouping {
    pub fn new(divisions: Vec<Division>) -> DivisionGrouping {
        DivisionGrouping {
            divisions,
            mixed: false,
        }
    }

    /// One division per segment of `series`.
    pub fn from_series(series: &SegmentSeries) -> DivisionGrouping {
        let divisions = series
            .segments()
            .iter()
            .map(|s| Division {
                bit_count: s.bit_count() as u8,
                lower: s.lower() as u64,
                upper: s.upper() as u64,
            })
            .collect();
        DivisionGrouping::new(divisions)
    }

    /// Regroups an IPv6 series as six 16-bit divisions followed by four
    /// 8-bit divisions holding the embedded IPv4 part.
    ///
    /// Each of the last two segments must split into a byte pair that still
    /// covers the same values: either its high byte is a single value or its
    /// low byte spans every value.
    pub fn ipv6_mixed(series: &SegmentSeries) -> Result<DivisionGrouping> {
        verify_arg!(
            series,
            series.kind() == AddressKind::Ipv6 && series.division_count() == 8
        );
        let mut divisions = Vec::with_capacity(10);
        for s in &series.segments()[..6] {
            divisions.push(Division {
                bit_count: 16,
                lower: s.lower() as u64,
                upper: s.upper() as u64,
            });
        }
        for (index, s) in series.segments().iter().enumerate().skip(6) {
            let (high_lower, high_upper) = (s.lower() >> 8, s.upper() >> 8);
            let (low_lower, low_upper) = (s.lower() & 0xff, s.upper() & 0xff);
            let splits = high_lower == high_upper || (low_lower == 0 && low_upper == 0xff);
            if !splits {
                return Err(Error::invalid_arg(
                    "series",
                    format!("segment {index} does not split into a byte pair"),
                ));
            }
            divisions.push(Division {
                bit_count: 8,
                lower: high_lower as u64,
                upper: high_upper as u64,
            });
            divisions.push(Division {
                bit_count: 8,
                lower: low_lower as u64,
                upper: low_upper as u64,
            });
        }
        Ok(DivisionGrouping {
            divisions,
            mixed: true,
        })
    }

    #[inline]
    pub fn is_mixed(&self) -> bool {
        self.mixed
    }

    #[inline]
    pub fn division_count(&self) -> usize {
        self.divisions.len()
    }

    #[inline]
    pub fn division(&self, index: usize) -> &Division {
        &self.divisions[index]
    }

    #[inline]
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn bit_count(&self) -> u32 {
        self.divisions.iter().map(Division::bit_count).sum()
    }

    pub fn is_multiple(&self) -> bool {
        self.divisions.iter().any(Division::is_multiple)
    }

    pub fn count(&self) -> BigUint {
        match self.count_u128() {
            Some(count) => BigUint::from(count),
            None => self
                .divisions
                .iter()
                .fold(BigUint::from(1u32), |acc, d| acc * d.count()),
        }
    }

    pub fn count_u128(&self) -> Option<u128> {
        self.divisions
            .iter()
            .try_fold(1u128, |acc, d| acc.checked_mul(d.count()))
    }
}
