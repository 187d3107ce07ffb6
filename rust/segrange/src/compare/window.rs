//! Bit-window comparison of values split into variable-width chunks.
//!
//! Two values of equal total width may be cut into chunks at different
//! places, for example six 16-bit divisions and four 8-bit ones against eight
//! 16-bit segments. Both sides are consumed from the most significant end in
//! windows of at most 64 bits, each window as wide as the shorter of the two
//! current chunk remainders.

use std::cmp::Ordering;

/// The low `bits` bits of `value`, most significant chunk first in a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Chunk {
    value: u64,
    bits: u32,
}

impl Chunk {
    #[inline]
    pub(crate) fn new(value: u64, bits: u32) -> Chunk {
        debug_assert!((1..=64).contains(&bits));
        Chunk {
            value: value & low_mask(bits),
            bits,
        }
    }

    /// Removes and returns the top `count` remaining bits.
    #[inline]
    fn take_top(&mut self, count: u32) -> u64 {
        debug_assert!(count >= 1 && count <= self.bits);
        let rest = self.bits - count;
        let top = self.value >> rest;
        self.bits = rest;
        self.value &= low_mask(rest);
        top
    }
}

#[inline]
fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Compares two chunked values numerically.
///
/// A value with bits left over once the other is exhausted compares greater.
pub(crate) fn compare_chunks(a: &[Chunk], b: &[Chunk]) -> Ordering {
    let mut a_chunks = a.iter().copied();
    let mut b_chunks = b.iter().copied();
    let mut a_current = a_chunks.next();
    let mut b_current = b_chunks.next();
    loop {
        let (Some(x), Some(y)) = (a_current.as_mut(), b_current.as_mut()) else {
            return a_current.is_some().cmp(&b_current.is_some());
        };
        let width = x.bits.min(y.bits);
        let ordering = x.take_top(width).cmp(&y.take_top(width));
        if ordering != Ordering::Equal {
            return ordering;
        }
        let (x_done, y_done) = (x.bits == 0, y.bits == 0);
        if x_done {
            a_current = a_chunks.next();
        }
        if y_done {
            b_current = b_chunks.next();
        }
    }
}
