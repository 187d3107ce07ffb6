//! Range and block algebra for segmented addresses.
//!
//! Addresses such as IPv4 (4 x 8 bits), IPv6 (8 x 16 bits) and MAC (6 or
//! 8 x 8 bits) are modelled as series of fixed-width segments, where each
//! segment holds a contiguous range of values. On top of that model this
//! crate provides:
//!
//! - splitting an arbitrary contiguous range into the minimal list of prefix
//!   (CIDR) blocks, or into coarser sequential blocks;
//! - merging any collection of series into the minimal covering list of
//!   prefix or sequential blocks;
//! - a comparator framework that orders segments, divisions, series,
//!   groupings and ranges, used for sorting and containment checks.
//!
//! ```rust
//! use std::net::Ipv4Addr;
//!
//! use segrange::{SegmentSeries, split_into_prefix_blocks};
//!
//! let lower = SegmentSeries::from(Ipv4Addr::new(10, 0, 0, 1));
//! let upper = SegmentSeries::from(Ipv4Addr::new(10, 0, 0, 3));
//! let blocks = split_into_prefix_blocks(&lower, &upper).unwrap();
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0].prefix_len(), Some(32));
//! assert_eq!(blocks[1].prefix_len(), Some(31));
//! ```

pub mod compare;
pub mod division;
pub mod kind;
pub mod merge;
pub mod range;
pub mod segment;
pub mod series;
pub mod split;

#[cfg(test)]
mod tests;

pub use compare::{AddressComparator, AddressItem};
pub use division::{Division, DivisionGrouping, LargeDivision};
pub use kind::AddressKind;
pub use merge::{merge_prefix_blocks, merge_sequential_blocks};
pub use range::SequentialRange;
pub use segment::Segment;
pub use series::{SegmentSeries, SequentialBlockIter};
pub use split::{split_into_prefix_blocks, split_into_sequential_blocks};
