use segrange_common::{Result, verify_arg};

/// Family a segment or segment series belongs to.
///
/// The standard families fix the segment width and bound the segment count;
/// `Ip` and `Generic` accept any width from 1 to 32 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Ipv4,
    Ipv6,
    Mac,
    /// An IP section whose version is not pinned down.
    Ip,
    Generic,
}

impl AddressKind {
    /// Segment width fixed by the family, if any.
    pub const fn bits_per_segment(self) -> Option<u32> {
        match self {
            AddressKind::Ipv4 | AddressKind::Mac => Some(8),
            AddressKind::Ipv6 => Some(16),
            AddressKind::Ip | AddressKind::Generic => None,
        }
    }

    /// Segment count of a complete address of this family, if any.
    ///
    /// MAC addresses come in 6 and 8 segment forms; the larger is returned.
    pub const fn max_segment_count(self) -> Option<usize> {
        match self {
            AddressKind::Ipv4 => Some(4),
            AddressKind::Ipv6 | AddressKind::Mac => Some(8),
            AddressKind::Ip | AddressKind::Generic => None,
        }
    }

    pub const fn is_ip(self) -> bool {
        matches!(self, AddressKind::Ipv4 | AddressKind::Ipv6 | AddressKind::Ip)
    }

    pub(crate) fn verify_segment_bits(self, bit_count: u32) -> Result<()> {
        verify_arg!(bit_count, (1..=32).contains(&bit_count));
        if let Some(expected) = self.bits_per_segment() {
            verify_arg!(bit_count, bit_count == expected);
        }
        Ok(())
    }

    pub(crate) fn verify_shape(self, bits_per_segment: u32, segment_count: usize) -> Result<()> {
        self.verify_segment_bits(bits_per_segment)?;
        verify_arg!(segment_count, segment_count > 0);
        if let Some(max) = self.max_segment_count() {
            verify_arg!(segment_count, segment_count <= max);
        }
        Ok(())
    }
}
