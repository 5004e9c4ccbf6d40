use std::fmt::{self, Debug};

/// A CRC-32C (Castagnoli) checksum after a masking permutation, as used by TFRecord framing.
///
/// Checksums of data that itself contains embedded checksums are not robust, so TFRecords store
/// a rotated and offset variant of the raw CRC.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct MaskedCrc(pub u32);

const CRC_MASK_DELTA: u32 = 0xa282ead8;

impl MaskedCrc {
    /// Computes the masked CRC-32C of the given bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        Self::mask(crc::crc32::checksum_castagnoli(bytes))
    }

    fn mask(crc: u32) -> Self {
        MaskedCrc(((crc >> 15) | (crc << 17)).wrapping_add(CRC_MASK_DELTA))
    }
}

impl Debug for MaskedCrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaskedCrc({:#010x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(crc::crc32::checksum_castagnoli(b"123456789"), 0xe3069283);
        // length header of a 24-byte record
        assert_eq!(MaskedCrc::compute(&0x18u64.to_le_bytes()), MaskedCrc(0x224b7fa3));
        assert_eq!(MaskedCrc::compute(b""), MaskedCrc(0xa282ead8));
    }

    #[test]
    fn test_debug() {
        let crc = MaskedCrc(0x1234abcd);
        assert_eq!(format!("{:?}", crc), "MaskedCrc(0x1234abcd)");
    }
}
