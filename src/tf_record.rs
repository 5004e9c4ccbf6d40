use std::io::{self, Read, Write};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::masked_crc::MaskedCrc;

/// A TFRecord with a payload and its checksum.
///
/// On disk, a record is a little-endian `u64` payload length, the masked CRC of those 8 length
/// bytes, the payload itself, and the masked CRC of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TfRecord {
    pub data: Vec<u8>,
    pub data_crc: MaskedCrc,
}

const LENGTH_SIZE: usize = 8;

impl TfRecord {
    /// Creates a record with the given payload, computing its checksum.
    pub fn from_data(data: Vec<u8>) -> Self {
        let data_crc = MaskedCrc::compute(&data);
        TfRecord { data, data_crc }
    }

    /// Writes the framed record to the given writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut length_buf = [0u8; LENGTH_SIZE];
        LittleEndian::write_u64(&mut length_buf, self.data.len() as u64);
        writer.write_all(&length_buf)?;
        writer.write_u32::<LittleEndian>(MaskedCrc::compute(&length_buf).0)?;
        writer.write_all(&self.data)?;
        writer.write_u32::<LittleEndian>(self.data_crc.0)?;
        Ok(())
    }

    /// Reads one framed record, verifying both checksums.
    ///
    /// Returns `Ok(None)` if the reader is at EOF before the first byte of a record. A record cut
    /// short anywhere else is an `UnexpectedEof` error, and a checksum mismatch is `InvalidData`.
    pub fn read<R: Read>(reader: &mut R) -> io::Result<Option<TfRecord>> {
        let mut length_buf = [0u8; LENGTH_SIZE];
        let mut filled = 0;
        while filled < LENGTH_SIZE {
            match reader.read(&mut length_buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        let length_crc = MaskedCrc(reader.read_u32::<LittleEndian>()?);
        let expected = MaskedCrc::compute(&length_buf);
        if length_crc != expected {
            return Err(checksum_error("length", length_crc, expected));
        }

        let length = LittleEndian::read_u64(&length_buf);
        let mut data = vec![0u8; length as usize];
        reader.read_exact(&mut data)?;

        let data_crc = MaskedCrc(reader.read_u32::<LittleEndian>()?);
        let expected = MaskedCrc::compute(&data);
        if data_crc != expected {
            return Err(checksum_error("data", data_crc, expected));
        }
        Ok(Some(TfRecord { data, data_crc }))
    }
}

fn checksum_error(what: &str, got: MaskedCrc, expected: MaskedCrc) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{} checksum mismatch: got {:?}, expected {:?}", what, got, expected),
    )
}
