use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::image::Pixels;

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Encodes 8-bit RGB or RGBA pixels as a PNG file.
pub fn encode(pixels: &Pixels) -> io::Result<Vec<u8>> {
    let color_type = match pixels.channels {
        3 => 2u8,
        4 => 6u8,
        c => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot encode {}-channel image as PNG", c),
            ))
        }
    };
    let width = u32::try_from(pixels.width).map_err(io::Error::other)?;
    let height = u32::try_from(pixels.height).map_err(io::Error::other)?;

    let mut out = Vec::new();
    out.extend_from_slice(&SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.write_u32::<BigEndian>(width)?;
    ihdr.write_u32::<BigEndian>(height)?;
    // bit depth, color type, compression, filter, interlace
    ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);
    write_chunk(&mut out, b"IHDR", &ihdr)?;
    write_chunk(&mut out, b"IDAT", &compress_scanlines(pixels)?)?;
    write_chunk(&mut out, b"IEND", &[])?;
    Ok(out)
}

/// Zlib-compresses the image rows, each prefixed with filter type 0 (none).
fn compress_scanlines(pixels: &Pixels) -> io::Result<Vec<u8>> {
    let stride = pixels.width * pixels.channels;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for row in pixels.data.chunks(stride.max(1)).take(pixels.height) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    encoder.finish()
}

fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> io::Result<()> {
    let length = u32::try_from(data.len()).map_err(io::Error::other)?;
    out.write_u32::<BigEndian>(length)?;
    let start = out.len();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let crc = crc::crc32::checksum_ieee(&out[start..]);
    out.write_u32::<BigEndian>(crc)?;
    Ok(())
}
