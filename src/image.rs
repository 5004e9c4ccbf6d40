use std::io;

use crate::error::{Error, Result};
use crate::tensor::DenseArray;

const VALID_CHANNELS: [usize; 3] = [1, 3, 4];

/// Grids of batched images are at most this many columns wide.
const MAX_GRID_COLUMNS: usize = 8;

/// Where the channel axis sits in an image tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageDataFormat {
    /// `[channels, height, width]`
    ChannelsFirst,
    /// `[height, width, channels]`
    #[default]
    ChannelsLast,
}

impl ImageDataFormat {
    /// The layout tag for a single image: `"CHW"` or `"HWC"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageDataFormat::ChannelsFirst => "CHW",
            ImageDataFormat::ChannelsLast => "HWC",
        }
    }

    /// The layout tag for a batch of images, with the sample axis first.
    pub fn batch_str(self) -> &'static str {
        match self {
            ImageDataFormat::ChannelsFirst => "NCHW",
            ImageDataFormat::ChannelsLast => "NHWC",
        }
    }

    /// Positions of the (channel, height, width) axes within a single image.
    fn axes(self) -> (usize, usize, usize) {
        match self {
            ImageDataFormat::ChannelsFirst => (0, 1, 2),
            ImageDataFormat::ChannelsLast => (2, 0, 1),
        }
    }
}

/// Checks that `shape` is a single image in the given layout.
pub fn validate_image(shape: &[usize], format: ImageDataFormat) -> Result<()> {
    if shape.len() != 3 {
        return Err(Error::invalid_shape("image", shape, "expected exactly 3 axes"));
    }
    validate_axes("image", shape, shape, format)
}

/// Checks that `shape` is a non-empty batch of images in the given layout, with the sample axis
/// first.
pub fn validate_images(shape: &[usize], format: ImageDataFormat) -> Result<()> {
    if shape.len() != 4 {
        return Err(Error::invalid_shape("images", shape, "expected exactly 4 axes"));
    }
    if shape[0] == 0 {
        return Err(Error::invalid_shape("images", shape, "contains no images"));
    }
    validate_axes("images", shape, &shape[1..], format)
}

fn validate_axes(
    name: &'static str,
    full: &[usize],
    image: &[usize],
    format: ImageDataFormat,
) -> Result<()> {
    let (c, h, w) = format.axes();
    if !VALID_CHANNELS.contains(&image[c]) {
        return Err(Error::invalid_shape(
            name,
            full,
            format!("channel count {} is not 1, 3, or 4", image[c]),
        ));
    }
    if image[h] == 0 || image[w] == 0 {
        return Err(Error::invalid_shape(name, full, "spatial axes must be non-empty"));
    }
    Ok(())
}

/// An 8-bit image in row-major HWC order. Channels are 3 (RGB) or 4 (RGBA).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

/// Axis positions and lengths of an image tensor, decoded from a layout tag.
struct Layout {
    sample: Option<(usize, usize)>,
    channel: (usize, usize),
    height: (usize, usize),
    width: (usize, usize),
}

impl Layout {
    /// Pairs each axis with its (length, stride) from a tag such as `"NHWC"`.
    fn parse(array: &DenseArray, dataformats: &str) -> io::Result<Self> {
        if dataformats.len() != array.ndim() {
            return Err(invalid_input(format!(
                "layout {:?} does not match a {}-axis tensor",
                dataformats,
                array.ndim()
            )));
        }
        let strides = array.strides();
        let mut axes = [None; 4];
        for (i, tag) in dataformats.chars().enumerate() {
            let slot = match tag {
                'N' => 0,
                'C' => 1,
                'H' => 2,
                'W' => 3,
                _ => return Err(invalid_input(format!("unknown layout {:?}", dataformats))),
            };
            axes[slot] = Some((array.shape()[i], strides[i]));
        }
        let required = |slot: usize| {
            axes[slot].ok_or_else(|| invalid_input(format!("unknown layout {:?}", dataformats)))
        };
        Ok(Layout {
            sample: axes[0],
            channel: required(1)?,
            height: required(2)?,
            width: required(3)?,
        })
    }

    fn samples(&self) -> usize {
        self.sample.map_or(1, |(len, _)| len)
    }
}

fn invalid_input(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

/// Scales a float in `[0, 1]` to a byte, clamping out-of-range values. NaN maps to 0.
fn to_byte(v: f64) -> u8 {
    (v * 255.0).clamp(0.0, 255.0) as u8
}

/// Converts an image or image batch to 8-bit HWC pixels.
///
/// Batches are tiled left to right, top to bottom, into a grid with `columns` columns (at most
/// 8 by default) and at least `min_rows` rows; unused cells stay black. Single-channel images are
/// expanded to RGB.
pub fn to_pixels(
    array: &DenseArray,
    dataformats: &str,
    columns: Option<usize>,
    min_rows: usize,
) -> io::Result<Pixels> {
    let layout = Layout::parse(array, dataformats)?;
    let n = layout.samples();
    let (c, c_stride) = layout.channel;
    let (h, h_stride) = layout.height;
    let (w, w_stride) = layout.width;
    let n_stride = layout.sample.map_or(0, |(_, stride)| stride);
    if n == 0 || h == 0 || w == 0 || !VALID_CHANNELS.contains(&c) {
        return Err(invalid_input(format!(
            "cannot render {:?} tensor of shape {:?}",
            dataformats,
            array.shape()
        )));
    }

    let columns = columns.unwrap_or(MAX_GRID_COLUMNS).clamp(1, n);
    let rows = ((n + columns - 1) / columns).max(min_rows);
    let out_channels = if c == 1 { 3 } else { c };
    let height = rows * h;
    let width = columns * w;
    let mut data = vec![0u8; height * width * out_channels];

    let src = array.data();
    for i in 0..n {
        let top = (i / columns) * h;
        let left = (i % columns) * w;
        for y in 0..h {
            for x in 0..w {
                let base = i * n_stride + y * h_stride + x * w_stride;
                let out = ((top + y) * width + left + x) * out_channels;
                for k in 0..out_channels {
                    let ch = if c == 1 { 0 } else { k };
                    data[out + k] = to_byte(src[base + ch * c_stride]);
                }
            }
        }
    }

    Ok(Pixels {
        height,
        width,
        channels: out_channels,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::Tensor;

    fn dense(shape: &[usize], data: Vec<f64>) -> DenseArray {
        DenseArray::from_tensor(&Tensor::new(shape, data).unwrap()).unwrap()
    }

    #[test]
    fn test_validate_image_channels_last() {
        for c in [1, 3, 4] {
            assert!(validate_image(&[4, 4, c], ImageDataFormat::ChannelsLast).is_ok());
        }
        for shape in [
            &[1, 1, 2][..],
            &[4, 4, 0],
            &[4, 4, 5],
            &[0, 4, 3],
            &[4, 0, 3],
            &[4, 4],
            &[1, 4, 4, 3],
        ] {
            assert!(
                validate_image(shape, ImageDataFormat::ChannelsLast).is_err(),
                "{:?}",
                shape
            );
        }
    }

    #[test]
    fn test_validate_image_channels_first() {
        assert!(validate_image(&[3, 8, 2], ImageDataFormat::ChannelsFirst).is_ok());
        assert!(validate_image(&[8, 2, 3], ImageDataFormat::ChannelsFirst).is_err());
        assert!(validate_image(&[1, 0, 2], ImageDataFormat::ChannelsFirst).is_err());
    }

    #[test]
    fn test_validate_images() {
        assert!(validate_images(&[2, 4, 4, 3], ImageDataFormat::ChannelsLast).is_ok());
        assert!(validate_images(&[2, 1, 4, 4], ImageDataFormat::ChannelsFirst).is_ok());
        assert!(validate_images(&[0, 4, 4, 3], ImageDataFormat::ChannelsLast).is_err());
        assert!(validate_images(&[2, 4, 4, 2], ImageDataFormat::ChannelsLast).is_err());
        assert!(validate_images(&[2, 4, 0, 3], ImageDataFormat::ChannelsLast).is_err());
        assert!(validate_images(&[4, 4, 3], ImageDataFormat::ChannelsLast).is_err());
    }

    #[test]
    fn test_layout_tags() {
        assert_eq!(ImageDataFormat::default(), ImageDataFormat::ChannelsLast);
        assert_eq!(ImageDataFormat::ChannelsFirst.as_str(), "CHW");
        assert_eq!(ImageDataFormat::ChannelsLast.as_str(), "HWC");
        assert_eq!(ImageDataFormat::ChannelsLast.batch_str(), "NHWC");
        assert_eq!(ImageDataFormat::ChannelsFirst.batch_str(), "NCHW");
    }

    #[test]
    fn test_chw_to_pixels() {
        let array = dense(&[3, 1, 2], vec![1.0, 0.0, 0.0, 0.5, 0.0, 2.0]);
        let pixels = to_pixels(&array, "CHW", None, 0).unwrap();
        assert_eq!((pixels.height, pixels.width, pixels.channels), (1, 2, 3));
        assert_eq!(pixels.data, vec![255, 0, 0, 0, 127, 255]);
    }

    #[test]
    fn test_grayscale_expands_to_rgb() {
        let array = dense(&[1, 2, 1], vec![0.0, 1.0]);
        let pixels = to_pixels(&array, "HWC", None, 0).unwrap();
        assert_eq!(pixels.channels, 3);
        assert_eq!(pixels.data, vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_batch_grid() {
        // Three 1x1 RGBA images in a 2-column grid: two rows, last cell empty.
        let array = dense(
            &[3, 1, 1, 4],
            vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0],
        );
        let pixels = to_pixels(&array, "NHWC", Some(2), 0).unwrap();
        assert_eq!((pixels.height, pixels.width, pixels.channels), (2, 2, 4));
        assert_eq!(
            pixels.data,
            vec![255, 255, 255, 255, 0, 0, 0, 255, 255, 0, 0, 255, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_min_rows_pads_canvas() {
        let array = dense(&[2, 1, 1, 1], vec![1.0, 1.0]);
        let pixels = to_pixels(&array, "NCHW", Some(2), 2).unwrap();
        assert_eq!((pixels.height, pixels.width), (2, 2));
    }

    #[test]
    fn test_mismatched_layout_is_error() {
        let array = dense(&[1, 1, 3], vec![0.0; 3]);
        assert!(to_pixels(&array, "NHWC", None, 0).is_err());
        assert!(to_pixels(&array, "HWX", None, 0).is_err());
        assert!(to_pixels(&array, "HHC", None, 0).is_err());
    }
}
