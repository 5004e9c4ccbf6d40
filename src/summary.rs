use super::proto::tensorboard as pb;
use pb::summary::value::Value as InnerValue;

use crate::image::Pixels;

/// Name under which TensorBoard's text dashboard looks for summaries.
pub const TEXT_PLUGIN_NAME: &str = "text";

#[derive(Default)]
pub struct SummaryBuilder {
    summary: pb::Summary,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> pb::Summary {
        self.summary
    }

    pub fn value(mut self, value: pb::summary::Value) -> Self {
        self.summary.value.push(value);
        self
    }

    fn tag_and_inner_value(self, tag: &str, inner: InnerValue) -> Self {
        let mut outer = pb::summary::Value::default();
        outer.tag = tag.to_string();
        outer.value = Some(inner);
        self.value(outer)
    }

    pub fn scalar(self, tag: &str, scalar: f32) -> Self {
        self.tag_and_inner_value(tag, InnerValue::SimpleValue(scalar))
    }

    /// Adds a histogram of `values` with `bins` equal-width buckets spanning their range.
    ///
    /// Callers are expected to drop non-finite values first. When every value is equal, a single
    /// bucket holds them all.
    pub fn histogram(self, tag: &str, bins: usize, values: &[f64]) -> Self {
        let mut histo = pb::HistogramProto::default();
        if !values.is_empty() && bins > 0 {
            histo.min = values.iter().copied().fold(f64::INFINITY, f64::min);
            histo.max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            histo.num = values.len() as f64;
            histo.sum = values.iter().sum();
            histo.sum_squares = values.iter().map(|z| z * z).sum();

            // Divide before subtracting so a range wider than f64::MAX stays finite.
            let bucket_width = histo.max / bins as f64 - histo.min / bins as f64;
            if bucket_width > 0.0 {
                // `bucket` has the counts in each bucket
                histo.bucket = vec![0.0; bins];
                // `bucket_limit` has the right edge of each bucket
                histo.bucket_limit = (0..bins)
                    .map(|i| {
                        let t = (i + 1) as f64 / bins as f64;
                        histo.min * (1.0 - t) + histo.max * t
                    })
                    .collect();
                for &z in values {
                    let idx = f64::floor(z / bucket_width - histo.min / bucket_width);
                    // Clamp in case of any floating point weirdness.
                    let idx = idx.clamp(0.0, (bins - 1) as f64);
                    histo.bucket[idx as usize] += 1.0;
                }
            } else {
                histo.bucket = vec![histo.num];
                histo.bucket_limit = vec![histo.max];
            }
        }
        self.tag_and_inner_value(tag, InnerValue::Histo(histo))
    }

    /// Adds a PNG-encoded image. `colorspace` follows the channel count: 3 for RGB, 4 for RGBA.
    pub fn image(self, tag: &str, pixels: &Pixels, encoded_png: Vec<u8>) -> Self {
        let image = pb::summary::Image {
            height: pixels.height as i32,
            width: pixels.width as i32,
            colorspace: pixels.channels as i32,
            encoded_image_string: encoded_png,
        };
        self.tag_and_inner_value(tag, InnerValue::Image(image))
    }

    /// Adds a text summary, stored as a rank-1 string tensor for the text plugin.
    pub fn text(self, tag: &str, text: &str) -> Self {
        let tensor = pb::TensorProto {
            dtype: pb::DataType::DtString as i32,
            tensor_shape: Some(pb::TensorShapeProto {
                dim: vec![pb::tensor_shape_proto::Dim {
                    size: 1,
                    name: String::new(),
                }],
                unknown_rank: false,
            }),
            string_val: vec![text.as_bytes().to_vec()],
            ..Default::default()
        };
        let metadata = pb::SummaryMetadata {
            plugin_data: Some(pb::summary_metadata::PluginData {
                plugin_name: TEXT_PLUGIN_NAME.to_string(),
                // An empty `TextPluginData` (version 0) encodes to no bytes.
                content: Vec::new(),
            }),
            ..Default::default()
        };
        let mut outer = pb::summary::Value::default();
        outer.tag = tag.to_string();
        outer.metadata = Some(metadata);
        outer.value = Some(InnerValue::Tensor(tensor));
        self.value(outer)
    }
}
