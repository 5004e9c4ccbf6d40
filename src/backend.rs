use std::collections::BTreeMap;
use std::io;
use std::time::SystemTime;

use crate::tensor::DenseArray;

/// The log writer behind a [`SummaryWriter`](crate::SummaryWriter).
///
/// The facade validates its inputs before calling into a backend, so a backend may assume image
/// tensors match their layout tag and embedding labels match the matrix rows. `step` and
/// `walltime` are forwarded as given; choosing defaults for missing values is up to the backend.
pub trait WriterBackend {
    fn add_scalar(
        &mut self,
        tag: &str,
        value: f64,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()>;

    fn add_scalars(
        &mut self,
        main_tag: &str,
        scalars: &BTreeMap<String, f64>,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()>;

    /// `dataformats` is `"CHW"` or `"HWC"`.
    fn add_image(
        &mut self,
        tag: &str,
        image: &DenseArray,
        dataformats: &str,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()>;

    /// `dataformats` is `"NCHW"` or `"NHWC"`.
    fn add_images(
        &mut self,
        tag: &str,
        images: &DenseArray,
        dataformats: &str,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()>;

    fn add_text(
        &mut self,
        tag: &str,
        text: &str,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()>;

    fn add_histogram(
        &mut self,
        tag: &str,
        values: &DenseArray,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()>;

    /// `labels[i]` names row `i` of `matrix`. `label_images`, when present, holds one image per
    /// row in the given `"NCHW"` or `"NHWC"` layout.
    fn add_embedding(
        &mut self,
        tag: &str,
        matrix: &DenseArray,
        labels: &[String],
        label_images: Option<(&DenseArray, &str)>,
        step: Option<i64>,
    ) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Releases the backend's resources. Called at most once.
    fn close(&mut self) -> io::Result<()>;
}
