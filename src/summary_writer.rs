//! The user-facing summary writer.
//!
//! [`SummaryWriter`] checks shapes and reshapes caller tensors, then hands them to a
//! [`WriterBackend`]. Every check runs before the backend sees the record, so a rejected call
//! leaves the log untouched.
//!
//! ```no_run
//! use tensorboard_summary::{ImageDataFormat, SummaryWriter, Tensor};
//!
//! # fn main() -> tensorboard_summary::Result<()> {
//! let mut writer = SummaryWriter::new("runs/demo")?;
//! writer.add_scalar("loss", 0.25f32, Some(1), None)?;
//! let image = Tensor::new([8, 8, 3], vec![0.5f32; 8 * 8 * 3])?;
//! writer.add_image("sample", &image, ImageDataFormat::ChannelsLast, Some(1), None)?;
//! writer.close()?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;

use serde::Serialize;

use crate::backend::WriterBackend;
use crate::config::WriterConfig;
use crate::error::{Error, Result};
use crate::event_file::EventFileBackend;
use crate::image::{self, ImageDataFormat};
use crate::layers::HistogramWritable;
use crate::tensor::{DenseArray, Element, TensorSource};

/// Tag used for embeddings when the caller has no better name.
pub const DEFAULT_EMBEDDING_TAG: &str = "default";

/// Writes summaries for TensorBoard.
///
/// The writer is open from construction until [`close`](Self::close) is called or the writer is
/// dropped. Once closed, every method except `close` fails with [`Error::Closed`].
pub struct SummaryWriter<B: WriterBackend = EventFileBackend> {
    backend: Option<B>,
}

impl SummaryWriter<EventFileBackend> {
    /// Opens a new event file in `logdir`, creating the directory if needed. Buffered events are
    /// flushed at least every 120 seconds.
    pub fn new(logdir: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(logdir, WriterConfig::default())
    }

    pub fn with_flush_secs(logdir: impl AsRef<Path>, flush_secs: u64) -> Result<Self> {
        Self::with_config(logdir, WriterConfig::default().flush_secs(flush_secs))
    }

    pub fn with_config(logdir: impl AsRef<Path>, config: WriterConfig) -> Result<Self> {
        let backend = EventFileBackend::open(logdir, config)?;
        Ok(Self::from_backend(backend))
    }
}

impl<B: WriterBackend> SummaryWriter<B> {
    pub fn from_backend(backend: B) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// The backend, unless the writer has been closed.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    fn open_backend(&mut self) -> Result<&mut B> {
        self.backend.as_mut().ok_or(Error::Closed)
    }

    /// Pushes buffered records to durable storage.
    pub fn flush(&mut self) -> Result<()> {
        self.open_backend()?.flush()?;
        Ok(())
    }

    /// Closes the backend. Closing an already closed writer does nothing.
    ///
    /// The writer counts as closed afterwards even if the backend reports an error.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut backend) = self.backend.take() {
            backend.close()?;
            tracing::debug!("closed summary writer");
        }
        Ok(())
    }

    pub fn add_scalar<T: Element>(
        &mut self,
        tag: &str,
        value: T,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> Result<()> {
        self.open_backend()?
            .add_scalar(tag, value.to_f64(), step, walltime)?;
        Ok(())
    }

    /// Writes several related scalars under one main tag, so TensorBoard plots them together.
    pub fn add_scalars<I, K, T>(
        &mut self,
        main_tag: &str,
        scalars: I,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Element,
    {
        let backend = self.open_backend()?;
        let scalars: BTreeMap<String, f64> = scalars
            .into_iter()
            .map(|(tag, value)| (tag.into(), value.to_f64()))
            .collect();
        backend.add_scalars(main_tag, &scalars, step, walltime)?;
        Ok(())
    }

    /// Writes one image. The channel axis must hold 1, 3, or 4 channels, and pixel values are
    /// expected in `[0, 1]`.
    pub fn add_image<S: TensorSource + ?Sized>(
        &mut self,
        tag: &str,
        image: &S,
        format: ImageDataFormat,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> Result<()> {
        let backend = self.open_backend()?;
        image::validate_image(image.shape(), format)?;
        let array = DenseArray::from_tensor(image)?;
        backend.add_image(tag, &array, format.as_str(), step, walltime)?;
        Ok(())
    }

    /// Writes a batch of images, with the sample axis first. Each image follows the rules of
    /// [`add_image`](Self::add_image).
    pub fn add_images<S: TensorSource + ?Sized>(
        &mut self,
        tag: &str,
        images: &S,
        format: ImageDataFormat,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> Result<()> {
        let backend = self.open_backend()?;
        image::validate_images(images.shape(), format)?;
        let array = DenseArray::from_tensor(images)?;
        backend.add_images(tag, &array, format.batch_str(), step, walltime)?;
        Ok(())
    }

    /// Writes a text record. With `convert_to_markdown`, each line break becomes a Markdown hard
    /// break (`"  \n"`) so TensorBoard keeps it.
    pub fn add_text(
        &mut self,
        tag: &str,
        text: &str,
        step: Option<i64>,
        walltime: Option<SystemTime>,
        convert_to_markdown: bool,
    ) -> Result<()> {
        let backend = self.open_backend()?;
        if convert_to_markdown {
            backend.add_text(tag, &markdown_line_breaks(text), step, walltime)?;
        } else {
            backend.add_text(tag, text, step, walltime)?;
        }
        Ok(())
    }

    /// Writes `value` as pretty-printed JSON text, with spaces escaped as `&nbsp;` so the
    /// indentation survives Markdown rendering.
    pub fn add_json_text<T: Serialize + ?Sized>(
        &mut self,
        tag: &str,
        value: &T,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> Result<()> {
        self.open_backend()?;
        let text = serde_json::to_string_pretty(value)?.replace(' ', "&nbsp;");
        self.add_text(tag, &text, step, walltime, true)
    }

    /// Writes a histogram of all elements of `values`, whatever its shape.
    pub fn add_histogram<S: TensorSource + ?Sized>(
        &mut self,
        tag: &str,
        values: &S,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> Result<()> {
        let backend = self.open_backend()?;
        let array = DenseArray::from_tensor(values)?;
        backend.add_histogram(tag, &array, step, walltime)?;
        Ok(())
    }

    /// Writes a histogram for each named tensor of `layer`, tagged `"{tag}.{name}"`.
    ///
    /// All tensors are converted before the first histogram is written.
    pub fn add_histograms<L: HistogramWritable + ?Sized>(
        &mut self,
        tag: &str,
        layer: &L,
        step: Option<i64>,
    ) -> Result<()> {
        let backend = self.open_backend()?;
        let mut arrays = Vec::new();
        for (name, tensor) in layer.named_tensors() {
            arrays.push((format!("{}.{}", tag, name), DenseArray::from_tensor(tensor)?));
        }
        for (tag, array) in &arrays {
            backend.add_histogram(tag, array, step, None)?;
        }
        Ok(())
    }

    /// Writes an N×D embedding matrix with one label per row.
    pub fn add_embedding<S, L>(
        &mut self,
        tag: &str,
        matrix: &S,
        labels: &[L],
        step: Option<i64>,
    ) -> Result<()>
    where
        S: TensorSource + ?Sized,
        L: AsRef<str>,
    {
        let backend = self.open_backend()?;
        let (matrix, labels) = embedding_parts(matrix, labels)?;
        backend.add_embedding(tag, &matrix, &labels, None, step)?;
        Ok(())
    }

    /// Like [`add_embedding`](Self::add_embedding), with one thumbnail image per row shown in
    /// the projector. `label_images` must pass the [`add_images`](Self::add_images) checks.
    pub fn add_embedding_with_images<S, L, I>(
        &mut self,
        tag: &str,
        matrix: &S,
        labels: &[L],
        label_images: &I,
        format: ImageDataFormat,
        step: Option<i64>,
    ) -> Result<()>
    where
        S: TensorSource + ?Sized,
        L: AsRef<str>,
        I: TensorSource + ?Sized,
    {
        let backend = self.open_backend()?;
        let (matrix, labels) = embedding_parts(matrix, labels)?;
        let shape = label_images.shape();
        image::validate_images(shape, format)?;
        if shape[0] != matrix.shape()[0] {
            return Err(Error::invalid_shape(
                "label_images",
                shape,
                format!("expected one image per row, {} rows", matrix.shape()[0]),
            ));
        }
        let images = DenseArray::from_tensor(label_images)?;
        let label_images = Some((&images, format.batch_str()));
        backend.add_embedding(tag, &matrix, &labels, label_images, step)?;
        Ok(())
    }
}

impl<B: WriterBackend> Drop for SummaryWriter<B> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(error = %err, "failed to close summary writer");
        }
    }
}

fn markdown_line_breaks(text: &str) -> String {
    text.replace('\n', "  \n")
}

/// Checks that `matrix` is 2-D with one label per row, and converts both.
fn embedding_parts<S, L>(matrix: &S, labels: &[L]) -> Result<(DenseArray, Vec<String>)>
where
    S: TensorSource + ?Sized,
    L: AsRef<str>,
{
    let shape = matrix.shape();
    if shape.len() != 2 {
        return Err(Error::invalid_shape("matrix", shape, "expected exactly 2 axes"));
    }
    if shape[1] == 0 {
        return Err(Error::invalid_shape(
            "matrix",
            shape,
            "embedding dimension must be non-empty",
        ));
    }
    if labels.len() != shape[0] {
        return Err(Error::invalid_shape(
            "matrix",
            shape,
            format!("{} labels given for {} rows", labels.len(), shape[0]),
        ));
    }
    let matrix = DenseArray::from_tensor(matrix)?;
    let labels = labels.iter().map(|l| l.as_ref().to_string()).collect();
    Ok((matrix, labels))
}
