//! Write TensorBoard summaries from Rust.
//!
//! [`SummaryWriter`] is the entry point: it validates tensors and forwards scalars, images,
//! text, histograms, and embeddings to a [`WriterBackend`]. The default backend writes TFRecord
//! event files that TensorBoard reads directly. The lower-level modules ([`writer`],
//! [`summary`], [`tf_record`]) are public for callers who want to build events themselves.

pub mod proto {
    pub mod tensorboard {
        include!("tensorboard.pb.rs");
    }
}

pub mod backend;
pub mod config;
pub mod error;
pub mod event_file;
pub mod image;
pub mod layers;
pub mod masked_crc;
pub mod png;
pub mod projector;
pub mod summary;
pub mod summary_writer;
pub mod tensor;
pub mod tf_record;
pub mod writer;

#[cfg(test)]
mod scripted_reader;

pub use backend::WriterBackend;
pub use config::WriterConfig;
pub use error::{Error, Result};
pub use event_file::EventFileBackend;
pub use image::ImageDataFormat;
pub use layers::HistogramWritable;
pub use summary_writer::{SummaryWriter, DEFAULT_EMBEDDING_TAG};
pub use tensor::{DenseArray, Element, Tensor, TensorSource};
