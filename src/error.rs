use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A tensor or label set does not have the shape an operation requires. Raised before any
    /// record is forwarded to the backend.
    #[error("invalid `{name}` shape {shape:?}: {reason}")]
    InvalidShape {
        name: &'static str,
        shape: Vec<usize>,
        reason: String,
    },

    #[error("failed to serialize JSON text: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("summary writer is closed")]
    Closed,
}

impl Error {
    #[must_use]
    pub fn invalid_shape(name: &'static str, shape: &[usize], reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            name,
            shape: shape.to_vec(),
            reason: reason.into(),
        }
    }
}
