use serde::{Deserialize, Serialize};

pub const DEFAULT_FLUSH_SECS: u64 = 120;
pub const DEFAULT_MAX_QUEUE: usize = 10;
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Settings for an event file session.
///
/// Every field has a default, so a partial config (for example a `[tensorboard]` table in a
/// larger config file) deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Longest time buffered events may wait before being flushed to disk. Checked on each write.
    pub flush_secs: u64,
    /// Number of buffered events that forces a flush.
    pub max_queue: usize,
    /// Appended to every event file name.
    pub filename_suffix: String,
    /// Bucket count for histogram summaries.
    pub histogram_bins: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            flush_secs: DEFAULT_FLUSH_SECS,
            max_queue: DEFAULT_MAX_QUEUE,
            filename_suffix: String::new(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl WriterConfig {
    pub fn flush_secs(mut self, secs: u64) -> Self {
        self.flush_secs = secs;
        self
    }

    pub fn max_queue(mut self, max_queue: usize) -> Self {
        self.max_queue = max_queue;
        self
    }

    pub fn filename_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.filename_suffix = suffix.into();
        self
    }

    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: WriterConfig = serde_json::from_str(r#"{"flush_secs": 5}"#).unwrap();
        assert_eq!(config, WriterConfig::default().flush_secs(5));
        assert_eq!(config.max_queue, DEFAULT_MAX_QUEUE);
        assert_eq!(config.histogram_bins, DEFAULT_HISTOGRAM_BINS);
    }

    #[test]
    fn test_builder() {
        let config = WriterConfig::default()
            .max_queue(1)
            .filename_suffix(".v2")
            .histogram_bins(8);
        assert_eq!(config.flush_secs, 120);
        assert_eq!(config.max_queue, 1);
        assert_eq!(config.filename_suffix, ".v2");
        assert_eq!(config.histogram_bins, 8);
    }
}
