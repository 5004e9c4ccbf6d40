use std::collections::btree_map::{BTreeMap, Entry};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant, SystemTime};

use crate::backend::WriterBackend;
use crate::config::WriterConfig;
use crate::proto::tensorboard as pb;
use crate::summary::SummaryBuilder;
use crate::tensor::DenseArray;
use crate::writer::TensorboardWriter;
use crate::{image, png, projector};

/// Distinguishes event files opened by this process within the same second.
static NEXT_FILE_ID: AtomicUsize = AtomicUsize::new(0);

/// One open `events.out.tfevents.*` file with a buffered, periodically flushed writer.
pub struct EventFileWriter {
    path: PathBuf,
    writer: TensorboardWriter<BufWriter<File>>,
    flush_interval: Duration,
    max_queue: usize,
    pending: usize,
    last_flush: Instant,
}

impl EventFileWriter {
    /// Creates `logdir` if needed and opens a new event file in it, starting with the file
    /// version header.
    pub fn create(logdir: &Path, config: &WriterConfig) -> io::Result<Self> {
        fs::create_dir_all(logdir)?;
        let path = logdir.join(event_file_name(&config.filename_suffix)?);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        let mut writer = TensorboardWriter::new(BufWriter::new(file));
        writer.write_file_version()?;
        writer.flush()?;
        tracing::debug!(path = %path.display(), "opened event file");
        Ok(Self {
            path,
            writer,
            flush_interval: Duration::from_secs(config.flush_secs),
            max_queue: config.max_queue,
            pending: 0,
            last_flush: Instant::now(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_summary(
        &mut self,
        wall_time: SystemTime,
        step: i64,
        summary: pb::Summary,
    ) -> io::Result<()> {
        self.writer.write_summary(wall_time, step, summary)?;
        self.pending += 1;
        if self.pending >= self.max_queue || self.last_flush.elapsed() >= self.flush_interval {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        tracing::trace!(path = %self.path.display(), events = self.pending, "flushed event file");
        self.pending = 0;
        self.last_flush = Instant::now();
        Ok(())
    }

    /// Flushes buffered events and syncs the file to disk.
    pub fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.writer.get_ref().get_ref().sync_all()
    }
}

fn event_file_name(suffix: &str) -> io::Result<String> {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(io::Error::other)?
        .as_secs();
    let host = hostname::get()?;
    Ok(format!(
        "events.out.tfevents.{:010}.{}.{}.{}{}",
        secs,
        host.to_string_lossy(),
        std::process::id(),
        NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed),
        suffix
    ))
}

/// Writes summaries to event files under a log directory.
///
/// Scalar groups go to one child event file per sub-tag, in sibling directories named
/// `{main_tag}_{sub_tag}`, so TensorBoard overlays them as separate runs on one chart.
/// Embeddings are written as projector files rather than events.
pub struct EventFileBackend {
    logdir: PathBuf,
    config: WriterConfig,
    events: EventFileWriter,
    scalar_groups: BTreeMap<String, EventFileWriter>,
}

impl EventFileBackend {
    pub fn open(logdir: impl AsRef<Path>, config: WriterConfig) -> io::Result<Self> {
        let logdir = logdir.as_ref().to_path_buf();
        let events = EventFileWriter::create(&logdir, &config)?;
        Ok(Self {
            logdir,
            config,
            events,
            scalar_groups: BTreeMap::new(),
        })
    }

    /// Path of the main event file.
    pub fn event_file(&self) -> &Path {
        self.events.path()
    }

    fn write(
        &mut self,
        summary: pb::Summary,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()> {
        let walltime = walltime.unwrap_or_else(SystemTime::now);
        self.events
            .write_summary(walltime, step.unwrap_or(0), summary)
    }

    fn write_pixels(
        &mut self,
        tag: &str,
        array: &DenseArray,
        dataformats: &str,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()> {
        let pixels = image::to_pixels(array, dataformats, None, 0)?;
        let encoded = png::encode(&pixels)?;
        let summary = SummaryBuilder::new().image(tag, &pixels, encoded).build();
        self.write(summary, step, walltime)
    }
}

impl WriterBackend for EventFileBackend {
    fn add_scalar(
        &mut self,
        tag: &str,
        value: f64,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()> {
        let summary = SummaryBuilder::new().scalar(tag, value as f32).build();
        self.write(summary, step, walltime)
    }

    fn add_scalars(
        &mut self,
        main_tag: &str,
        scalars: &BTreeMap<String, f64>,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()> {
        let walltime = walltime.unwrap_or_else(SystemTime::now);
        let step = step.unwrap_or(0);
        for (tag, &value) in scalars {
            let key = format!("{}_{}", main_tag.replace('/', "_"), tag);
            let child = match self.scalar_groups.entry(key) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let dir = self.logdir.join(entry.key());
                    tracing::debug!(dir = %dir.display(), "opening scalar group writer");
                    let child = EventFileWriter::create(&dir, &self.config)?;
                    entry.insert(child)
                }
            };
            let summary = SummaryBuilder::new().scalar(main_tag, value as f32).build();
            child.write_summary(walltime, step, summary)?;
        }
        Ok(())
    }

    fn add_image(
        &mut self,
        tag: &str,
        image: &DenseArray,
        dataformats: &str,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()> {
        self.write_pixels(tag, image, dataformats, step, walltime)
    }

    fn add_images(
        &mut self,
        tag: &str,
        images: &DenseArray,
        dataformats: &str,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()> {
        self.write_pixels(tag, images, dataformats, step, walltime)
    }

    fn add_text(
        &mut self,
        tag: &str,
        text: &str,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()> {
        let tag = format!("{}/text_summary", tag);
        let summary = SummaryBuilder::new().text(&tag, text).build();
        self.write(summary, step, walltime)
    }

    fn add_histogram(
        &mut self,
        tag: &str,
        values: &DenseArray,
        step: Option<i64>,
        walltime: Option<SystemTime>,
    ) -> io::Result<()> {
        let finite: Vec<f64> = values.data().iter().copied().filter(|v| v.is_finite()).collect();
        let dropped = values.data().len() - finite.len();
        if dropped > 0 {
            tracing::warn!(tag, dropped, "dropping non-finite histogram values");
        }
        let summary = SummaryBuilder::new()
            .histogram(tag, self.config.histogram_bins, &finite)
            .build();
        self.write(summary, step, walltime)
    }

    fn add_embedding(
        &mut self,
        tag: &str,
        matrix: &DenseArray,
        labels: &[String],
        label_images: Option<(&DenseArray, &str)>,
        step: Option<i64>,
    ) -> io::Result<()> {
        projector::write_embedding(&self.logdir, tag, matrix, labels, label_images, step)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.events.flush()?;
        for child in self.scalar_groups.values_mut() {
            child.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        let mut result = self.events.close();
        for child in self.scalar_groups.values_mut() {
            let closed = child.close();
            if result.is_ok() {
                result = closed;
            }
        }
        tracing::debug!(logdir = %self.logdir.display(), "closed event files");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_format() {
        let name = event_file_name(".suffix").unwrap();
        assert!(name.starts_with("events.out.tfevents."), "{}", name);
        assert!(name.ends_with(".suffix"), "{}", name);
        let secs = &name["events.out.tfevents.".len()..][..10];
        assert!(secs.chars().all(|c| c.is_ascii_digit()), "{}", name);
    }

    #[test]
    fn test_file_names_are_unique() {
        assert_ne!(event_file_name("").unwrap(), event_file_name("").unwrap());
    }

    #[test]
    fn test_max_queue_triggers_flush() {
        let dir = tempfile::tempdir().unwrap();
        let config = WriterConfig::default().max_queue(2);
        let mut writer = EventFileWriter::create(dir.path(), &config).unwrap();
        let header_len = fs::metadata(writer.path()).unwrap().len();

        let summary = || SummaryBuilder::new().scalar("x", 1.0).build();
        writer
            .write_summary(SystemTime::now(), 0, summary())
            .unwrap();
        assert_eq!(fs::metadata(writer.path()).unwrap().len(), header_len);
        writer
            .write_summary(SystemTime::now(), 1, summary())
            .unwrap();
        assert!(fs::metadata(writer.path()).unwrap().len() > header_len);
    }

    #[test]
    fn test_zero_flush_interval_flushes_every_write() {
        let dir = tempfile::tempdir().unwrap();
        let config = WriterConfig::default().flush_secs(0);
        let mut writer = EventFileWriter::create(dir.path(), &config).unwrap();
        let header_len = fs::metadata(writer.path()).unwrap().len();
        writer
            .write_summary(SystemTime::now(), 0, SummaryBuilder::new().scalar("x", 1.0).build())
            .unwrap();
        assert!(fs::metadata(writer.path()).unwrap().len() > header_len);
    }

    #[test]
    fn test_scalar_groups_open_child_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = EventFileBackend::open(dir.path(), WriterConfig::default()).unwrap();
        let scalars: BTreeMap<String, f64> =
            [("train".to_string(), 1.0), ("eval".to_string(), 2.0)]
                .into_iter()
                .collect();
        backend.add_scalars("loss/total", &scalars, Some(3), None).unwrap();
        backend.add_scalars("loss/total", &scalars, Some(4), None).unwrap();
        assert_eq!(backend.scalar_groups.len(), 2);
        assert!(dir.path().join("loss_total_train").is_dir());
        assert!(dir.path().join("loss_total_eval").is_dir());
        backend.close().unwrap();
    }
}
