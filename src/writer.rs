use std::io::{self, Write};
use std::time::SystemTime;

use prost::Message;

use crate::proto::tensorboard as pb;
use crate::tf_record::TfRecord;

/// Identifies event files written by this crate, in each file's first event.
pub const WRITER_NAME: &str = "rust:tensorboard-summary";

/// Writes TensorBoard `Event` protos as TFRecords to an underlying byte stream.
pub struct TensorboardWriter<W> {
    writer: W,
}

impl<W> TensorboardWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub(crate) fn time_f64(time: SystemTime) -> io::Result<f64> {
    Ok(time
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(io::Error::other)?
        .as_secs_f64())
}

impl<W: Write> TensorboardWriter<W> {
    /// Writes a raw TFRecord to the output stream. You may find it more convenient to use
    /// [`write_event`][Self::write_event] instead, which computes the record checksum for you.
    pub fn write_record(&mut self, record: &TfRecord) -> io::Result<()> {
        record.write(&mut self.writer)
    }

    /// Writes an `Event` to the output stream.
    pub fn write_event(&mut self, event: &pb::Event) -> io::Result<()> {
        let data = event.encode_to_vec();
        let record = TfRecord::from_data(data);
        self.write_record(&record)
    }

    /// Writes a file version header event. This reads the current system time.
    pub fn write_file_version(&mut self) -> io::Result<()> {
        const FILE_VERSION: &str = "brain.Event:2";

        let mut event = pb::Event::default();
        event.wall_time = time_f64(SystemTime::now())?;
        event.what = Some(pb::event::What::FileVersion(FILE_VERSION.to_string()));
        let mut source_metadata = pb::SourceMetadata::default();
        source_metadata.writer = WRITER_NAME.to_string();
        event.source_metadata = Some(source_metadata);
        self.write_event(&event)
    }

    /// Writes a summary to the output stream, wrapped in an `Event` with the given step and wall
    /// time.
    pub fn write_summary(
        &mut self,
        wall_time: SystemTime,
        step: i64,
        summary: pb::Summary,
    ) -> io::Result<()> {
        let mut event = pb::Event::default();
        event.wall_time = time_f64(wall_time)?;
        event.step = step;
        event.what = Some(pb::event::What::Summary(summary));
        self.write_event(&event)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::summary::SummaryBuilder;

    fn read_events(mut bytes: &[u8]) -> Vec<pb::Event> {
        let mut events = Vec::new();
        while let Some(record) = TfRecord::read(&mut bytes).unwrap() {
            events.push(pb::Event::decode(record.data.as_slice()).unwrap());
        }
        events
    }

    #[test]
    fn test_file_version_then_summary() {
        let mut writer = TensorboardWriter::new(Vec::new());
        writer.write_file_version().unwrap();
        let wall_time = SystemTime::UNIX_EPOCH + Duration::from_millis(1500);
        let summary = SummaryBuilder::new().scalar("loss", 0.25).build();
        writer.write_summary(wall_time, 7, summary.clone()).unwrap();

        let events = read_events(&writer.into_inner());
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].what,
            Some(pb::event::What::FileVersion("brain.Event:2".to_string()))
        );
        assert_eq!(
            events[0].source_metadata.as_ref().map(|m| m.writer.as_str()),
            Some(WRITER_NAME)
        );
        assert_eq!(events[1].step, 7);
        assert_eq!(events[1].wall_time, 1.5);
        assert_eq!(events[1].what, Some(pb::event::What::Summary(summary)));
    }

    #[test]
    fn test_time_before_epoch_is_error() {
        let before = SystemTime::UNIX_EPOCH - Duration::from_secs(1);
        assert!(time_f64(before).is_err());
    }
}
