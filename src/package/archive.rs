//! Archive sinks that receive the package parts
//!
//! [`StreamingZipWriter`] compresses each part on the fly into any
//! [`Write`] and never seeks.

use crate::error::Result;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::io::Write;
use zip::write::{SimpleFileOptions, StreamWriter};
use zip::{CompressionMethod, ZipWriter};

/// Destination of the named parts of a package
pub trait ArchiveSink {
    /// What the sink hands back once finalized
    type Output;

    /// Append a part; parts may arrive in any order
    fn append(&mut self, part_name: &str, content: &[u8]) -> Result<()>;

    /// Signal that no more parts follow
    fn finalize(self) -> Result<Self::Output>
    where
        Self: Sized;
}

/// Streaming ZIP writer that compresses parts on-the-fly
///
/// Wraps [`ZipWriter::new_stream`], so the output only needs [`Write`]:
/// sizes and checksums go into data descriptors after each entry.
pub struct StreamingZipWriter<W: Write> {
    zip: ZipWriter<StreamWriter<W>>,
    options: SimpleFileOptions,
    entry_count: usize,
}

impl<W: Write> StreamingZipWriter<W> {
    /// Writer with default compression, entries stamped with the current time
    pub fn new(output: W) -> Self {
        Self::with_compression(output, 6, Utc::now())
    }

    /// Writer with a compression level (0-9, clamped) and entry timestamp
    pub fn with_compression(output: W, compression_level: u32, modified: DateTime<Utc>) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level.min(9) as i64))
            .last_modified_time(zip_timestamp(&modified));

        StreamingZipWriter {
            zip: ZipWriter::new_stream(output),
            options,
            entry_count: 0,
        }
    }

    /// Number of entries written so far
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}

impl<W: Write> ArchiveSink for StreamingZipWriter<W> {
    type Output = W;

    fn append(&mut self, part_name: &str, content: &[u8]) -> Result<()> {
        self.zip.start_file(part_name, self.options)?;
        self.zip.write_all(content)?;
        self.entry_count += 1;
        log::trace!("zip entry {} ({} bytes)", part_name, content.len());
        Ok(())
    }

    /// Write the central directory and end record, then hand back the output
    fn finalize(self) -> Result<W> {
        let entries = self.entry_count;
        let mut output = self.zip.finish()?.into_inner();
        output.flush()?;
        log::debug!("zip finalized: {} entries", entries);
        Ok(output)
    }
}

/// Entry timestamp in the ZIP's MS-DOS range (1980-2107)
fn zip_timestamp(at: &DateTime<Utc>) -> zip::DateTime {
    let year = at.year().clamp(1980, 2107) as u16;
    zip::DateTime::from_date_and_time(
        year,
        at.month() as u8,
        at.day() as u8,
        at.hour() as u8,
        at.minute() as u8,
        at.second().min(59) as u8,
    )
    .unwrap_or_default()
}

/// Sink that keeps the parts in memory, in append order
#[derive(Debug, Default)]
pub struct MemoryArchive {
    parts: Vec<(String, Vec<u8>)>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a part by name
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, content)| content.as_slice())
    }

    /// Part names in append order
    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl ArchiveSink for MemoryArchive {
    type Output = MemoryArchive;

    fn append(&mut self, part_name: &str, content: &[u8]) -> Result<()> {
        self.parts.push((part_name.to_string(), content.to_vec()));
        Ok(())
    }

    fn finalize(self) -> Result<MemoryArchive> {
        Ok(self)
    }
}
