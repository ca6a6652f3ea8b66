//! CSV dataset sink

use crate::model::{Column, ListingRecord};
use crate::storage::{RecordSink, SinkResult};
use csv::{Writer, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Append-only CSV file with a fixed header
///
/// The file is held open for the lifetime of the sink and flushed after every row,
/// so a crawl killed mid-run leaves only complete rows behind.
pub struct CsvSink {
    path: PathBuf,
    writer: Writer<File>,
    rows_written: u64,
}

impl CsvSink {
    /// Opens the dataset at `path`
    ///
    /// With `overwrite` the file is truncated (or created) and the header row is
    /// written. Without it the file is opened for appending as-is; its existing
    /// columns are assumed to match [`Column::ALL`] and are not checked.
    pub fn bootstrap(path: &Path, overwrite: bool) -> SinkResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = if overwrite {
            File::create(path)?
        } else {
            OpenOptions::new().create(true).append(true).open(path)?
        };

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if overwrite {
            writer.write_record(Column::header())?;
            writer.flush()?;
            tracing::info!("Created dataset {} with header", path.display());
        } else {
            tracing::info!("Appending to dataset {}", path.display());
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows_written: 0,
        })
    }

    /// Path of the dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended through this sink
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &ListingRecord) -> SinkResult<()> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}
