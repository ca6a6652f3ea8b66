//! Sink trait and error types

use crate::model::ListingRecord;
use thiserror::Error;

/// Errors that can occur while writing records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Append-only destination for listing records
///
/// Rows are written in call order and never rewritten. There is a single writer
/// per run, so implementations need no locking.
pub trait RecordSink {
    /// Appends one record as one row
    fn append(&mut self, record: &ListingRecord) -> SinkResult<()>;

    /// Appends several records in order
    fn append_all(&mut self, records: &[ListingRecord]) -> SinkResult<()> {
        for record in records {
            self.append(record)?;
        }
        Ok(())
    }
}
