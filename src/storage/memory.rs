use crate::model::ListingRecord;
use crate::storage::{RecordSink, SinkResult};

/// Sink that keeps records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<ListingRecord>,
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &ListingRecord) -> SinkResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
