//! Storage module for persisting listing records
//!
//! This module handles the append-only dataset the crawl writes to:
//! - The `RecordSink` trait the pagination controller commits pages through
//! - A CSV-backed sink that owns the header bootstrap and column order

mod csv_sink;
#[cfg(test)]
pub(crate) mod memory;
mod traits;

pub use csv_sink::CsvSink;
pub use traits::{RecordSink, SinkError, SinkResult};
