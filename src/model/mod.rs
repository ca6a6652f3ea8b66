//! Data model for the crawl
//!
//! # Components
//!
//! - `SearchQuery`: the query parameters sent to the results endpoint
//! - `SearchArea`: the ordered region-name to area-code table
//! - `SalaryRange` / `ExperienceRange`: typed values produced by field extraction
//! - `ListingRecord` / `Column`: the flattened row and its fixed column schema

mod area;
mod query;
mod ranges;
mod record;

pub use area::SearchArea;
pub use query::SearchQuery;
pub use ranges::{Currency, ExperienceRange, SalaryRange};
pub use record::{Column, ListingRecord};
