//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PaginationState`: the per-area state machine (running, exhausted, capped, failed)
//! - `CrawlState`: page counter, page cap, pacing interval and timeout for one area

mod crawl_state;
mod pagination_state;

pub use crawl_state::CrawlState;
pub use pagination_state::PaginationState;
