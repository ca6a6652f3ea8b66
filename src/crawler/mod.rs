//! Crawler module for results pagination and listing extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `HttpFetch` seam
//! - Fresh identification headers per request
//! - Unconditional pacing after every fetch
//! - Bounded retry of a results-page step
//! - Listing fragment and detail page parsing
//! - The per-area pagination state machine and the multi-area driver

mod controller;
mod driver;
mod fetcher;
mod headers;
mod pacing;
mod parser;
mod retry;

pub use controller::{AreaReport, CrawlContext, PaginationController, StepOutcome};
pub use driver::{CrawlDriver, CrawlSettings, RunSummary};
pub use fetcher::{build_http_client, FetchRequest, FetchResponse, HttpFetch, ReqwestFetcher};
pub use headers::IdentityHeaders;
pub use pacing::{Pacer, SleepPacer};
pub use parser::{
    CompiledSelectors, DetailFields, DetailSource, ListingParser, ListingSummary,
    MalformedListing, PageBatch,
};
pub use retry::RetryPolicy;
