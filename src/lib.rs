//! Vacancy-Harvest: a paced job-listing crawler
//!
//! This crate walks a paginated vacancy search one search area at a time, extracts
//! structured fields from every listing and its detail page, and appends the
//! normalized rows to a CSV dataset.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Vacancy-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Unrecoverable failure on page {page}: {message}")]
    Unrecoverable { page: u32, message: String },

    #[error("Gave up after {attempts} attempts: {last}")]
    RetryExhausted {
        attempts: u32,
        last: Box<HarvestError>,
    },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Sink error: {0}")]
    Sink(#[from] storage::SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true for the failure class the page step is retried on
    ///
    /// Transport failures and unrecoverable listing failures are retried. A plain
    /// non-2xx status is handled by the pagination state machine instead.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Unrecoverable { .. })
    }

    /// Creates a selector compilation error
    pub fn selector(selector: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown search area: {0}")]
    UnknownArea(String),
}

/// Result type alias for Vacancy-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlDriver, ListingParser, PaginationController};
pub use extract::{parse_date, parse_experience, parse_salary, ParseError};
pub use model::{Currency, ExperienceRange, ListingRecord, SalaryRange, SearchArea, SearchQuery};
pub use state::PaginationState;
