//! Configuration module for Vacancy-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; omitted values fall back to the defaults of a plain
//! "Python Developer" crawl.
//!
//! # Example
//!
//! ```no_run
//! use vacancy_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Pausing {}ms between requests", config.http.pacing_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig, SelectorConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
