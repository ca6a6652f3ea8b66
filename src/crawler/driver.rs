//! Multi-area crawl driver
//!
//! Runs one full pagination crawl per search area, strictly one after another. A
//! failed area is reported and the driver moves on to the next one.

use crate::config::Config;
use crate::crawler::controller::{AreaReport, CrawlContext, PaginationController};
use crate::crawler::fetcher::{HttpFetch, ReqwestFetcher};
use crate::crawler::headers::IdentityHeaders;
use crate::crawler::pacing::{Pacer, SleepPacer};
use crate::crawler::parser::ListingParser;
use crate::crawler::retry::RetryPolicy;
use crate::model::{SearchArea, SearchQuery};
use crate::state::CrawlState;
use crate::storage::RecordSink;
use crate::Result;
use std::time::Duration;
use tracing::{error, info, warn};

/// Per-area limits, identical for every area of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Page cap per area, `None` for no cap
    pub max_pages: Option<u32>,
    pub pacing: Duration,
    pub timeout: Duration,
}

impl CrawlSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_pages: config.crawler.max_pages,
            pacing: config.http.pacing(),
            timeout: config.http.timeout(),
        }
    }

    fn fresh_state(&self) -> CrawlState {
        CrawlState::new(self.max_pages, self.pacing, self.timeout)
    }
}

/// Aggregated outcome of a run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// One report per area, in crawl order
    pub areas: Vec<AreaReport>,
}

impl RunSummary {
    pub fn records_written(&self) -> usize {
        self.areas.iter().map(|a| a.records_written).sum()
    }

    pub fn listings_skipped(&self) -> usize {
        self.areas.iter().map(|a| a.listings_skipped).sum()
    }

    pub fn pages_crawled(&self) -> u64 {
        self.areas.iter().map(|a| u64::from(a.pages_crawled)).sum()
    }

    /// Areas that ended in the failed state
    pub fn failed_areas(&self) -> impl Iterator<Item = &AreaReport> {
        self.areas.iter().filter(|a| a.state.is_error())
    }

    /// Returns true if every area ended cleanly
    pub fn is_clean(&self) -> bool {
        self.areas.iter().all(|a| a.state.is_clean())
    }

    /// Logs the run totals and every failed area
    pub fn log(&self) {
        info!(
            "Crawl finished: {} areas, {} pages, {} records written, {} listings skipped",
            self.areas.len(),
            self.pages_crawled(),
            self.records_written(),
            self.listings_skipped()
        );
        for report in self.failed_areas() {
            match &report.error {
                Some(e) => warn!("Area {} failed: {}", report.area, e),
                None => warn!("Area {} failed", report.area),
            }
        }
    }
}

/// Crawls every selected area in turn
#[derive(Debug)]
pub struct CrawlDriver<H, P> {
    ctx: CrawlContext<H, P>,
    query: SearchQuery,
    areas: Vec<SearchArea>,
    settings: CrawlSettings,
}

impl CrawlDriver<ReqwestFetcher, SleepPacer> {
    /// Builds a driver with the live HTTP client and real pacing
    pub fn from_config(config: &Config) -> Result<Self> {
        let ctx = CrawlContext {
            http: ReqwestFetcher::new()?,
            pacer: SleepPacer,
            headers: IdentityHeaders::from_config(&config.http),
            parser: ListingParser::new(&config.selectors, &config.http.base_url)?,
            retry: RetryPolicy::from_config(&config.crawler),
            results_url: config.http.base_url.clone(),
        };
        let areas = config.crawler.selected_areas()?;

        Ok(Self::new(
            ctx,
            config.search.clone(),
            areas,
            CrawlSettings::from_config(config),
        ))
    }
}

impl<H: HttpFetch, P: Pacer> CrawlDriver<H, P> {
    /// Creates a driver; the unscoped area is dropped from `areas`
    pub fn new(
        ctx: CrawlContext<H, P>,
        query: SearchQuery,
        areas: Vec<SearchArea>,
        settings: CrawlSettings,
    ) -> Self {
        let areas = areas.into_iter().filter(|a| !a.is_unscoped()).collect();
        Self {
            ctx,
            query,
            areas,
            settings,
        }
    }

    pub fn areas(&self) -> &[SearchArea] {
        &self.areas
    }

    pub fn context(&self) -> &CrawlContext<H, P> {
        &self.ctx
    }

    /// Runs one crawl per area, writing every committed page to `sink`
    pub async fn run<S: RecordSink>(&self, sink: &mut S) -> RunSummary {
        info!(
            "Crawling '{}' across {} areas",
            self.query.text,
            self.areas.len()
        );
        let mut summary = RunSummary::default();

        for area in &self.areas {
            let query = self.query.for_area(area.code);
            let mut controller = PaginationController::new(
                &self.ctx,
                &mut *sink,
                *area,
                query,
                self.settings.fresh_state(),
            );
            let report = controller.run().await;

            if let Some(e) = &report.error {
                error!("Unknown error: area {} aborted: {}", area, e);
            }
            summary.areas.push(report);
        }

        summary.log();
        summary
    }
}
