//! Per-area pagination state machine
//!
//! # State Transitions
//!
//! ```text
//! Running --200--> parse page, commit batch, page += 1 --> Running
//! Running --404--> Exhausted
//! Running --page cap--> Capped
//! Running --other status / retries exhausted / sink failure--> Failed
//! ```

use crate::crawler::fetcher::{FetchRequest, FetchResponse, HttpFetch};
use crate::crawler::headers::IdentityHeaders;
use crate::crawler::pacing::Pacer;
use crate::crawler::parser::{DetailSource, ListingParser, PageBatch};
use crate::crawler::retry::RetryPolicy;
use crate::model::{SearchArea, SearchQuery};
use crate::state::{CrawlState, PaginationState};
use crate::storage::RecordSink;
use crate::{HarvestError, Result};
use std::time::Duration;
use tracing::{debug, error, info};

/// Collaborators shared by every area of a run
#[derive(Debug)]
pub struct CrawlContext<H, P> {
    pub http: H,
    pub pacer: P,
    pub headers: IdentityHeaders,
    pub parser: ListingParser,
    pub retry: RetryPolicy,
    /// Results endpoint
    pub results_url: String,
}

impl<H: HttpFetch, P: Pacer> CrawlContext<H, P> {
    /// Sends one GET with fresh identification headers, then waits out the pacing interval
    ///
    /// The pause happens whatever the outcome of the request.
    pub async fn paced_get(
        &self,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
        pacing: Duration,
    ) -> Result<FetchResponse> {
        let headers = self.headers.for_request();
        let request = FetchRequest {
            url,
            query,
            headers: &headers,
            timeout,
        };

        let result = self.http.get(&request).await;
        self.pacer.pause(pacing).await;
        result
    }
}

/// Result of one page step that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The page was fetched and parsed; its records are ready to commit
    Parsed(PageBatch),
    /// The results endpoint answered 404
    EndOfResults,
    /// Any status other than 200 or 404
    UnexpectedStatus(u16),
}

/// Outcome of one area's crawl
#[derive(Debug)]
pub struct AreaReport {
    pub area: SearchArea,
    pub state: PaginationState,
    /// Pages fetched and committed
    pub pages_crawled: u32,
    pub records_written: usize,
    pub listings_skipped: usize,
    /// Why the area failed, when it did
    pub error: Option<HarvestError>,
}

impl AreaReport {
    fn new(area: SearchArea) -> Self {
        Self {
            area,
            state: PaginationState::Running,
            pages_crawled: 0,
            records_written: 0,
            listings_skipped: 0,
            error: None,
        }
    }
}

/// Detail fetches for one results page, sharing its query and limits
struct DetailFetcher<'a, H, P> {
    ctx: &'a CrawlContext<H, P>,
    query: &'a [(String, String)],
    timeout: Duration,
    pacing: Duration,
}

impl<H: HttpFetch, P: Pacer> DetailSource for DetailFetcher<'_, H, P> {
    async fn fetch_detail(&self, url: &str) -> Result<String> {
        let response = self
            .ctx
            .paced_get(url, self.query, self.timeout, self.pacing)
            .await?;
        if response.status != 200 {
            debug!("Detail page {} answered {}", url, response.status);
        }
        Ok(response.body)
    }
}

/// Drives the results pages of one area to a terminal state
pub struct PaginationController<'a, H, P, S> {
    ctx: &'a CrawlContext<H, P>,
    sink: &'a mut S,
    area: SearchArea,
    query: SearchQuery,
    state: CrawlState,
}

impl<'a, H: HttpFetch, P: Pacer, S: RecordSink> PaginationController<'a, H, P, S> {
    /// Creates a controller for `area`
    ///
    /// `query` should already carry the area code.
    pub fn new(
        ctx: &'a CrawlContext<H, P>,
        sink: &'a mut S,
        area: SearchArea,
        query: SearchQuery,
        state: CrawlState,
    ) -> Self {
        Self {
            ctx,
            sink,
            area,
            query,
            state,
        }
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Runs the pagination loop until a terminal state
    pub async fn run(&mut self) -> AreaReport {
        info!("Start crawling, area - {}", self.area);
        let mut report = AreaReport::new(self.area);

        while !self.state.status.is_terminal() {
            if self.state.cap_reached() {
                info!(
                    "Page cap reached for area {}, total - {}",
                    self.area, self.state.page
                );
                self.state.finish(PaginationState::Capped);
                break;
            }

            match self.step().await {
                Ok(StepOutcome::Parsed(batch)) => {
                    report.listings_skipped += batch.skipped.len();
                    if let Err(e) = self.sink.append_all(&batch.records) {
                        error!(
                            "Critical: could not store page {} of area {}: {}",
                            batch.page, self.area, e
                        );
                        report.error = Some(e.into());
                        self.state.finish(PaginationState::Failed);
                        break;
                    }
                    report.records_written += batch.records.len();
                    debug!(
                        "Page {} of area {} committed, {} records",
                        batch.page,
                        self.area,
                        batch.records.len()
                    );
                    self.state.advance();
                }
                Ok(StepOutcome::EndOfResults) => {
                    info!("No more pages exist, total - {}", self.state.page);
                    self.state.finish(PaginationState::Exhausted);
                }
                Ok(StepOutcome::UnexpectedStatus(status)) => {
                    error!(
                        "Critical: results page {} of area {} answered {}",
                        self.state.page, self.area, status
                    );
                    report.error = Some(HarvestError::UnexpectedStatus {
                        status,
                        url: self.ctx.results_url.clone(),
                    });
                    self.state.finish(PaginationState::Failed);
                }
                Err(e) => {
                    error!(
                        "Critical: results page {} of area {} failed: {}",
                        self.state.page, self.area, e
                    );
                    report.error = Some(e);
                    self.state.finish(PaginationState::Failed);
                }
            }
        }

        report.state = self.state.status;
        report.pages_crawled = self.state.page;
        info!(
            "The end of crawling area {}: {} after {} pages",
            self.area, report.state, report.pages_crawled
        );
        report
    }

    /// Fetches and parses the current page, retrying transient failures
    ///
    /// Nothing is written to the sink here, so a retried page never produces
    /// duplicate rows.
    pub async fn step(&mut self) -> Result<StepOutcome> {
        self.query.page = self.state.page;
        let this: &Self = self;
        this.ctx
            .retry
            .run(move |attempt| this.fetch_page(attempt))
            .await
    }

    async fn fetch_page(&self, attempt: u32) -> Result<StepOutcome> {
        let pairs = self.query.to_pairs();
        debug!(
            "Fetching page {} of area {} (attempt {})",
            self.state.page, self.area, attempt
        );

        let response = self
            .ctx
            .paced_get(
                &self.ctx.results_url,
                &pairs,
                self.state.timeout,
                self.state.pacing,
            )
            .await?;

        match response.status {
            200 => {
                let details = DetailFetcher {
                    ctx: self.ctx,
                    query: &pairs,
                    timeout: self.state.timeout,
                    pacing: self.state.pacing,
                };
                let batch = self
                    .ctx
                    .parser
                    .parse_page(&response.body, self.state.page, &details)
                    .await?;
                Ok(StepOutcome::Parsed(batch))
            }
            404 => Ok(StepOutcome::EndOfResults),
            other => Ok(StepOutcome::UnexpectedStatus(other)),
        }
    }
}
