use crate::state::PaginationState;
use std::time::Duration;

/// Mutable progress of one area's crawl
///
/// Owned by the pagination controller and dropped when the area ends.
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// Zero-based index of the next page to fetch
    pub page: u32,

    /// Stop before fetching this page index, if set
    pub max_pages: Option<u32>,

    /// Delay enforced after every fetch
    pub pacing: Duration,

    /// Per-request timeout
    pub timeout: Duration,

    /// Current state of the pagination loop
    pub status: PaginationState,
}

impl CrawlState {
    /// Creates a running state starting at page 0
    pub fn new(max_pages: Option<u32>, pacing: Duration, timeout: Duration) -> Self {
        Self {
            page: 0,
            max_pages,
            pacing,
            timeout,
            status: PaginationState::Running,
        }
    }

    /// Returns true if the page cap forbids fetching the current page
    pub fn cap_reached(&self) -> bool {
        self.max_pages.is_some_and(|max| self.page >= max)
    }

    /// Moves on to the next page
    pub fn advance(&mut self) {
        self.page += 1;
    }

    /// Enters a terminal state
    pub fn finish(&mut self, status: PaginationState) {
        debug_assert!(status.is_terminal());
        self.status = status;
    }
}
