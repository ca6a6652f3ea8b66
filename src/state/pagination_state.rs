/// Pagination state definitions for one area's crawl
use std::fmt;

/// Represents where the pagination loop of one area stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaginationState {
    // ===== Active States =====
    /// Pages are still being fetched
    Running,

    // ===== Terminal Success States =====
    /// The results endpoint answered 404: there are no more pages
    Exhausted,

    /// The configured page cap was reached
    Capped,

    // ===== Terminal Error States =====
    /// Unexpected status, exhausted retries or a sink failure
    Failed,
}

impl PaginationState {
    /// Returns true if the loop must stop
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Returns true if the loop ended without an error
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Capped)
    }

    /// Returns true if the area crawl failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Short lowercase label used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Exhausted => "exhausted",
            Self::Capped => "capped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!PaginationState::Running.is_terminal());
        assert!(PaginationState::Exhausted.is_terminal());
        assert!(PaginationState::Capped.is_terminal());
        assert!(PaginationState::Failed.is_terminal());
    }

    #[test]
    fn test_clean_and_error_are_disjoint() {
        for state in [
            PaginationState::Running,
            PaginationState::Exhausted,
            PaginationState::Capped,
            PaginationState::Failed,
        ] {
            assert!(!(state.is_clean() && state.is_error()));
        }
        assert!(PaginationState::Exhausted.is_clean());
        assert!(PaginationState::Failed.is_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(PaginationState::Exhausted.to_string(), "exhausted");
    }
}
