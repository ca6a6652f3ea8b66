use crate::config::HttpConfig;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fallback identification when no user agent is configured
const DEFAULT_USER_AGENT: &str = concat!("vacancy-harvest/", env!("CARGO_PKG_VERSION"));

/// Source of identification headers
///
/// Every call to [`IdentityHeaders::for_request`] builds a new header list with the
/// next user agent in rotation, so consecutive requests never share one header set.
#[derive(Debug)]
pub struct IdentityHeaders {
    user_agents: Vec<String>,
    static_headers: Vec<(String, String)>,
    next: AtomicUsize,
}

impl IdentityHeaders {
    /// Creates a header source
    ///
    /// A `User-Agent` entry among the static headers is ignored: the rotating
    /// user agent always wins.
    pub fn new(
        user_agents: Vec<String>,
        static_headers: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let static_headers = static_headers
            .into_iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case("user-agent"))
            .collect();

        Self {
            user_agents,
            static_headers,
            next: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self::new(
            config.user_agents.clone(),
            config
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        )
    }

    /// Returns the next user agent in round-robin order
    pub fn next_user_agent(&self) -> &str {
        if self.user_agents.is_empty() {
            return DEFAULT_USER_AGENT;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.user_agents.len();
        &self.user_agents[index]
    }

    /// Builds a fresh header list for one request
    pub fn for_request(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(self.static_headers.len() + 1);
        headers.push(("User-Agent".to_string(), self.next_user_agent().to_string()));
        headers.extend(self.static_headers.iter().cloned());
        headers
    }
}
