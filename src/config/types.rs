use crate::model::{SearchArea, SearchQuery};
use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Main configuration structure for Vacancy-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Query defaults shared by every area
    pub search: SearchQuery,
    pub http: HttpConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// Request settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Results endpoint
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Delay after every request (milliseconds)
    #[serde(rename = "pacing-ms")]
    pub pacing_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User agents rotated across requests
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
}

/// Crawl loop settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum pages per area
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// Attempts for one results page before the area fails
    #[serde(rename = "retry-attempts")]
    pub retry_attempts: u32,

    /// Fixed delay between attempts (seconds)
    #[serde(rename = "retry-delay-secs")]
    pub retry_delay_secs: u64,

    /// Restrict the crawl to these area names; empty means every area
    pub areas: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV dataset
    #[serde(rename = "dataset-path")]
    pub dataset_path: String,

    /// Recreate the dataset with a header instead of appending
    pub overwrite: bool,
}

/// CSS selectors for every lookup on results and detail pages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One listing fragment on a results page
    pub listing: String,
    /// Title link inside a fragment
    pub title: String,
    /// Company block, primary layout
    pub company: String,
    /// Employer link whose parent is the company block, fallback layout
    #[serde(rename = "company-fallback")]
    pub company_fallback: String,
    pub location: String,
    pub experience: String,
    #[serde(rename = "remote-badge")]
    pub remote_badge: String,
    pub salary: String,
    /// Employment mode on the detail page
    pub deployment: String,
    /// Full description on the detail page
    pub description: String,
    /// Publish date fragment on the detail page
    pub published: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hh.ru/search/vacancy".to_string(),
            pacing_ms: 300,
            timeout_secs: 30,
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15".to_string(),
                "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0".to_string(),
            ],
            headers: BTreeMap::new(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: Some(200),
            retry_attempts: 5,
            retry_delay_secs: 10,
            areas: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dataset_path: "dataset.csv".to_string(),
            overwrite: false,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing: "div.serp-item.serp-item_link".to_string(),
            title: "h3[data-qa='bloko-header-3'] a".to_string(),
            company: "div.vacancy-serp-item__meta-info-company".to_string(),
            company_fallback: "a[data-qa='vacancy-serp__vacancy-employer']".to_string(),
            location: "div[data-qa='vacancy-serp__vacancy-address']".to_string(),
            experience: "div[data-qa='vacancy-serp__vacancy-work-experience']".to_string(),
            remote_badge: "span[data-qa='vacancy-label-remote-work-schedule']".to_string(),
            salary: "span[data-qa='vacancy-serp__vacancy-compensation']".to_string(),
            deployment: "p[data-qa='vacancy-view-employment-mode']".to_string(),
            description: "div[data-qa='vacancy-description']".to_string(),
            published: "p.vacancy-creation-time-redesigned span".to_string(),
        }
    }
}

impl SelectorConfig {
    /// All selectors with their names, for validation and compilation
    pub fn entries(&self) -> [(&'static str, &str); 11] {
        [
            ("listing", self.listing.as_str()),
            ("title", self.title.as_str()),
            ("company", self.company.as_str()),
            ("company-fallback", self.company_fallback.as_str()),
            ("location", self.location.as_str()),
            ("experience", self.experience.as_str()),
            ("remote-badge", self.remote_badge.as_str()),
            ("salary", self.salary.as_str()),
            ("deployment", self.deployment.as_str()),
            ("description", self.description.as_str()),
            ("published", self.published.as_str()),
        ]
    }
}

impl HttpConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CrawlerConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Resolves the areas to crawl, in table order when no filter is set
    ///
    /// The unscoped sentinel is never returned, even when named in the filter.
    pub fn selected_areas(&self) -> ConfigResult<Vec<SearchArea>> {
        if self.areas.is_empty() {
            return Ok(SearchArea::crawlable().collect());
        }

        let mut selected = Vec::with_capacity(self.areas.len());
        for name in &self.areas {
            let area = SearchArea::find(name).ok_or_else(|| ConfigError::UnknownArea(name.clone()))?;
            if area.is_unscoped() {
                tracing::warn!("Skipping unscoped area '{}' from the area filter", area.name);
                continue;
            }
            if !selected.contains(&area) {
                selected.push(area);
            }
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.pacing(), Duration::from_millis(300));
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.crawler.max_pages, Some(200));
        assert_eq!(config.crawler.retry_attempts, 5);
        assert_eq!(config.crawler.retry_delay(), Duration::from_secs(10));
        assert_eq!(config.output.dataset_path, "dataset.csv");
        assert!(!config.output.overwrite);
        assert_eq!(config.search.text, "Python Developer");
    }

    #[test]
    fn test_selected_areas_default_is_every_scoped_area() {
        let areas = CrawlerConfig::default().selected_areas().unwrap();
        assert_eq!(areas.len(), SearchArea::ALL.len() - 1);
        assert!(areas.iter().all(|a| !a.is_unscoped()));
    }

    #[test]
    fn test_selected_areas_filter() {
        let config = CrawlerConfig {
            areas: vec![
                "Novosibirsk".to_string(),
                "Russia".to_string(),
                "moscow".to_string(),
                "Novosibirsk".to_string(),
            ],
            ..CrawlerConfig::default()
        };
        let codes: Vec<u32> = config.selected_areas().unwrap().iter().map(|a| a.code).collect();
        assert_eq!(codes, vec![4, 1]);
    }

    #[test]
    fn test_selected_areas_unknown() {
        let config = CrawlerConfig {
            areas: vec!["Atlantis".to_string()],
            ..CrawlerConfig::default()
        };
        assert!(matches!(
            config.selected_areas(),
            Err(ConfigError::UnknownArea(name)) if name == "Atlantis"
        ));
    }
}
