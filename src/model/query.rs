use serde::Deserialize;

/// Query parameters for one results-page request
///
/// Everything except `area` and `page` is fixed for a driver invocation. The driver
/// substitutes `area` once per search area and the pagination controller rewrites
/// `page` before every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Free-text search query
    pub text: String,

    /// Area code, 0 means unscoped
    #[serde(skip)]
    pub area: u32,

    /// Whether result snippets are rendered
    #[serde(rename = "enable-snippets")]
    pub enable_snippets: bool,

    /// Listings per results page
    #[serde(rename = "items-on-page")]
    pub items_on_page: u32,

    /// Zero-based page index
    #[serde(skip)]
    pub page: u32,

    /// Recency filter in days, 0 means any time
    #[serde(rename = "search-period")]
    pub search_period: u32,

    /// Experience filter token understood by the site
    pub experience: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: "Python Developer".to_string(),
            area: 0,
            enable_snippets: false,
            items_on_page: 20,
            page: 0,
            search_period: 0,
            experience: "doesNotMatter".to_string(),
        }
    }
}

impl SearchQuery {
    /// Returns a copy scoped to the given area code, starting from page 0
    pub fn for_area(&self, area: u32) -> Self {
        Self {
            area,
            page: 0,
            ..self.clone()
        }
    }

    /// Renders the query as ordered `(name, value)` pairs
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("text".to_string(), self.text.clone()),
            ("area".to_string(), self.area.to_string()),
            ("enable_snippets".to_string(), self.enable_snippets.to_string()),
            ("items_on_page".to_string(), self.items_on_page.to_string()),
            ("page".to_string(), self.page.to_string()),
            ("search_period".to_string(), self.search_period.to_string()),
            ("experience".to_string(), self.experience.clone()),
        ]
    }
}
