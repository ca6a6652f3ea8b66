//! Listing parser for results and detail pages
//!
//! This module turns one results page into listing records:
//! - Selecting every listing fragment on the page
//! - Extracting the summary fields of each fragment
//! - Fetching and parsing the detail page of each listing
//!
//! Parsing is split in two synchronous halves around the asynchronous detail
//! fetch, so no parsed document is ever held across an await point.

use crate::config::SelectorConfig;
use crate::extract::{parse_date, parse_experience, parse_salary, ParseError};
use crate::model::{ExperienceRange, ListingRecord, SalaryRange};
use crate::{HarvestError, Result};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Characters of fragment text kept for anomaly logs
const FRAGMENT_PREVIEW_CHARS: usize = 200;

/// Selectors compiled once per run
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    listing: Selector,
    title: Selector,
    company: Selector,
    company_fallback: Selector,
    location: Selector,
    experience: Selector,
    remote_badge: Selector,
    salary: Selector,
    deployment: Selector,
    description: Selector,
    published: Selector,
    link: Selector,
}

impl CompiledSelectors {
    /// Compiles every configured selector
    ///
    /// # Returns
    ///
    /// * `Ok(CompiledSelectors)` - All selectors compiled
    /// * `Err(HarvestError::Selector)` - The first selector that failed to compile
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        let parse = |selector: &str| {
            Selector::parse(selector)
                .map_err(|e| HarvestError::selector(selector, format!("{:?}", e)))
        };

        Ok(Self {
            listing: parse(&config.listing)?,
            title: parse(&config.title)?,
            company: parse(&config.company)?,
            company_fallback: parse(&config.company_fallback)?,
            location: parse(&config.location)?,
            experience: parse(&config.experience)?,
            remote_badge: parse(&config.remote_badge)?,
            salary: parse(&config.salary)?,
            deployment: parse(&config.deployment)?,
            description: parse(&config.description)?,
            published: parse(&config.published)?,
            link: parse("a[href]")?,
        })
    }
}

/// Fields read from one listing fragment on a results page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSummary {
    pub title: String,
    /// Absolute URL of the detail page
    pub title_href: String,
    pub company: String,
    pub company_href: String,
    pub location: String,
    pub experience: ExperienceRange,
    pub is_remote: bool,
    pub salary: Option<SalaryRange>,
}

impl ListingSummary {
    /// Completes the summary with its detail page fields
    pub fn into_record(self, detail: DetailFields) -> ListingRecord {
        ListingRecord {
            title: self.title,
            title_href: self.title_href,
            company: self.company,
            company_href: self.company_href,
            location: self.location,
            experience: self.experience,
            is_remote: self.is_remote,
            deployment: detail.deployment,
            salary: self.salary,
            published: detail.published,
            description: detail.description,
        }
    }
}

/// Fields read from a detail page; each is absent when its element is missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub deployment: Option<String>,
    pub description: Option<String>,
    pub published: Option<NaiveDate>,
}

/// A listing skipped because a required element was missing or unreadable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unusual rendering on page {page}: {field} {reason}")]
pub struct MalformedListing {
    /// Zero-based results page index
    pub page: u32,
    /// Field that could not be read
    pub field: &'static str,
    pub reason: String,
    /// Leading text of the offending fragment
    pub fragment: String,
}

/// Everything one results page produced, committed to the sink as a unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBatch {
    pub page: u32,
    /// Records in page order
    pub records: Vec<ListingRecord>,
    pub skipped: Vec<MalformedListing>,
}

/// Where detail pages come from
#[allow(async_fn_in_trait)]
pub trait DetailSource {
    /// Returns the body of the detail page at `url`, whatever its status
    async fn fetch_detail(&self, url: &str) -> Result<String>;
}

/// Parser for results pages and their detail pages
#[derive(Debug, Clone)]
pub struct ListingParser {
    selectors: CompiledSelectors,
    base_url: Url,
}

impl ListingParser {
    /// Creates a parser resolving relative links against `base_url`
    pub fn new(selectors: &SelectorConfig, base_url: &str) -> Result<Self> {
        Ok(Self {
            selectors: CompiledSelectors::compile(selectors)?,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Parses one results page, fetching the detail page of every valid listing
    ///
    /// Malformed listings are skipped and reported in the batch. A failed detail
    /// fetch aborts the whole page with `HarvestError::Unrecoverable`, so the
    /// caller can retry the page without having committed any of it.
    pub async fn parse_page<D: DetailSource>(
        &self,
        html: &str,
        page: u32,
        details: &D,
    ) -> Result<PageBatch> {
        let (summaries, mut skipped) = self.scan_results(html, page);
        let mut records = Vec::with_capacity(summaries.len());

        for summary in summaries {
            let body = details
                .fetch_detail(&summary.title_href)
                .await
                .map_err(|e| HarvestError::Unrecoverable {
                    page,
                    message: format!("detail page {} failed: {}", summary.title_href, e),
                })?;

            match self.parse_detail(&body) {
                Ok(detail) => {
                    let record = summary.into_record(detail);
                    tracing::debug!(
                        page,
                        title = %record.title,
                        company = %record.company,
                        location = %record.location,
                        "Parsed listing"
                    );
                    records.push(record);
                }
                Err(e) => {
                    let malformed = MalformedListing {
                        page,
                        field: "published",
                        reason: e.to_string(),
                        fragment: summary.title_href,
                    };
                    log_malformed(&malformed);
                    skipped.push(malformed);
                }
            }
        }

        Ok(PageBatch {
            page,
            records,
            skipped,
        })
    }

    /// Extracts the summary of every listing fragment on a results page
    pub fn scan_results(
        &self,
        html: &str,
        page: u32,
    ) -> (Vec<ListingSummary>, Vec<MalformedListing>) {
        let document = Html::parse_document(html);
        let mut summaries = Vec::new();
        let mut skipped = Vec::new();

        for fragment in document.select(&self.selectors.listing) {
            match self.parse_summary(fragment, page) {
                Ok(summary) => summaries.push(summary),
                Err(malformed) => {
                    log_malformed(&malformed);
                    skipped.push(malformed);
                }
            }
        }

        (summaries, skipped)
    }

    /// Extracts the detail fields of a listing
    ///
    /// Only an unreadable publish date is an error; missing elements are `None`.
    pub fn parse_detail(&self, html: &str) -> std::result::Result<DetailFields, ParseError> {
        let document = Html::parse_document(html);
        let s = &self.selectors;

        let deployment = document
            .select(&s.deployment)
            .next()
            .map(clean_text)
            .filter(|text| !text.is_empty());
        let description = document
            .select(&s.description)
            .next()
            .map(block_text)
            .filter(|text| !text.is_empty());
        let published = match document
            .select(&s.published)
            .next()
            .map(raw_text)
            .filter(|text| !text.trim().is_empty())
        {
            Some(text) => Some(parse_date(&text)?),
            None => None,
        };

        Ok(DetailFields {
            deployment,
            description,
            published,
        })
    }

    fn parse_summary(
        &self,
        fragment: ElementRef<'_>,
        page: u32,
    ) -> std::result::Result<ListingSummary, MalformedListing> {
        let s = &self.selectors;
        let malformed = |field: &'static str, reason: String| MalformedListing {
            page,
            field,
            reason,
            fragment: preview(fragment),
        };
        let missing = |field: &'static str| malformed(field, "element not found".to_string());

        let title_el = fragment
            .select(&s.title)
            .next()
            .ok_or_else(|| missing("title"))?;
        let href = title_el
            .value()
            .attr("href")
            .ok_or_else(|| missing("title href"))?;
        let title_href = self
            .resolve(href)
            .ok_or_else(|| malformed("title href", format!("'{}' is not a web link", href)))?;

        // Older layouts only mark the employer link; its parent is the company block
        let company_el = fragment
            .select(&s.company)
            .next()
            .or_else(|| {
                fragment
                    .select(&s.company_fallback)
                    .next()
                    .and_then(|link| link.parent())
                    .and_then(ElementRef::wrap)
            })
            .ok_or_else(|| missing("company"))?;
        let company = clean_text(company_el);
        let company_href = company_el
            .select(&s.link)
            .next()
            .and_then(|link| link.value().attr("href"))
            .and_then(|href| self.resolve(href))
            .unwrap_or_else(|| company.clone());

        let location = fragment
            .select(&s.location)
            .next()
            .map(clean_text)
            .ok_or_else(|| missing("location"))?;

        let experience_el = fragment
            .select(&s.experience)
            .next()
            .ok_or_else(|| missing("experience"))?;
        let experience = parse_experience(&raw_text(experience_el))
            .map_err(|e| malformed("experience", e.to_string()))?;

        let is_remote = fragment.select(&s.remote_badge).next().is_some();

        let salary = match fragment
            .select(&s.salary)
            .next()
            .map(raw_text)
            .filter(|text| !text.trim().is_empty())
        {
            Some(text) => {
                Some(parse_salary(&text).map_err(|e| malformed("salary", e.to_string()))?)
            }
            None => None,
        };

        Ok(ListingSummary {
            title: clean_text(title_el),
            title_href,
            company,
            company_href,
            location,
            experience,
            is_remote,
            salary,
        })
    }

    /// Resolves an href against the results URL, keeping only web links
    fn resolve(&self, href: &str) -> Option<String> {
        let url = self.base_url.join(href.trim()).ok()?;
        match url.scheme() {
            "http" | "https" => Some(url.into()),
            _ => None,
        }
    }
}

fn log_malformed(malformed: &MalformedListing) {
    tracing::warn!(
        page = malformed.page,
        field = malformed.field,
        fragment = %malformed.fragment,
        "Unusual rendering, listing skipped: {}",
        malformed.reason
    );
}

/// Concatenated text of an element
fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of an element with whitespace runs collapsed
fn clean_text(element: ElementRef<'_>) -> String {
    raw_text(element).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of a block element, text nodes separated by a single space
fn block_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn preview(fragment: ElementRef<'_>) -> String {
    clean_text(fragment)
        .chars()
        .take(FRAGMENT_PREVIEW_CHARS)
        .collect()
}
