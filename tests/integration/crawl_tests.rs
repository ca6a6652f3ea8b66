//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from results pages to the CSV dataset.

use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use vacancy_harvest::config::Config;
use vacancy_harvest::storage::CsvSink;
use vacancy_harvest::{CrawlDriver, HarvestError, PaginationState};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, areas: &[&str], dataset: &Path, overwrite: bool) -> Config {
    let mut config = Config::default();
    config.search.text = "Rust Developer".to_string();
    config.http.base_url = format!("{}/search/vacancy", server.uri());
    config.http.pacing_ms = 0; // No pacing delay for testing
    config.http.timeout_secs = 1;
    config.crawler.retry_attempts = 3;
    config.crawler.retry_delay_secs = 0;
    config.crawler.areas = areas.iter().map(|a| a.to_string()).collect();
    config.output.dataset_path = dataset.to_string_lossy().into_owned();
    config.output.overwrite = overwrite;
    config
}

/// One listing fragment; `location: None` renders a malformed listing
fn listing(id: u32, title: &str, location: Option<&str>) -> String {
    let location = location
        .map(|l| format!(r#"<div data-qa="vacancy-serp__vacancy-address">{}</div>"#, l))
        .unwrap_or_default();
    format!(
        r#"<div class="serp-item serp-item_link">
             <h3 data-qa="bloko-header-3"><a href="/vacancy/{id}">{title}</a></h3>
             <div class="vacancy-serp-item__meta-info-company"><a href="/employer/{id}">Employer {id}</a></div>
             {location}
             <div data-qa="vacancy-serp__vacancy-work-experience">1–3 года</div>
             <span data-qa="vacancy-serp__vacancy-compensation">от 200 000 ₽ на руки</span>
           </div>"#
    )
}

fn results_page(listings: &[String]) -> String {
    format!(
        "<html><head><title>Results</title></head><body>{}</body></html>",
        listings.concat()
    )
}

fn detail_page(day: u32) -> String {
    format!(
        r#"<html><body>
             <p data-qa="vacancy-view-employment-mode">Полная занятость, полный день</p>
             <div data-qa="vacancy-description"><p>Build crawlers.</p></div>
             <p class="vacancy-creation-time-redesigned">Вакансия опубликована <span>{day} марта 2024</span></p>
           </body></html>"#
    )
}

/// Mounts a results page for `area`/`page`
async fn mount_results(server: &MockServer, area: &str, page: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search/vacancy"))
        .and(query_param("area", area))
        .and(query_param("page", page))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Publish day of a listing's detail page, always a valid day of March
fn publish_day(id: u32) -> u32 {
    (id.max(1) - 1) % 28 + 1
}

/// Mounts a detail page for every listing id in `ids`
async fn mount_details(server: &MockServer, ids: &[u32]) {
    for id in ids {
        Mock::given(method("GET"))
            .and(path(format!("/vacancy/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(publish_day(*id))))
            .mount(server)
            .await;
    }
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open dataset");
    reader
        .records()
        .map(|r| r.expect("Bad CSV row").iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_two_pages_with_malformed_listing() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("dataset.csv");

    // Page 0: three listings, the second one has no location
    mount_results(
        &mock_server,
        "1",
        "0",
        ResponseTemplate::new(200).set_body_string(results_page(&[
            listing(1, "Alpha", Some("Москва")),
            listing(2, "Broken", None),
            listing(3, "Gamma", Some("Москва")),
        ])),
    )
    .await;

    // Page 1: two listings
    mount_results(
        &mock_server,
        "1",
        "1",
        ResponseTemplate::new(200).set_body_string(results_page(&[
            listing(4, "Delta", Some("Зеленоград")),
            listing(5, "Epsilon", Some("Москва")),
        ])),
    )
    .await;

    // Page 2: no more results
    Mock::given(method("GET"))
        .and(path("/search/vacancy"))
        .and(query_param("page", "2"))
        .and(query_param("text", "Rust Developer"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_details(&mock_server, &[1, 3, 4, 5]).await;

    let config = create_test_config(&mock_server, &["Moscow"], &dataset, true);
    let driver = CrawlDriver::from_config(&config).expect("Failed to create driver");
    let mut sink = CsvSink::bootstrap(&dataset, true).expect("Failed to create dataset");

    let summary = driver.run(&mut sink).await;

    assert_eq!(summary.areas.len(), 1);
    let report = &summary.areas[0];
    assert_eq!(report.state, PaginationState::Exhausted);
    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.records_written, 4);
    assert_eq!(report.listings_skipped, 1);
    drop(sink);

    let rows = read_rows(&dataset);
    assert_eq!(rows.len(), 5, "header plus four records");
    assert_eq!(
        rows[0].join(","),
        "title,title_href,company,company_href,location,min_exp,max_exp,is_remote,\
         deployment,min_salary,max_salary,currency,brutto,published,description"
    );

    let titles: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Gamma", "Delta", "Epsilon"]);

    let alpha = &rows[1];
    assert_eq!(alpha[1], format!("{}/vacancy/1", mock_server.uri()));
    assert_eq!(alpha[2], "Employer 1");
    assert_eq!(alpha[3], format!("{}/employer/1", mock_server.uri()));
    assert_eq!(alpha[4], "Москва");
    assert_eq!(alpha[5], "1");
    assert_eq!(alpha[6], "3");
    assert_eq!(alpha[7], "false");
    assert_eq!(alpha[8], "Полная занятость, полный день");
    assert_eq!(alpha[9], "200000");
    assert_eq!(alpha[10], "");
    assert_eq!(alpha[11], "₽");
    assert_eq!(alpha[12], "false");
    assert_eq!(alpha[13], "2024-03-01");
    assert_eq!(alpha[14], "Build crawlers.");
}

#[tokio::test]
async fn test_failed_area_does_not_stop_other_areas() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("dataset.csv");

    // Moscow: one page, then the end
    mount_results(
        &mock_server,
        "1",
        "0",
        ResponseTemplate::new(200)
            .set_body_string(results_page(&[listing(10, "Moscow job", Some("Москва"))])),
    )
    .await;
    mount_results(&mock_server, "1", "1", ResponseTemplate::new(404)).await;

    // Saint Petersburg: server error on the first page, not retried
    Mock::given(method("GET"))
        .and(path("/search/vacancy"))
        .and(query_param("area", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Novosibirsk: one page, then the end
    mount_results(
        &mock_server,
        "4",
        "0",
        ResponseTemplate::new(200)
            .set_body_string(results_page(&[listing(40, "Novosibirsk job", Some("Новосибирск"))])),
    )
    .await;
    mount_results(&mock_server, "4", "1", ResponseTemplate::new(404)).await;

    mount_details(&mock_server, &[10, 40]).await;

    // Appending to an existing dataset keeps its rows and adds no header
    std::fs::write(&dataset, "previous,row\n").unwrap();

    let config = create_test_config(
        &mock_server,
        &["Moscow", "Saint Petersburg", "Novosibirsk"],
        &dataset,
        false,
    );
    let driver = CrawlDriver::from_config(&config).expect("Failed to create driver");
    let mut sink = CsvSink::bootstrap(&dataset, false).expect("Failed to open dataset");

    let summary = driver.run(&mut sink).await;
    drop(sink);

    let states: Vec<PaginationState> = summary.areas.iter().map(|a| a.state).collect();
    assert_eq!(
        states,
        vec![
            PaginationState::Exhausted,
            PaginationState::Failed,
            PaginationState::Exhausted
        ]
    );
    assert!(matches!(
        summary.areas[1].error,
        Some(HarvestError::UnexpectedStatus { status: 500, .. })
    ));
    assert_eq!(summary.records_written(), 2);
    assert_eq!(summary.listings_skipped(), 0);

    let content = std::fs::read_to_string(&dataset).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "previous,row");
    assert!(lines[1].starts_with("Moscow job,"));
    assert!(lines[2].starts_with("Novosibirsk job,"));
}

#[tokio::test]
async fn test_retried_page_is_not_duplicated() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("dataset.csv");

    mount_results(
        &mock_server,
        "1",
        "0",
        ResponseTemplate::new(200).set_body_string(results_page(&[
            listing(1, "Alpha", Some("Москва")),
            listing(2, "Beta", Some("Москва")),
        ])),
    )
    .await;
    mount_results(&mock_server, "1", "1", ResponseTemplate::new(404)).await;

    // The first request for Beta's detail page times out, later ones succeed
    Mock::given(method("GET"))
        .and(path("/vacancy/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail_page(2))
                .set_delay(Duration::from_secs(3)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_details(&mock_server, &[1, 2]).await;

    let config = create_test_config(&mock_server, &["Moscow"], &dataset, true);
    let driver = CrawlDriver::from_config(&config).expect("Failed to create driver");
    let mut sink = CsvSink::bootstrap(&dataset, true).expect("Failed to create dataset");

    let summary = driver.run(&mut sink).await;
    drop(sink);

    assert_eq!(summary.areas[0].state, PaginationState::Exhausted);
    assert_eq!(summary.records_written(), 2);

    let rows = read_rows(&dataset);
    let titles: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
}

#[tokio::test]
async fn test_page_cap_stops_crawl() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let dataset = temp_dir.path().join("dataset.csv");

    // Every page has a listing; only the cap ends the crawl
    Mock::given(method("GET"))
        .and(path("/search/vacancy"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(&[listing(1, "Forever", Some("Москва"))])),
        )
        .expect(3)
        .mount(&mock_server)
        .await;
    mount_details(&mock_server, &[1]).await;

    let mut config = create_test_config(&mock_server, &["Moscow"], &dataset, true);
    config.crawler.max_pages = Some(3);
    let driver = CrawlDriver::from_config(&config).expect("Failed to create driver");
    let mut sink = CsvSink::bootstrap(&dataset, true).expect("Failed to create dataset");

    let summary = driver.run(&mut sink).await;

    assert_eq!(summary.areas[0].state, PaginationState::Capped);
    assert_eq!(summary.areas[0].pages_crawled, 3);
    assert_eq!(sink.rows_written(), 3);
}
