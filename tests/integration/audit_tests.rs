//! Integration tests for discovery and auditing
//!
//! These tests use wiremock to create mock HTTP servers and run discovery,
//! classification and report export end-to-end.

use indexscope::classify::{IssueCategory, PageStatus};
use indexscope::config::{Config, OutputConfig};
use indexscope::crawler::{run_audit, Coordinator};
use indexscope::output::read_report_rows;
use indexscope::remediation::{load_report, recommend_redirects, write_rules};
use indexscope::url::Origin;
use indexscope::AuditError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration auditing the given base URL
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.domain = base_url.to_string();
    config.crawler.politeness_delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.crawler.probe_timeout_secs = 2;
    config
}

fn coordinator(config: Config) -> Coordinator {
    Coordinator::new(config)
        .expect("Failed to create coordinator")
        .without_delay()
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "application/xml")
}

fn words(n: usize) -> String {
    vec!["lorem"; n].join(" ")
}

#[tokio::test]
async fn test_empty_sitemap_crawl_finds_internal_links_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // No sitemap mocks: every candidate answers 404
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><head><title>Home</title></head><body>
            <a href="/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="https://external.example.org/elsewhere">Elsewhere</a>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(create_test_config(&base_url));
    let outcome = coordinator.discover().await;

    assert_eq!(
        outcome.urls,
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );
    assert!(outcome.sitemap_url.is_none());
    assert!(!outcome.urls.iter().any(|u| u.contains("external.example.org")));
}

#[tokio::test]
async fn test_first_usable_sitemap_wins() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(xml(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>{base}/from-sitemap</loc></url>
              <url><loc>https://other-site.example.com/page</loc></url>
            </urlset>"#,
            base = base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wp-sitemap.xml"))
        .respond_with(xml(&format!(
            "<urlset><url><loc>{}/never-seen</loc></url></urlset>",
            base_url
        )))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(create_test_config(&base_url));
    let outcome = coordinator.discover().await;

    assert_eq!(outcome.urls[0], format!("{}/from-sitemap", base_url));
    assert_eq!(
        outcome.sitemap_url,
        Some(format!("{}/sitemap_index.xml", base_url))
    );
    assert!(!outcome.urls.iter().any(|u| u.contains("never-seen")));
    assert!(!outcome.urls.iter().any(|u| u.contains("other-site")));
}

#[tokio::test]
async fn test_malformed_sitemap_falls_through() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(xml(&format!(
            "<urlset><url><loc>{}/broken</loc></url>",
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(xml(&format!(
            "<urlset><url><loc>{}/good</loc></url></urlset>",
            base_url
        )))
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(create_test_config(&base_url));
    let outcome = coordinator.discover().await;

    assert!(outcome.urls.contains(&format!("{}/good", base_url)));
    assert!(!outcome.urls.contains(&format!("{}/broken", base_url)));
}

#[tokio::test]
async fn test_html_fragment_sitemap_falls_through() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(html("<h1>Not Found</h1><p>Try the homepage</p>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(xml(&format!(
            "<urlset><url><loc>{}/from-index</loc></url></urlset>",
            base_url
        )))
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(create_test_config(&base_url));
    let outcome = coordinator.discover().await;

    assert_eq!(
        outcome.sitemap_url,
        Some(format!("{}/sitemap_index.xml", base_url))
    );
    assert!(outcome.urls.contains(&format!("{}/from-index", base_url)));
}

#[tokio::test]
async fn test_frontier_cap_is_enforced() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (0..20)
        .map(|i| format!(r#"<a href="/listing-{}">Listing {}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!("<html><body>{}</body></html>", links)))
        .mount(&mock_server)
        .await;

    // Probes would add more if the cap were not applied
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.crawler.max_urls = 5;

    let mut coordinator = coordinator(config);
    let outcome = coordinator.discover().await;

    assert_eq!(outcome.urls.len(), 5);
    assert_eq!(outcome.urls[0], format!("{}/", base_url));
}

#[tokio::test]
async fn test_crawl_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/level1">1</a>"#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/level1"))
        .respond_with(html(r#"<a href="/level2">2</a>"#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html(r#"<a href="/level3">3</a>"#))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.crawler.max_depth = 1;

    let mut coordinator = coordinator(config);
    let outcome = coordinator.discover().await;

    // level2 is discovered from a depth-1 page but never fetched
    assert!(outcome.urls.contains(&format!("{}/level2", base_url)));
    assert!(!outcome.urls.contains(&format!("{}/level3", base_url)));
    assert_eq!(outcome.crawled_pages, 2);
}

#[tokio::test]
async fn test_links_on_max_depth_page_are_still_added() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/Accommodation/Beach-House">Stay</a>"#))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.crawler.max_depth = 0;

    let mut coordinator = coordinator(config);
    let outcome = coordinator.discover().await;

    assert!(outcome
        .urls
        .contains(&format!("{}/Accommodation/Beach-House", base_url)));
}

#[tokio::test]
async fn test_pattern_probe_follows_redirects() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/rooms/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/about/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/about-us/"))
        .mount(&mock_server)
        .await;
    Mock::given(path("/about-us/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/blog/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(create_test_config(&base_url));
    let outcome = coordinator.discover().await;

    assert!(outcome.urls.contains(&format!("{}/rooms/", base_url)));
    assert!(outcome.urls.contains(&format!("{}/about/", base_url)));
    assert!(!outcome.urls.contains(&format!("{}/about-us/", base_url)));
    assert!(!outcome.urls.contains(&format!("{}/blog/", base_url)));
}

#[tokio::test]
async fn test_audit_does_not_follow_redirects() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("<html></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(create_test_config(&base_url));
    let report = coordinator.audit_urls(&[format!("{}/old", base_url)]).await;

    let record = &report.records()[0];
    assert_eq!(record.status, PageStatus::Code(301));
    assert_eq!(record.issues, vec!["301 Redirect"]);
    assert_eq!(record.primary_issue, "Page with redirect");
    assert_eq!(record.redirect_to.as_deref(), Some("/new"));
}

#[tokio::test]
async fn test_thin_page_scenario() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let url = format!("{}/thin", base_url);

    Mock::given(method("GET"))
        .and(path("/thin"))
        .respond_with(html(format!(
            r#"<html><head><title></title><link rel="canonical" href="{}"></head>
            <body><p>{}</p></body></html>"#,
            url,
            words(50)
        )))
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(create_test_config(&base_url));
    let report = coordinator.audit_urls(&[url.clone()]).await;

    let record = &report.records()[0];
    assert_eq!(
        record.issues,
        vec![
            "Possible soft 404 (thin content)",
            "Missing title tag",
            "Missing meta description",
        ]
    );
    assert_eq!(record.primary_issue, "Soft 404");
    assert_eq!(record.word_count, Some(50));
    assert_eq!(report.tally().get(IssueCategory::Soft404), 1);
}

#[tokio::test]
async fn test_unreachable_page_becomes_error_record() {
    // Nothing listens on port 1
    let url = "http://127.0.0.1:1/".to_string();

    let mut coordinator = coordinator(create_test_config("http://127.0.0.1:1"));
    let report = coordinator.audit_urls(&[url]).await;

    let record = &report.records()[0];
    assert_eq!(record.status, PageStatus::Error);
    assert!(record.issues[0].starts_with("Could not fetch: "));
    assert_eq!(record.primary_issue, "No issues");
    assert_eq!(report.tally().total(), 0);
}

#[tokio::test]
async fn test_full_audit_writes_reports() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(xml(&format!(
            "<urlset><url><loc>{base}/</loc></url><url><loc>{base}/old-property-123</loc></url></urlset>",
            base = base_url
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><head>
            <title>Holiday rentals on the coast</title>
            <meta name="description" content="Beach houses, cabins and rooms">
            <link rel="canonical" href="{}/">
            </head><body><p>{}</p></body></html>"#,
            base_url,
            words(600)
        )))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(&base_url);
    config.output = OutputConfig {
        report_path: dir.path().join("audit_report.csv").display().to_string(),
        summary_path: dir.path().join("issue_summary.csv").display().to_string(),
        markdown_path: dir.path().join("audit_summary.md").display().to_string(),
        ..OutputConfig::default()
    };
    let output = config.output.clone();

    let summary = run_audit(config, None).await.expect("Audit failed");

    assert_eq!(summary.report.len(), 2);
    assert_eq!(summary.report.tally().get(IssueCategory::NotFound), 1);
    assert_eq!(summary.report.pages_with_issues(), 1);

    let rows = read_report_rows(std::path::Path::new(&output.report_path)).unwrap();
    assert_eq!(rows, summary.report.rows());
    assert_eq!(rows[0].primary_issue, "No issues");
    assert_eq!(rows[0].title, "Holiday rentals on the coast");
    assert_eq!(rows[1].status_code, "404");
    assert_eq!(rows[1].title, "Missing");

    let issue_summary = std::fs::read_to_string(&output.summary_path).unwrap();
    assert_eq!(issue_summary, "Issue Type,Count\nNot found (404),1\n");

    let markdown = std::fs::read_to_string(&output.markdown_path).unwrap();
    assert!(markdown.contains(&format!("- {}/old-property-123", base_url)));
}

#[tokio::test]
async fn test_redirect_rules_from_report() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = dir.path().join("audit_report.csv");
    std::fs::write(
        &report_path,
        "URL,Status Code,Primary Issue,All Issues,Word Count,Title,Meta Description,Canonical,Redirect To\n\
         https://example.com/,200,No issues,,600,Home page title here,Desc,https://example.com/,\n\
         https://example.com/old-property-123,404,Not found (404),404 Not Found,0,Missing,Missing,Missing,\n",
    )
    .unwrap();

    let origin = Origin::parse("example.com").unwrap();
    let rows = load_report(&report_path).unwrap();
    let rules = recommend_redirects(&rows, &origin);

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].target_url, "https://example.com/properties/");
    assert_eq!(
        rules[0].rule_text,
        "Redirect 301 /old-property-123 https://example.com/properties/"
    );

    let rules_path = dir.path().join("htaccess_rules.txt");
    write_rules(&rules_path, &rules).unwrap();
    let text = std::fs::read_to_string(&rules_path).unwrap();
    assert!(text.starts_with("# 404 Redirect Rules\n# Add these to your .htaccess file\n\n"));
    assert!(text.ends_with("Redirect 301 /old-property-123 https://example.com/properties/\n"));
}

#[test]
fn test_missing_report_is_reported_not_fatal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = load_report(&dir.path().join("audit_report.csv"));
    assert!(matches!(result, Err(AuditError::MissingInput { .. })));
}
