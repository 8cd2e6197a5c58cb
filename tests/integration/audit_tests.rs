//! Integration tests for the audit pipeline
//!
//! These tests use wiremock to serve a small page graph and run the full
//! crawl-and-audit cycle end-to-end over the HTTP browser backend.

use std::sync::Arc;

use jindan::audit::run_audit;
use jindan::browser::{Browser, HttpBrowser, Viewport};
use jindan::config::{
    AuditConfig, AuditOptions, CrawlerConfig, LoginConfig, OutputConfig, Platform, TargetConfig,
};
use jindan::{Crawler, UrlPolicy};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html lang=\"ko\"><head><title>{title}</title></head><body>{body}</body></html>"
    )
}

async fn mount(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

fn test_config(seed: &str, max_depth: u32, max_pages: usize, enable_seo: bool) -> AuditConfig {
    AuditConfig {
        target: TargetConfig {
            url: seed.to_string(),
            platform: Platform::Pc,
            inspector: "시스템".to_string(),
        },
        login: LoginConfig::default(),
        crawler: CrawlerConfig {
            max_depth,
            max_pages,
            exclude_patterns: vec![],
        },
        audit: AuditOptions {
            enable_accessibility: true,
            enable_seo,
            enable_dynamic_check: true,
            concurrency: 5,
            screenshot_dir: std::env::temp_dir()
                .join("jindan-test-shots")
                .to_string_lossy()
                .into_owned(),
        },
        output: OutputConfig::default(),
    }
}

async fn crawl_only(server: &MockServer, max_depth: u32, max_pages: usize) -> Vec<String> {
    let seed = Url::parse(&server.uri()).unwrap();
    let browser = HttpBrowser::launch().unwrap();
    let context = browser
        .new_context(Viewport::default(), None)
        .await
        .unwrap();
    let policy = UrlPolicy::new(&seed, &[]).unwrap();
    let crawler = Crawler::new(context, policy, max_depth, max_pages);

    let result = crawler.crawl(seed.as_str(), None).await.unwrap();
    result.pages.into_iter().map(|page| page.url).collect()
}

#[tokio::test]
async fn test_full_audit_pipeline() {
    let server = MockServer::start().await;
    let base = server.uri();

    // Graph: / -> /a, /b, external; /a -> /b. The same unlabeled image
    // appears on every page; /b additionally has an empty heading.
    let nav = r#"<img src="logo.png"><a href="/a">회사소개</a><a href="/b">제품</a>
           <a href="https://other.test/">외부</a>"#;
    mount(&server, "/", html_page("홈", nav)).await;
    mount(
        &server,
        "/a",
        html_page("회사소개", r#"<img src="logo.png"><a href="/b">제품</a>"#),
    )
    .await;
    mount(
        &server,
        "/b",
        html_page("제품", r#"<img src="logo.png"><h2></h2>"#),
    )
    .await;

    let config = test_config(&base, 2, 10, false);
    let browser = Arc::new(HttpBrowser::launch().unwrap());
    let result = run_audit(config, browser, None).await.unwrap();

    // Crawl containment: all three in-scope pages, never the external host
    assert_eq!(result.total_pages, 3);
    let host = Url::parse(&base).unwrap().host_str().unwrap().to_string();
    for page in &result.pages {
        assert_eq!(Url::parse(&page.url).unwrap().host_str(), Some(host.as_str()));
    }

    // The identical unlabeled image dedupes into one violation seen 3 times
    let image_alt: Vec<_> = result
        .violations
        .iter()
        .filter(|violation| violation.rule_id == "image-alt")
        .collect();
    assert_eq!(image_alt.len(), 1);
    assert_eq!(image_alt[0].occurrence_count, Some(3));
    assert_eq!(image_alt[0].kwcag_id, "1.1.1");
    assert_eq!(image_alt[0].impact, "critical");

    // Unmapped rule lands in the fallback bucket with the default impact
    let fallback = result
        .violations
        .iter()
        .find(|violation| violation.rule_id == "empty-heading")
        .expect("empty-heading finding missing");
    assert_eq!(fallback.kwcag_id, "기타");
    assert_eq!(fallback.impact, "minor");

    // Numbering: unique, contiguous from 1
    let mut numbers: Vec<u32> = result
        .violations
        .iter()
        .map(|violation| violation.violation_number)
        .collect();
    numbers.sort_unstable();
    let expected: Vec<u32> = (1..=result.violations.len() as u32).collect();
    assert_eq!(numbers, expected);

    // Summary consistency
    assert_eq!(result.total_violations, result.violations.len());
    let total = result.total_violations as u32;
    assert_eq!(result.summary.by_principle.values().sum::<u32>(), total);
    assert_eq!(result.summary.by_impact.values().sum::<u32>(), total);
    assert_eq!(result.summary.by_kwcag_item.values().sum::<u32>(), total);

    assert!(result.seo_result.is_none());
}

#[tokio::test]
async fn test_crawl_depth_budget() {
    let server = MockServer::start().await;
    mount(&server, "/", html_page("홈", r#"<a href="/d1">1</a>"#)).await;
    mount(&server, "/d1", html_page("1단계", r#"<a href="/d2">2</a>"#)).await;
    mount(&server, "/d2", html_page("2단계", r#"<a href="/d3">3</a>"#)).await;
    mount(&server, "/d3", html_page("3단계", "")).await;

    let urls = crawl_only(&server, 2, 50).await;

    assert_eq!(urls.len(), 2);
    assert!(urls.iter().any(|url| url.ends_with("/d1")));
    assert!(!urls.iter().any(|url| url.ends_with("/d2")));
}

#[tokio::test]
async fn test_crawl_page_budget() {
    let server = MockServer::start().await;
    let links: String = (1..=5)
        .map(|i| format!(r#"<a href="/p{i}">페이지 {i}</a>"#))
        .collect();
    mount(&server, "/", html_page("홈", &links)).await;
    for i in 1..=5 {
        mount(&server, &format!("/p{i}"), html_page("페이지", "")).await;
    }

    let urls = crawl_only(&server, 3, 3).await;
    assert_eq!(urls.len(), 3);
}

#[tokio::test]
async fn test_crawl_breadcrumbs_use_anchor_text() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/",
        html_page("홈페이지", r#"<a href="/about">회사소개</a>"#),
    )
    .await;
    mount(&server, "/about", html_page("About Us", "")).await;

    let seed = Url::parse(&server.uri()).unwrap();
    let browser = HttpBrowser::launch().unwrap();
    let context = browser
        .new_context(Viewport::default(), None)
        .await
        .unwrap();
    let policy = UrlPolicy::new(&seed, &[]).unwrap();
    let crawler = Crawler::new(context, policy, 3, 10);
    let result = crawler.crawl(seed.as_str(), None).await.unwrap();

    let about = result
        .pages
        .iter()
        .find(|page| page.url.ends_with("/about"))
        .expect("about page not crawled");
    // Display title comes from the anchor text, not the page's own title
    assert_eq!(about.title, "회사소개");
    assert_eq!(about.depth1, "홈페이지");
    assert_eq!(about.depth2, "회사소개");
    assert_eq!(about.depth3, "");
}

#[tokio::test]
async fn test_crawl_skips_excluded_links() {
    let server = MockServer::start().await;
    let body = r#"<a href="/ok">정상</a>
        <a href="/files/manual.pdf">다운로드</a>
        <a href="/account/logout">로그아웃</a>
        <a href="javascript:void(0)">스크립트</a>
        <a href="mailto:admin@ex.test">메일</a>"#;
    mount(&server, "/", html_page("홈", body)).await;
    mount(&server, "/ok", html_page("정상", "")).await;

    let urls = crawl_only(&server, 2, 10).await;

    assert_eq!(urls.len(), 2);
    assert!(urls.iter().any(|url| url.ends_with("/ok")));
}

#[tokio::test]
async fn test_audit_with_seo_enabled() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount(&server, "/", html_page("홈", "<p>본문</p>")).await;
    mount(
        &server,
        "/sitemap.xml",
        format!(
            r#"<?xml version="1.0"?><urlset><url><loc>{base}/</loc></url></urlset>"#
        ),
    )
    .await;
    mount(&server, "/robots.txt", format!("Sitemap: {base}/sitemap.xml")).await;

    let config = test_config(&base, 1, 10, true);
    let browser = Arc::new(HttpBrowser::launch().unwrap());
    let result = run_audit(config, browser, None).await.unwrap();

    let seo = result.seo_result.expect("SEO result missing");
    assert!(seo.sitemap.exists);
    assert!(seo.sitemap.xml_valid);
    assert!(seo.sitemap.robots_txt_reference);
    assert_eq!(seo.sitemap.score, 100);
    assert!(!seo.llms_txt.exists);
    assert!(seo.overall_score.total <= 100);
}

#[tokio::test]
async fn test_cost_report_from_audit() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount(
        &server,
        "/",
        html_page("홈", r#"<img src="a.png"><input type="text" name="q">"#),
    )
    .await;

    let config = test_config(&base, 1, 10, false);
    let browser = Arc::new(HttpBrowser::launch().unwrap());
    let result = run_audit(config, browser, None).await.unwrap();

    assert!(!result.violations.is_empty());
    let cost = jindan::calculate_cost(&result.violations);
    assert_eq!(cost.total_violations, result.violations.len());
    assert!(cost.total_man_hours > 0.0);
    // Rounding contract: one decimal for hours, two for man-months
    assert_eq!(cost.total_man_hours, (cost.total_man_hours * 10.0).round() / 10.0);
    assert_eq!(
        cost.total_man_months,
        (cost.total_man_months * 100.0).round() / 100.0
    );
}
