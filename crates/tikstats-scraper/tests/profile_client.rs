//! Integration tests for `ProfileClient` and `scrape_profile`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tikstats_core::KpiError;
use tikstats_scraper::{scrape_profile, ProfileClient, ScraperError};

fn test_client(server: &MockServer) -> ProfileClient {
    ProfileClient::new(&server.uri(), 5, None).expect("failed to build test ProfileClient")
}

const PROFILE_HTML: &str = r#"<html><body>
  <strong data-e2e="following-count">12</strong>
  <strong data-e2e="followers-count">5K</strong>
  <strong data-e2e="likes-count">10K</strong>
  <strong class="video-count" data-e2e="video-views">30K</strong>
  <div data-e2e="user-post-item-desc"><a href="/v/1">morning routine</a></div>
  <strong class="video-count" data-e2e="video-views">20K</strong>
  <div data-e2e="user-post-item-desc"><a href="/v/2">night routine</a></div>
</body></html>"#;

// ---------------------------------------------------------------------------
// fetch_profile_page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_profile_page_returns_body_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/@scout2015"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_client(&server)
        .fetch_profile_page("scout2015")
        .await
        .expect("fetch should succeed");
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn fetch_profile_page_maps_404_to_profile_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/@ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_profile_page("ghost")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::ProfileNotFound { ref url } if url.ends_with("/@ghost")),
        "expected ProfileNotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_profile_page_does_not_retry_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/@flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_profile_page("flaky")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_profile_page_rejects_invalid_username_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_profile_page("not a user")
        .await
        .unwrap_err();
    assert!(matches!(err, ScraperError::InvalidUsername { .. }));
}

#[tokio::test]
async fn fetch_profile_page_surfaces_transport_errors() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = ProfileClient::new("http://127.0.0.1:9", 2, None).expect("client");
    let err = client.fetch_profile_page("scout2015").await.unwrap_err();
    assert!(
        matches!(err, ScraperError::Http(_)),
        "expected Http, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_profile_page_sends_configured_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/@scout2015"))
        .and(wiremock::matchers::header("user-agent", "tikstats-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProfileClient::new(&server.uri(), 5, Some("tikstats-test/0.1")).expect("client");
    client
        .fetch_profile_page("scout2015")
        .await
        .expect("fetch should succeed");
}

// ---------------------------------------------------------------------------
// scrape_profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scrape_profile_builds_snapshot_with_kpis() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/@scout2015"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = scrape_profile(&test_client(&server), "@scout2015")
        .await
        .expect("scrape should succeed");

    assert_eq!(snapshot.following, 12);
    assert_eq!(snapshot.followers, 5_000);
    assert_eq!(snapshot.likes, 10_000);
    assert_eq!(snapshot.views, 50_000);
    assert_eq!(snapshot.videos.get("morning routine"), Some(30_000));
    assert_eq!(snapshot.videos.get("night routine"), Some(20_000));
    assert!((snapshot.kpis.likes_per_view - 0.2).abs() < 1e-9);
    assert!((snapshot.kpis.monetization_views_remaining - 50_000.0).abs() < 1e-9);
}

#[tokio::test]
async fn scrape_profile_reports_zero_views_as_kpi_error() {
    let server = MockServer::start().await;
    let html = PROFILE_HTML.replace("30K", "0").replace("20K", "0");

    Mock::given(method("GET"))
        .and(path("/@quiet"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let err = scrape_profile(&test_client(&server), "quiet")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::Kpi(KpiError::NoViews)),
        "expected Kpi(NoViews), got: {err:?}"
    );
}

#[tokio::test]
async fn scrape_profile_reports_missing_markers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/@redesigned"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>new layout</body></html>"),
        )
        .mount(&server)
        .await;

    let err = scrape_profile(&test_client(&server), "redesigned")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::MarkerNotFound { marker: "video-views" }),
        "expected MarkerNotFound(video-views), got: {err:?}"
    );
}
