// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Probe Tests
 * Fallback, status handling, retry timing and capture behavior
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use haavi::errors::ScanError;
use haavi::filter::MatchCriteria;
use haavi::http_client::HttpClient;
use haavi::probe::probe_pair;
use haavi::retry::{retry_with_backoff, RetryConfig};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn client() -> HttpClient {
    HttpClient::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_falls_back_to_http_when_https_is_unavailable() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Server", "TestBanner/1.0")
                .set_body_raw("<html><head><title>Device Portal</title></head></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    // The mock only speaks plain HTTP, so the HTTPS attempt must fail and
    // the recorded URL must carry the http scheme.
    let result = probe_pair(&client(), "127.0.0.1", port, "/").await.unwrap();

    assert!(result.url.starts_with("http://"));
    assert_eq!(result.target, format!("127.0.0.1:{}", port));
    assert_eq!(result.status, 200);
    assert_eq!(result.title, "Device Portal");
    assert!(result.header_block.contains("server: TestBanner/1.0"));
    assert!(result.header_block.ends_with("\n\n"));
}

#[tokio::test]
async fn test_absolute_url_target_never_switches_scheme() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    // If the prober wrongly fell back to plain HTTP this mock would be hit.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Explicit https scheme against a plain-HTTP listener: the TLS attempt
    // fails and that is the end of it.
    let target = format!("https://127.0.0.1:{}", port);
    let result = probe_pair(&client(), &target, 80, "").await;

    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_probe_runs_on_a_spawned_task() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><title>Spawned</title></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    // The whole probe future, title scan included, must be spawnable onto
    // the multi-threaded runtime.
    let handle = tokio::spawn(async move { probe_pair(&client(), "127.0.0.1", port, "").await });
    let result = handle.await.unwrap().unwrap();

    assert_eq!(result.title, "Spawned");
}

#[tokio::test]
async fn test_non_200_status_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = probe_pair(&client(), "127.0.0.1", port, "").await.unwrap_err();

    match err {
        ScanError::UnexpectedStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("expected UnexpectedStatus, got {}", other),
    }
}

/// Responds with 500 a fixed number of times, then 200 with a body.
struct FlakyResponder {
    hits: AtomicU32,
    failures: u32,
}

impl Respond for FlakyResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        if self.hits.fetch_add(1, Ordering::SeqCst) < self.failures {
            ResponseTemplate::new(500)
        } else {
            ResponseTemplate::new(200)
                .insert_header("Server", "TestBanner/1.0")
                .set_body_raw("<html><title>Back Online</title></html>", "text/html")
        }
    }
}

#[tokio::test]
async fn test_retry_recovers_and_elapsed_covers_backoff() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .respond_with(FlakyResponder {
            hits: AtomicU32::new(0),
            failures: 2,
        })
        .mount(&mock_server)
        .await;

    let client = client();
    let retry_config = RetryConfig {
        max_attempts: 3,
        backoff_step: Duration::from_millis(100),
    };

    let started = Instant::now();
    let result = retry_with_backoff(&retry_config, "127.0.0.1", || {
        probe_pair(&client, "127.0.0.1", port, "")
    })
    .await
    .unwrap();

    // Two failed attempts: 100ms backoff after the first, 200ms after the second
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert_eq!(result.title, "Back Online");
}

#[tokio::test]
async fn test_retry_budget_exhaustion_skips_the_target() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client();
    let retry_config = RetryConfig {
        max_attempts: 2,
        backoff_step: Duration::from_millis(10),
    };

    let result = retry_with_backoff(&retry_config, "127.0.0.1", || {
        probe_pair(&client, "127.0.0.1", port, "")
    })
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_banner_filter_against_live_capture() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Server", "TestBanner/1.0")
                .set_body_raw("<html><title>Welcome</title></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let result = probe_pair(&client(), "127.0.0.1", port, "").await.unwrap();

    let matching = MatchCriteria {
        banner: "TestBanner".to_string(),
        ..Default::default()
    };
    assert!(matching.is_reportable(&result));

    let mismatching = MatchCriteria {
        banner: "OtherBanner".to_string(),
        ..Default::default()
    };
    assert!(!mismatching.is_reportable(&result));
}

#[tokio::test]
async fn test_soft_404_page_is_suppressed() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Server", "nginx")
                .set_body_raw("<html><title>404 Not Found</title></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let result = probe_pair(&client(), "127.0.0.1", port, "").await.unwrap();

    assert_eq!(result.title, "404 Not Found");
    assert!(!MatchCriteria::default().is_reportable(&result));
    let criteria = MatchCriteria {
        banner: "nginx".to_string(),
        ..Default::default()
    };
    assert!(!criteria.is_reportable(&result));
}

#[tokio::test]
async fn test_header_key_filter_requires_the_header() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Server", "nginx")
                .set_body_raw("<html><title>Welcome</title></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let result = probe_pair(&client(), "127.0.0.1", port, "").await.unwrap();

    let criteria = MatchCriteria {
        header_key: "X-Powered-By".to_string(),
        header_value: "PHP".to_string(),
        ..Default::default()
    };
    assert!(!criteria.is_reportable(&result));
}

#[tokio::test]
async fn test_path_suffix_is_appended() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><title>Admin</title></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let result = probe_pair(&client(), "127.0.0.1", port, "/admin").await.unwrap();

    assert!(result.url.ends_with("/admin"));
    assert_eq!(result.title, "Admin");
}
