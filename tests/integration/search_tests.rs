//! Integration tests for the searcher
//!
//! These tests use wiremock to stand in for the content source and run the
//! full catalog → classify → two waves → results cycle end-to-end.

use board_sieve::config::{load_config, SourceConfig};
use board_sieve::crawler::{search, SearchRequest};
use board_sieve::model::JobKind;
use board_sieve::source::ContentClient;
use board_sieve::SieveError;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server
fn create_test_client(server: &MockServer) -> ContentClient {
    let config = SourceConfig {
        api_base: server.uri(),
        media_base: format!("{}/media", server.uri()),
        site_base: "https://boards.example.org".to_string(),
        timeout_secs: 5,
        ..SourceConfig::default()
    };
    ContentClient::new(&config).expect("Failed to build client")
}

async fn mount_json(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

/// One board, three threads: "Rust General" matches the title filter, thread
/// 200 has one reply mentioning rust, thread 300 has nothing relevant.
async fn mount_single_board(server: &MockServer) {
    mount_json(
        server,
        "/g/catalog.json",
        r#"[{"page":1,"threads":[
            {"no":100,"sub":"Rust General","com":"post your crates"},
            {"no":200,"sub":"Desktop thread","com":"show your setup"},
            {"no":300,"com":"what are you reading"}
        ]}]"#,
    )
    .await;
    mount_json(
        server,
        "/g/thread/100.json",
        r#"{"posts":[{"no":100,"sub":"Rust General","com":"post your crates","tim":555,"ext":".png"}]}"#,
    )
    .await;
    mount_json(
        server,
        "/g/thread/200.json",
        r#"{"posts":[
            {"no":200,"sub":"Desktop thread","com":"show your setup"},
            {"no":201,"com":"my wm is written in Rust","tim":777,"ext":".jpg"}
        ]}"#,
    )
    .await;
    mount_json(
        server,
        "/g/thread/300.json",
        r#"{"posts":[{"no":300,"com":"what are you reading"},{"no":301,"com":"sicp"}]}"#,
    )
    .await;
}

#[tokio::test]
async fn test_end_to_end_single_board() {
    let server = MockServer::start().await;
    mount_single_board(&server).await;

    let temp = TempDir::new().unwrap();
    let client = create_test_client(&server);
    let mut request = SearchRequest::new("rust", vec!["g".to_string()]);
    request.download_dir = temp.path().to_path_buf();

    let outcome = search(&client, &request).await.expect("search failed");

    assert_eq!(outcome.results.len(), 2);

    // full-capture results come first
    let captured = &outcome.results[0];
    assert_eq!(captured.origin, JobKind::FullCapture);
    assert_eq!((captured.thread_id, captured.post_id), (100, 100));
    assert_eq!(captured.snippet, "post your crates");

    let hit = &outcome.results[1];
    assert_eq!(hit.origin, JobKind::Search);
    assert_eq!((hit.thread_id, hit.post_id), (200, 201));
    assert_eq!(hit.url, "https://boards.example.org/g/thread/200#p201");
    assert_eq!(
        hit.media_url.as_deref(),
        Some(format!("{}/media/g/777.jpg", server.uri()).as_str())
    );

    assert_eq!(outcome.captured.len(), 1);
    assert_eq!(outcome.captured[0].board, "g");
    assert_eq!(outcome.captured[0].thread_id, 100);
    assert_eq!(outcome.captured[0].subject, "Rust General");

    assert_eq!(outcome.keywords.as_slice(), ["rust".to_string()]);
}

#[tokio::test]
async fn test_full_capture_downloads_media_even_when_disabled() {
    let server = MockServer::start().await;
    mount_single_board(&server).await;
    Mock::given(method("GET"))
        .and(path("/media/g/555.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/g/777.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpg".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let client = create_test_client(&server);
    let mut request = SearchRequest::new("rust", vec!["g".to_string()]);
    request.download_dir = temp.path().to_path_buf();

    let outcome = search(&client, &request).await.unwrap();

    let saved = temp.path().join("g").join("100").join("555.png");
    assert_eq!(outcome.results[0].media_file.as_deref(), Some(saved.as_path()));
    assert_eq!(std::fs::read(&saved).unwrap(), b"png");
    assert!(outcome.results[1].media_file.is_none());

    server.verify().await;
}

#[tokio::test]
async fn test_search_hits_download_when_enabled() {
    let server = MockServer::start().await;
    mount_single_board(&server).await;
    Mock::given(method("GET"))
        .and(path("/media/g/555.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/g/777.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpg".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let client = create_test_client(&server);
    let mut request = SearchRequest::new("rust", vec!["g".to_string()]);
    request.download_dir = temp.path().to_path_buf();
    request.download_enabled = true;

    let outcome = search(&client, &request).await.unwrap();

    let saved = temp.path().join("g").join("200").join("777.jpg");
    assert_eq!(outcome.results[1].media_file.as_deref(), Some(saved.as_path()));
    assert_eq!(std::fs::read(&saved).unwrap(), b"jpg");

    // a second run finds the files already on disk
    let again = search(&client, &request).await.unwrap();
    assert_eq!(again.results[1].media_file.as_deref(), Some(saved.as_path()));

    server.verify().await;
}

#[tokio::test]
async fn test_invalid_pattern_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let request = SearchRequest::new("(unclosed", vec!["g".to_string()]);

    let result = search(&client, &request).await;
    assert!(matches!(result, Err(SieveError::Pattern(_))));

    server.verify().await;
}

#[tokio::test]
async fn test_failed_catalog_contributes_no_jobs() {
    let server = MockServer::start().await;
    mount_single_board(&server).await;
    Mock::given(method("GET"))
        .and(path("/tv/catalog.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/x/catalog.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let client = create_test_client(&server);
    let mut request = SearchRequest::new(
        "rust",
        vec!["tv".to_string(), "g".to_string(), "x".to_string()],
    );
    request.download_dir = temp.path().to_path_buf();

    let outcome = search(&client, &request).await.unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.results.iter().all(|r| r.board == "g"));
    assert_eq!(outcome.captured.len(), 1);
}

#[tokio::test]
async fn test_failed_thread_contributes_nothing() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/g/catalog.json",
        r#"[{"page":1,"threads":[{"no":1},{"no":2}]}]"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/g/thread/1.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/g/thread/2.json",
        r#"{"posts":[{"no":2,"com":"cat"},{"no":3,"com":"dog"},{"no":4,"com":"fish"}]}"#,
    )
    .await;

    let client = create_test_client(&server);
    let request = SearchRequest::new("cat|dog", vec!["g".to_string()]);

    let outcome = search(&client, &request).await.unwrap();

    let mut ids: Vec<u64> = outcome.results.iter().map(|r| r.post_id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![2, 3]);
    assert!(outcome.captured.is_empty());
    assert_eq!(outcome.keywords.as_slice(), ["cat".to_string(), "dog".to_string()]);
}

#[tokio::test]
async fn test_thread_cap_limits_fetches() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/g/catalog.json",
        r#"[{"page":1,"threads":[{"no":1},{"no":2}]},{"page":2,"threads":[{"no":3}]}]"#,
    )
    .await;
    for id in 1..=2 {
        Mock::given(method("GET"))
            .and(path(format!("/g/thread/{}.json", id)))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"posts":[]}"#))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/g/thread/3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"posts":[]}"#))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let mut request = SearchRequest::new("anything", vec!["g".to_string()]);
    request.max_threads_per_board = 2;
    request.max_workers = 1;

    let outcome = search(&client, &request).await.unwrap();
    assert!(outcome.results.is_empty());

    server.verify().await;
}

#[tokio::test]
async fn test_request_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[search]
max-threads-per-board = 1
max-workers = 2
title-filter = "  DESKTOP "
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let request = SearchRequest::from_config("rust", vec!["g".to_string()], &config.search);

    assert_eq!(request.max_threads_per_board, 1);
    assert_eq!(request.max_workers, 2);
    assert_eq!(request.title_filter.as_deref(), Some("desktop"));

    let server = MockServer::start().await;
    mount_single_board(&server).await;
    let outcome = search(&create_test_client(&server), &request)
        .await
        .unwrap();

    // only thread 100 is sampled; "desktop" does not select it, but its
    // subject still matches the pattern as a search job
    assert!(outcome.captured.is_empty());
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].origin, JobKind::Search);
    assert_eq!(outcome.results[0].post_id, 100);
}
