//! Unit tests for source fetching

use super::*;
use std::io::Write;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const CSV_BODY: &str = "season,week,home_team\n2025,5,Team A\n";

#[test]
fn test_source_parse() {
    assert_eq!(
        Source::parse("https://example.com/a.csv"),
        Source::Url("https://example.com/a.csv".to_string())
    );
    assert_eq!(
        Source::parse(" data/weekly/latest.csv "),
        Source::File(PathBuf::from("data/weekly/latest.csv"))
    );
}

#[test]
fn test_source_parse_list_skips_blanks() {
    let sources = Source::parse_list("a.csv,, http://x/b.csv ,");
    assert_eq!(
        sources,
        vec![
            Source::File(PathBuf::from("a.csv")),
            Source::Url("http://x/b.csv".to_string()),
        ]
    );
}

#[test]
fn test_cache_busted() {
    assert_eq!(cache_busted("http://x/a.csv", 42), "http://x/a.csv?v=42");
    assert_eq!(
        cache_busted("http://x/a.csv?token=1", 42),
        "http://x/a.csv?token=1&v=42"
    );
}

#[tokio::test]
async fn test_fetch_first_falls_through_to_second_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/latest.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV_BODY))
        .mount(&mock_server)
        .await;

    let sources = vec![
        Source::Url(format!("{}/missing.csv", mock_server.uri())),
        Source::Url(format!("{}/latest.csv", mock_server.uri())),
    ];

    let client = build_client().unwrap();
    let (source, body) = fetch_first(&client, &sources, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(source, sources[1]);
    assert_eq!(body, CSV_BODY);
}

#[tokio::test]
async fn test_fetch_first_reports_every_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let sources = vec![
        Source::File(PathBuf::from("/definitely/not/here.csv")),
        Source::Url(format!("{}/latest.csv", mock_server.uri())),
    ];

    let client = build_client().unwrap();
    let err = fetch_first(&client, &sources, Duration::from_secs(5))
        .await
        .unwrap_err();

    match err {
        PickError::SourceUnavailable { attempts } => {
            assert_eq!(attempts.len(), 2);
            assert_eq!(attempts[0].source, "/definitely/not/here.csv");
            assert_eq!(attempts[1].reason, "HTTP 500");
        }
        other => panic!("Expected SourceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_first_times_out_slow_candidate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow.csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(CSV_BODY)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fast.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV_BODY))
        .mount(&mock_server)
        .await;

    let sources = vec![
        Source::Url(format!("{}/slow.csv", mock_server.uri())),
        Source::Url(format!("{}/fast.csv", mock_server.uri())),
    ];

    let client = build_client().unwrap();
    let (source, _) = fetch_first(&client, &sources, Duration::from_millis(200))
        .await
        .unwrap();

    assert_eq!(source, sources[1]);
}

#[tokio::test]
async fn test_fetch_first_reads_local_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CSV_BODY.as_bytes()).unwrap();

    let sources = vec![Source::File(file.path().to_path_buf())];
    let client = build_client().unwrap();
    let (_, body) = fetch_first(&client, &sources, Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(body, CSV_BODY);
}

#[tokio::test]
async fn test_fetch_first_with_no_candidates() {
    let client = build_client().unwrap();
    let err = fetch_first(&client, &[], Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, PickError::SourceUnavailable { attempts } if attempts.is_empty()));
}
