use std::time::Duration;

use curator_engine::{
    CandidateRecord, CandidateSource, FailureKind, FetchSettings, HttpCandidateSource, MediaKind,
};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings::new(Url::parse(&server.uri()).unwrap())
}

#[tokio::test]
async fn fetches_and_decodes_one_listing_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/image-files"))
        .and(query_param("pageIndex", "2"))
        .and(query_param("pageSize", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "content": [
                    {"id": 7, "displayName": "sunset.jpg", "path": "/media/sunset.jpg"},
                    {"id": 9, "displayName": "dunes.png", "path": "/media/dunes.png"}
                ],
                "isLastPage": false,
                "page": 2
            }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let source = HttpCandidateSource::new(settings_for(&server)).unwrap();
    let page = source
        .fetch_page(MediaKind::Image, 2, 50)
        .await
        .expect("fetch ok");

    assert_eq!(
        page.content,
        vec![
            CandidateRecord {
                id: 7,
                display_name: "sunset.jpg".to_string(),
                path: "/media/sunset.jpg".to_string(),
            },
            CandidateRecord {
                id: 9,
                display_name: "dunes.png".to_string(),
                path: "/media/dunes.png".to_string(),
            },
        ]
    );
    assert!(!page.is_last_page);
    assert_eq!(page.page, 2);
}

#[tokio::test]
async fn each_kind_hits_its_own_route() {
    let server = MockServer::start().await;
    for route in ["video-files", "audio-files", "document-files"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/{route}")))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"content": [], "isLastPage": true, "page": 0}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;
    }

    let source = HttpCandidateSource::new(settings_for(&server)).unwrap();
    for kind in [MediaKind::Video, MediaKind::Audio, MediaKind::Document] {
        let page = source.fetch_page(kind, 0, 10).await.expect("fetch ok");
        assert!(page.is_last_page);
    }
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/image-files"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = HttpCandidateSource::new(settings_for(&server)).unwrap();
    let err = source.fetch_page(MediaKind::Image, 0, 50).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/audio-files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(
                    r#"{"content": [], "isLastPage": true, "page": 0}"#,
                    "application/json",
                ),
        )
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.request_timeout = Duration::from_millis(50);
    let source = HttpCandidateSource::new(settings).unwrap();

    let err = source.fetch_page(MediaKind::Audio, 0, 50).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/document-files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"unexpected": true}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let source = HttpCandidateSource::new(settings_for(&server)).unwrap();
    let err = source
        .fetch_page(MediaKind::Document, 0, 50)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn kinds_without_listing_fail_without_a_request() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and fail the assertions below
    // with the wrong kind.

    let source = HttpCandidateSource::new(settings_for(&server)).unwrap();
    for kind in [MediaKind::Vector, MediaKind::Archive] {
        let err = source.fetch_page(kind, 0, 50).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::NoListing);
    }
}
