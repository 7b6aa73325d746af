use std::time::Duration;

use jobfinder_core::{
    validate, ErrorKind, FileCandidate, ManualQuery, ResultLimit, SearchParameters,
    SearchRequestBuilder, TransmittableRequest,
};
use jobfinder_engine::{dispatch_with_deadline, DispatchSettings, Dispatcher, ReqwestDispatcher};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resume_upload(base: &str, location: &str, limit: ResultLimit) -> TransmittableRequest {
    let document = validate(FileCandidate::new(
        "resume.pdf",
        "application/pdf",
        &b"%PDF-1.7 fake resume"[..],
    ))
    .unwrap();
    SearchRequestBuilder::new(base).unwrap().build_resume(
        &document,
        &SearchParameters {
            location: location.to_string(),
            limit,
        },
    )
}

fn dispatcher() -> ReqwestDispatcher {
    ReqwestDispatcher::new(DispatchSettings::default()).unwrap()
}

fn job(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "company": "Acme",
        "location": "Remote",
        "description": "Build things",
        "posted": "2025-05-30T00:00:00Z",
        "apply_link": format!("https://jobs.example/{title}"),
        "source": "RapidAPI",
    })
}

#[tokio::test]
async fn resume_search_uploads_multipart_and_returns_results_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-jobs"))
        .and(query_param("location", "Remote"))
        .and(query_param("limit", "50"))
        .and(body_string_contains("name=\"resume\""))
        .and(body_string_contains("filename=\"resume.pdf\""))
        .and(body_string_contains("%PDF-1.7 fake resume"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": "Remote",
            "results": [job("third"), job("first"), job("second")],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = resume_upload(&server.uri(), "Remote", ResultLimit::L50);
    let results = dispatcher().dispatch(&request).await.expect("dispatch ok");

    let titles: Vec<_> = results.iter().map(|job| job.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "first", "second"]);
    assert_eq!(results[0].source, "RapidAPI");
    assert_eq!(results[0].posted.as_deref(), Some("2025-05-30T00:00:00Z"));
}

#[tokio::test]
async fn missing_results_field_is_an_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "location": "Remote" })))
        .mount(&server)
        .await;

    let request = resume_upload(&server.uri(), "Remote", ResultLimit::L25);
    let results = dispatcher().dispatch(&request).await.expect("dispatch ok");
    assert!(results.is_empty());
}

#[tokio::test]
async fn status_415_is_unsupported_media_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-jobs"))
        .respond_with(
            ResponseTemplate::new(415)
                .set_body_json(json!({ "detail": "Only PDF or DOCX files are supported" })),
        )
        .mount(&server)
        .await;

    let request = resume_upload(&server.uri(), "Remote", ResultLimit::L50);
    let err = dispatcher().dispatch(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedMediaType);
    assert_eq!(
        err.message,
        "Invalid file format. Please upload a PDF or DOCX file."
    );
}

#[tokio::test]
async fn server_errors_carry_detail_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-jobs"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "INTERNAL ERROR: quota" })),
        )
        .mount(&server)
        .await;

    let request = resume_upload(&server.uri(), "Remote", ResultLimit::L50);
    let err = dispatcher().dispatch(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ServerError { status: 500 });
    assert_eq!(err.message, "Server error: INTERNAL ERROR: quota");
}

#[tokio::test]
async fn other_statuses_are_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let request = resume_upload(&server.uri(), "Remote", ResultLimit::L50);
    let err = dispatcher().dispatch(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedStatus { status: 404 });
    assert_eq!(err.message, "Request failed with status 404");
}

#[tokio::test]
async fn garbage_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let request = resume_upload(&server.uri(), "Remote", ResultLimit::L50);
    let err = dispatcher().dispatch(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": []}"#))
        .mount(&server)
        .await;

    let settings = DispatchSettings {
        max_response_bytes: 4,
        ..DispatchSettings::default()
    };
    let request = resume_upload(&server.uri(), "Remote", ResultLimit::L50);
    let err = ReqwestDispatcher::new(settings)
        .unwrap()
        .dispatch(&request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn slow_response_times_out_at_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "results": [job("late")] })),
        )
        .mount(&server)
        .await;

    let request = resume_upload(&server.uri(), "Remote", ResultLimit::L50);
    let dispatcher = dispatcher();
    let err = dispatch_with_deadline(&dispatcher, &request, Duration::from_millis(50))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
    assert_eq!(err.message, "Request timed out. Please try again.");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Port 9 (discard) is closed on test machines; the connection is refused.
    let request = resume_upload("http://127.0.0.1:9", "Remote", ResultLimit::L50);
    let err = dispatcher().dispatch(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TransportError);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn manual_search_posts_json_and_reads_bare_array() {
    let server = MockServer::start().await;
    let query = ManualQuery::default();
    Mock::given(method("POST"))
        .and(path("/manual-search"))
        .and(body_json(json!({
            "job": "Software Engineer",
            "location": "Kochi",
            "experience": "experienced",
            "category": "full-time",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([job("one"), job("two")])))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequestBuilder::new(&server.uri())
        .unwrap()
        .build_manual(&query);
    let results = dispatcher().dispatch(&request).await.expect("dispatch ok");
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].title, "two");
}
