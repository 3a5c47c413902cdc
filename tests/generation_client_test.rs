//! Integration tests for the HTTP generation client against a mocked service.

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commit_suggest::diff::{MarkerValidator, validate_diff};
use commit_suggest::generate::build_request;
use commit_suggest::{
    Endpoint, GenerationClient, GenerationOptions, GenerationRequest, HttpGenerationClient,
    PipelineError,
};

use common::{GENERATE_ROUTE, SAMPLE_DIFF, endpoint_for, mount_generate, sample_response};

fn sample_request() -> GenerationRequest {
    let diff = validate_diff(&MarkerValidator, SAMPLE_DIFF.to_string()).unwrap();
    build_request(diff, &GenerationOptions::default()).unwrap()
}

#[tokio::test]
async fn test_posts_request_body_and_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_ROUTE))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "diffContent": SAMPLE_DIFF,
            "style": "CONVENTIONAL",
            "numAlternatives": 2,
            "generatePr": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpGenerationClient::new(&endpoint_for(&server)).unwrap();
    let response = client.generate(&sample_request()).await.unwrap();

    assert_eq!(response.commit_message, "fix: correct foo to bar");
    assert_eq!(response.alternatives, vec!["fix: update value", "chore: adjust logic"]);
    assert_eq!(response.type_labels, vec!["fix"]);
    assert_eq!(response.pr_title.as_deref(), Some("Fix bar"));
    assert_eq!(response.pr_body.as_deref(), Some("Changes bar"));
}

#[tokio::test]
async fn test_endpoint_with_trailing_slash_hits_same_route() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(sample_response()),
        1,
    )
    .await;

    let endpoint = Endpoint::parse(&format!("{}/", server.uri())).unwrap();
    let client = HttpGenerationClient::new(&endpoint).unwrap();
    assert!(client.generate(&sample_request()).await.is_ok());
}

#[tokio::test]
async fn test_error_status_uses_commit_message_from_body() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({"commitMessage": "Diff is too large"})),
        1,
    )
    .await;

    let client = HttpGenerationClient::new(&endpoint_for(&server)).unwrap();
    let err = client.generate(&sample_request()).await.unwrap_err();

    match err {
        PipelineError::BackendError { message } => assert_eq!(message, "Diff is too large"),
        other => panic!("Expected BackendError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_without_message_is_generic() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(503).set_body_string("Service Unavailable"),
        1,
    )
    .await;

    let client = HttpGenerationClient::new(&endpoint_for(&server)).unwrap();
    let err = client.generate(&sample_request()).await.unwrap_err();

    match err {
        PipelineError::BackendError { message } => {
            assert_eq!(message, "Something went wrong (HTTP 503)");
        }
        other => panic!("Expected BackendError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_ROUTE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_response())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client =
        HttpGenerationClient::with_timeout(&endpoint_for(&server), Duration::from_millis(200))
            .unwrap();
    let err = client.generate(&sample_request()).await.unwrap_err();

    match err {
        PipelineError::BackendError { message } => assert!(message.contains("timed out")),
        other => panic!("Expected BackendError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_is_backend_error() {
    let server = MockServer::start().await;
    let endpoint = endpoint_for(&server);
    drop(server);

    let client = HttpGenerationClient::new(&endpoint).unwrap();
    let err = client.generate(&sample_request()).await.unwrap_err();

    assert!(
        matches!(err, PipelineError::BackendError { .. }),
        "Expected BackendError, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_success_without_commit_message_is_malformed() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"alternatives": ["a"]})),
        1,
    )
    .await;

    let client = HttpGenerationClient::new(&endpoint_for(&server)).unwrap();
    let err = client.generate(&sample_request()).await.unwrap_err();

    assert!(matches!(err, PipelineError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_success_with_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    mount_generate(
        &server,
        ResponseTemplate::new(200).set_body_string("ok"),
        1,
    )
    .await;

    let client = HttpGenerationClient::new(&endpoint_for(&server)).unwrap();
    let err = client.generate(&sample_request()).await.unwrap_err();

    assert!(matches!(err, PipelineError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_client_does_not_retry() {
    let server = MockServer::start().await;
    mount_generate(&server, ResponseTemplate::new(500), 1).await;

    let client = HttpGenerationClient::new(&endpoint_for(&server)).unwrap();
    assert!(client.generate(&sample_request()).await.is_err());
    // expect(1) is verified when the server drops
}
