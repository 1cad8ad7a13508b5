//! Integration tests for the Bedrock-backed catalog
//!
//! Points a real `aws_sdk_bedrock::Client` at a wiremock server and checks
//! response mapping and error classification end to end.

use aws_sdk_bedrock::config::retry::RetryConfig;
use aws_sdk_bedrock::config::{BehaviorVersion, Credentials, Region};
use bedrock_inventory::error::AppError;
use bedrock_inventory::inventory::{BedrockCatalog, ModelCatalog, list_enabled_models};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client for `server` with static credentials and SDK retries disabled
fn client_for(server: &MockServer) -> aws_sdk_bedrock::Client {
    let config = aws_sdk_bedrock::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .endpoint_url(server.uri())
        .credentials_provider(Credentials::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
            None,
            None,
            "test",
        ))
        .retry_config(RetryConfig::disabled())
        .build();
    aws_sdk_bedrock::Client::from_conf(config)
}

fn model_json(id: &str, provider: &str, status: &str) -> serde_json::Value {
    json!({
        "modelArn": format!("arn:aws:bedrock:us-east-1::foundation-model/{}", id),
        "modelId": id,
        "providerName": provider,
        "inputModalities": ["TEXT"],
        "outputModalities": ["TEXT"],
        "modelLifecycle": { "status": status }
    })
}

#[tokio::test]
async fn test_single_page_listing_is_mapped_and_filtered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foundation-models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "modelSummaries": [
                model_json("anthropic.claude-3-haiku-20240307-v1:0", "Anthropic", "ACTIVE"),
                model_json("anthropic.claude-instant-v1", "Anthropic", "LEGACY"),
                model_json("meta.llama3-8b-instruct-v1:0", "Meta", "ACTIVE")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = BedrockCatalog::new(client_for(&server));
    let models = list_enabled_models(&catalog).await.expect("listing succeeds");

    let ids: Vec<_> = models.iter().map(|m| m.model_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["anthropic.claude-3-haiku-20240307-v1:0", "meta.llama3-8b-instruct-v1:0"]
    );
    assert_eq!(models[1].provider, "Meta");
    assert_eq!(models[1].input_modalities, vec!["TEXT"]);
}

#[tokio::test]
async fn test_catalog_reports_no_continuation_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foundation-models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "modelSummaries": [] })))
        .mount(&server)
        .await;

    let catalog = BedrockCatalog::new(client_for(&server));
    let page = catalog.list_page(None).await.expect("listing succeeds");

    assert!(page.model_summaries.is_empty());
    assert_eq!(page.next_token, None);
}

#[tokio::test]
async fn test_throttling_response_becomes_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foundation-models"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-amzn-errortype", "ThrottlingException")
                .set_body_json(json!({ "message": "Rate exceeded" })),
        )
        .mount(&server)
        .await;

    let catalog = BedrockCatalog::new(client_for(&server));
    let err = list_enabled_models(&catalog).await.unwrap_err();

    assert!(matches!(err, AppError::Service { .. }), "got: {:?}", err);
    assert_eq!(err.code(), Some("ThrottlingException"));
    assert_eq!(err.service_message(), Some("Rate exceeded"));
}

#[tokio::test]
async fn test_access_denied_response_becomes_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foundation-models"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-amzn-errortype", "AccessDeniedException")
                .set_body_json(json!({ "message": "not authorized" })),
        )
        .mount(&server)
        .await;

    let catalog = BedrockCatalog::new(client_for(&server));
    let err = list_enabled_models(&catalog).await.unwrap_err();

    assert!(matches!(err, AppError::Auth { .. }), "got: {:?}", err);
    assert_eq!(err.code(), Some("AccessDeniedException"));
}

#[tokio::test]
async fn test_unreachable_endpoint_becomes_network_error() {
    // Bind then release an ephemeral port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    let uri = format!("http://127.0.0.1:{}", port);
    let config = aws_sdk_bedrock::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .endpoint_url(uri)
        .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "test"))
        .retry_config(RetryConfig::disabled())
        .build();

    let catalog = BedrockCatalog::new(aws_sdk_bedrock::Client::from_conf(config));
    let err = list_enabled_models(&catalog).await.unwrap_err();

    assert!(matches!(err, AppError::Network(_)), "got: {:?}", err);
}
