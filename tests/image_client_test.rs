//! OpenAiImageClient 的 HTTP 行为（wiremock 模拟 /images/generations）

use base64::Engine;
use postcraft::core::ProviderError;
use postcraft::visual::{ImageClient, ImageSettings, OpenAiImageClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn decodes_b64_json_payload() {
    let mock_server = MockServer::start().await;
    let raw = b"fake-image-bytes".to_vec();
    let encoded = base64::engine::general_purpose::STANDARD.encode(&raw);

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "dall-e-3",
            "prompt": "a coffee cup",
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
            "response_format": "b64_json"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": [{ "b64_json": encoded }] })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiImageClient::new(
        &format!("{}/v1", mock_server.uri()),
        "sk-test",
        ImageSettings::default(),
    );
    let bytes = client.generate("a coffee cup").await.unwrap();
    assert_eq!(bytes, raw);
}

#[tokio::test]
async fn empty_data_is_empty_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let client = OpenAiImageClient::new(&mock_server.uri(), "sk-test", ImageSettings::default());
    assert_eq!(
        client.generate("anything").await,
        Err(ProviderError::EmptyResponse)
    );
}

#[tokio::test]
async fn http_error_is_request_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit exceeded"))
        .mount(&mock_server)
        .await;

    let client = OpenAiImageClient::new(&mock_server.uri(), "sk-test", ImageSettings::default());
    match client.generate("anything").await {
        Err(ProviderError::Request(message)) => {
            assert!(message.contains("429"));
            assert!(message.contains("rate limit exceeded"));
        }
        other => panic!("expected request failure, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_base64_is_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": [{ "b64_json": "!!not base64!!" }] })),
        )
        .mount(&mock_server)
        .await;

    let client = OpenAiImageClient::new(&mock_server.uri(), "sk-test", ImageSettings::default());
    assert!(matches!(
        client.generate("anything").await,
        Err(ProviderError::Decode(_))
    ));
}
