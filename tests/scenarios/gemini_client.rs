//! Gemini client wire scenarios
//!
//! Runs the real HTTP client against `MockGemini` and checks what goes over
//! the wire and how upstream answers are interpreted.

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use roomcraft::{
    Catalog, ClientError, DesignSession, GeminiClient, GeminiConfig, GeneratedImage,
    ImageGenerator, ImageRefiner, Language, SessionStatus,
};

use crate::harness::{
    content_reply, predict_reply, select, MockGemini, Reply, GENERATED, REFINED,
};

fn client_for(mock: &MockGemini) -> GeminiClient {
    let config = GeminiConfig {
        base_url: mock.base_url(),
        ..GeminiConfig::with_api_key("test-key")
    };
    GeminiClient::new(config).expect("client")
}

#[tokio::test]
async fn test_generate_request_and_decode() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let client = client_for(&mock);

    let image = client.generate("a cozy bedroom").await.unwrap();
    assert_eq!(image.bytes(), GENERATED);

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.call, "imagen-4.0-generate-001:predict");
    assert_eq!(request.api_key.as_deref(), Some("test-key"));
    assert_eq!(request.body["instances"][0]["prompt"], "a cozy bedroom");
    assert_eq!(request.body["parameters"]["sampleCount"], 1);
    assert_eq!(request.body["parameters"]["aspectRatio"], "16:9");
    assert_eq!(
        request.body["parameters"]["outputOptions"]["mimeType"],
        "image/jpeg"
    );
}

#[tokio::test]
async fn test_generate_empty_predictions() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let client = client_for(&mock);

    mock.set_reply("predict", Reply::Json(serde_json::json!({ "predictions": [] })));
    let err = client.generate("a room").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyResult));

    // Filtered prompts come back without the predictions key at all
    mock.set_reply("predict", Reply::Json(serde_json::json!({})));
    let err = client.generate("a room").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyResult));
}

#[tokio::test]
async fn test_generate_upstream_error() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let client = client_for(&mock);
    mock.set_reply(
        "predict",
        Reply::Status(400, "API key not valid".to_string()),
    );

    match client.generate("a room").await {
        Err(ClientError::Upstream { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    mock.set_reply("predict", Reply::Delay(Duration::from_secs(5)));
    mock.set_reply("generateContent", Reply::Delay(Duration::from_secs(5)));
    let client = GeminiClient::new(GeminiConfig {
        base_url: mock.base_url(),
        timeout: Duration::from_millis(200),
        ..GeminiConfig::with_api_key("test-key")
    })
    .unwrap();

    match client.generate("a room").await {
        Err(ClientError::Network(e)) => assert!(e.is_timeout()),
        other => panic!("unexpected result: {:?}", other),
    }

    let source = GeneratedImage::new(b"source".to_vec());
    match client.refine(&source, "brighter", "English").await {
        Err(ClientError::Network(e)) => assert!(e.is_timeout()),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_secs_reaches_client() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    mock.set_reply("predict", Reply::Delay(Duration::from_secs(3)));
    let config = roomcraft::Config {
        api_key: Some("test-key".to_string()),
        base_url: mock.base_url(),
        timeout_secs: 1,
        ..roomcraft::Config::default()
    };
    let client = Arc::new(GeminiClient::new(config.gemini()).unwrap());
    let session = DesignSession::new(Arc::new(Catalog::builtin()), client);
    select(&session, "bathroom", "white");

    let err = session.generate().await.unwrap_err();

    assert!(matches!(
        err,
        roomcraft::SessionError::Client(ClientError::Network(_))
    ));
    assert_eq!(session.status(), SessionStatus::Error);
    assert!(session.error().unwrap().starts_with("Failed to generate design:"));
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let config = GeminiConfig {
        base_url: mock.base_url(),
        ..GeminiConfig::default()
    };
    let client = GeminiClient::new(config).unwrap();

    assert!(matches!(
        client.generate("a room").await,
        Err(ClientError::Configuration)
    ));
    let image = GeneratedImage::new(b"source".to_vec());
    assert!(matches!(
        client.refine(&image, "brighter", "English").await,
        Err(ClientError::Configuration)
    ));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_refine_request_and_first_image_part() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let client = client_for(&mock);
    let source = GeneratedImage::new(b"source-jpeg".to_vec());

    let refined = client
        .refine(&source, "paint the ceiling white", "Uzbek")
        .await
        .unwrap();
    assert_eq!(refined.bytes(), REFINED);

    let requests = mock.requests();
    let request = &requests[0];
    assert_eq!(request.call, "gemini-2.5-flash-image:generateContent");
    assert_eq!(request.api_key.as_deref(), Some("test-key"));

    let parts = &request.body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], BASE64.encode(b"source-jpeg"));
    let text = parts[1]["text"].as_str().unwrap();
    assert!(text.contains("in Uzbek"));
    assert!(text.contains("\"paint the ceiling white\""));
    assert_eq!(
        request.body["generationConfig"]["responseModalities"],
        serde_json::json!(["IMAGE"])
    );
}

#[tokio::test]
async fn test_refine_text_only_answer() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let client = client_for(&mock);
    mock.set_reply(
        "generateContent",
        Reply::Json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot edit this image." }] } }]
        })),
    );
    let source = GeneratedImage::new(b"source".to_vec());

    let err = client.refine(&source, "remove the walls", "English").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyResult));
}

#[tokio::test]
async fn test_scripted_replies() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let client = client_for(&mock);
    mock.set_reply("predict", predict_reply(b"second render"));
    mock.set_reply("generateContent", content_reply(b"second edit"));

    let image = client.generate("a room").await.unwrap();
    assert_eq!(image.bytes(), b"second render");
    let refined = client.refine(&image, "warmer light", "English").await.unwrap();
    assert_eq!(refined.bytes(), b"second edit");
}

#[tokio::test]
async fn test_corrupt_payload_is_decode_error() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let client = client_for(&mock);
    mock.set_reply(
        "predict",
        Reply::Json(serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": "%%% not base64 %%%" }]
        })),
    );

    let err = client.generate("a room").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_session_end_to_end() {
    let mock = MockGemini::start().await.expect("Failed to start mock");
    let client = Arc::new(client_for(&mock));
    let session =
        DesignSession::new(Arc::new(Catalog::builtin()), client).with_language(Language::Ru);
    select(&session, "living-room", "warm-brown");

    let image = session.generate().await.unwrap();
    assert_eq!(image.bytes(), GENERATED);

    let refined = session.refine("добавь камин").await.unwrap();
    assert_eq!(refined.bytes(), REFINED);
    assert_eq!(session.status(), SessionStatus::Ready);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].body["instances"][0]["prompt"].as_str(),
        session.prompt_preview().as_deref()
    );
    let source = requests[1].body["contents"][0]["parts"][0]["inlineData"]["data"]
        .as_str()
        .unwrap();
    assert_eq!(BASE64.decode(source).unwrap(), GENERATED);
    assert!(requests[1].body["contents"][0]["parts"][1]["text"]
        .as_str()
        .unwrap()
        .contains("in Russian"));
}
