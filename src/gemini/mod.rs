//! Google Gemini integration
//!
//! Provides:
//! - Text-to-image generation via the Imagen `:predict` endpoint
//! - Image editing via the Gemini `:generateContent` endpoint
//!
//! The API key is injected through `GeminiConfig`; the client never reads
//! process environment itself.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::images::{ClientError, GeneratedImage, ImageGenerator, ImageRefiner};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default text-to-image model
pub const DEFAULT_GENERATION_MODEL: &str = "imagen-4.0-generate-001";

/// Default image-edit model
pub const DEFAULT_REFINEMENT_MODEL: &str = "gemini-2.5-flash-image";

/// Aspect ratio requested for every generated image
pub const ASPECT_RATIO: &str = "16:9";

/// Client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` or empty means unconfigured
    pub api_key: Option<String>,
    pub base_url: String,
    pub generation_model: String,
    pub refinement_model: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            refinement_model: DEFAULT_REFINEMENT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl GeminiConfig {
    /// Configuration with the given key and default endpoints
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

/// Imagen predict request
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PredictInstance<'a>>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: &'static str,
    output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: &'static str,
}

/// Imagen predict response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PredictResponse {
    predictions: Vec<Prediction>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

/// generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// generateContent response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<Content>,
}

impl ContentResponse {
    /// Payload of the first part carrying inline image data
    fn first_image_data(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
            .find(|data| !data.is_empty())
    }
}

/// Edit instruction sent alongside the source image
pub fn refinement_instruction(instruction: &str, language: &str) -> String {
    format!(
        "Based on the user's instruction in {}, edit the provided image. The instruction is: \"{}\"",
        language, instruction
    )
}

/// Gemini API client
#[derive(Debug)]
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Check if API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    /// POST a JSON body and decode the JSON response
    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let api_key = self.api_key().ok_or(ClientError::Configuration)?;

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API error: {} - {}", status, body);
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError> {
        if !self.is_configured() {
            return Err(ClientError::Configuration);
        }

        let request = PredictRequest {
            instances: vec![PredictInstance { prompt }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: ASPECT_RATIO,
                output_options: OutputOptions {
                    mime_type: GeneratedImage::MIME_TYPE,
                },
            },
        };

        let model = &self.config.generation_model;
        debug!("Sending image generation request to Gemini API: {}", model);

        let response: PredictResponse = self
            .post(&self.endpoint(model, "predict"), &request)
            .await?;

        let data = response
            .predictions
            .iter()
            .filter_map(|p| p.bytes_base64_encoded.as_deref())
            .find(|data| !data.is_empty())
            .ok_or(ClientError::EmptyResult)?;

        let image = GeneratedImage::from_base64(data)?;
        info!("Generated image: {} bytes, sha256 {}", image.len(), image.digest());
        Ok(image)
    }
}

#[async_trait]
impl ImageRefiner for GeminiClient {
    async fn refine(
        &self,
        image: &GeneratedImage,
        instruction: &str,
        language: &str,
    ) -> Result<GeneratedImage, ClientError> {
        if !self.is_configured() {
            return Err(ClientError::Configuration);
        }

        let request = ContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: GeneratedImage::MIME_TYPE.to_string(),
                            data: image.to_base64(),
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(refinement_instruction(instruction, language)),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        };

        let model = &self.config.refinement_model;
        debug!(
            "Sending image edit request to Gemini API: {} ({} source bytes)",
            model,
            image.len()
        );

        let response: ContentResponse = self
            .post(&self.endpoint(model, "generateContent"), &request)
            .await?;

        let data = response
            .first_image_data()
            .ok_or(ClientError::EmptyResult)?;

        let refined = GeneratedImage::from_base64(data)?;
        info!(
            "Refined image: {} bytes, sha256 {}",
            refined.len(),
            refined.digest()
        );
        Ok(refined)
    }
}
