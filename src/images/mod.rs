//! Generated images and the backends that produce them
//!
//! Provides:
//! - `GeneratedImage`, the single image a session holds
//! - `ImageGenerator` / `ImageRefiner`, the seams between the session and
//!   the remote image models
//! - `ClientError`, the failure taxonomy shared by all backends

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from an image backend call
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API key not configured")]
    Configuration,

    #[error("no image data returned from API")]
    EmptyResult,

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("invalid image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A JPEG produced by generation or refinement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    bytes: Vec<u8>,
}

impl GeneratedImage {
    pub const ENCODING: &'static str = "jpeg";
    pub const MIME_TYPE: &'static str = "image/jpeg";

    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Decode a base64 payload as returned by the upstream APIs
    pub fn from_base64(data: &str) -> Result<Self, ClientError> {
        Ok(Self::new(BASE64.decode(data.trim())?))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn encoding(&self) -> &'static str {
        Self::ENCODING
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// `data:` URL suitable for an `<img src>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", Self::MIME_TYPE, self.to_base64())
    }

    /// SHA-256 of the image bytes, hex encoded
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Text-to-image backend
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Produce exactly one 16:9 JPEG for the prompt
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError>;
}

/// Image-edit backend
#[async_trait]
pub trait ImageRefiner: Send + Sync {
    /// Edit `image` according to `instruction`, written in `language`
    async fn refine(
        &self,
        image: &GeneratedImage,
        instruction: &str,
        language: &str,
    ) -> Result<GeneratedImage, ClientError>;
}
