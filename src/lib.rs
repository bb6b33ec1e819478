//! roomcraft - AI room design
//!
//! Turns a room design (room type, wall color, furniture, decor, camera
//! perspective) into a photorealistic image prompt, drives image generation
//! and natural-language refinement, and exports designs as portable JSON.

pub mod catalog;
pub mod design;
pub mod gemini;
pub mod images;
pub mod session;

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub use catalog::Catalog;
pub use design::{Category, Perspective, SavedDesign, SelectionState};
pub use gemini::{GeminiClient, GeminiConfig};
pub use images::{ClientError, GeneratedImage, ImageGenerator, ImageRefiner};
pub use session::{DesignSession, Language, SessionError, SessionStatus};

/// Default configuration file name
pub const CONFIG_FILE: &str = "roomcraft.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini API key
    pub api_key: Option<String>,
    pub base_url: String,
    pub generation_model: String,
    pub refinement_model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Language refinement instructions are written in
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        let gemini = GeminiConfig::default();
        Self {
            api_key: None,
            base_url: gemini.base_url,
            generation_model: gemini.generation_model,
            refinement_model: gemini.refinement_model,
            timeout_secs: gemini.timeout.as_secs(),
            language: Language::default(),
        }
    }
}

impl Config {
    /// Layered sources: defaults, TOML file, `GEMINI_API_KEY`, `ROOMCRAFT_*`
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::raw().only(&["GEMINI_API_KEY"]).map(|_| "api_key".into()))
            .merge(Env::prefixed("ROOMCRAFT_"))
    }

    /// Load configuration from the standard sources
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::from_figment(Self::figment(path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    /// Client configuration derived from this config
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            generation_model: self.generation_model.clone(),
            refinement_model: self.refinement_model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
