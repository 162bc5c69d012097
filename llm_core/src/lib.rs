//! Gemini API collaborators: podcast script generation and streaming
//! multi-speaker speech synthesis.
//!
//! The audio assembly core consumes this crate only through the
//! `audio_core::AudioSource` trait, so everything vendor-specific
//! (endpoints, request schema, SSE transport) stays here.

mod schema;
pub mod script;
pub mod tts;
pub mod voices;

pub use script::{ScriptError, ScriptRequest};
pub use tts::{SpeakerVoice, TtsSource};
pub use voices::{accent_instruction, select_voices};

use anyhow::Result;

pub(crate) const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_SCRIPT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

#[derive(Clone)]
pub struct GeminiClient {
    pub(crate) api_key: String,
    pub(crate) http: reqwest::Client,
    pub(crate) script_model: String,
    pub(crate) tts_model: String,
}

impl GeminiClient {
    /// Create a new client. The API key must be supplied by the caller;
    /// there is no fallback key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            anyhow::bail!("Gemini API key must not be empty");
        }
        Ok(Self {
            api_key,
            http: reqwest::Client::new(),
            script_model: DEFAULT_SCRIPT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
        })
    }

    pub fn with_models(mut self, script_model: &str, tts_model: &str) -> Self {
        self.script_model = script_model.to_string();
        self.tts_model = tts_model.to_string();
        self
    }

    /// Single-shot text generation via `generateContent`.
    pub(crate) async fn generate_text(
        &self,
        prompt: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<String> {
        let url = format!("{API_BASE}/{}:generateContent", self.script_model);
        let body = schema::GenerateContentRequest {
            contents: vec![schema::Content {
                role: "user",
                parts: vec![schema::Part { text: prompt }],
            }],
            generation_config: schema::GenerationConfig {
                temperature,
                max_output_tokens: Some(max_output_tokens),
                response_modalities: None,
                speech_config: None,
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<schema::GenerateContentResponse>()
            .await?;

        Ok(response.first_text().unwrap_or_default())
    }
}
