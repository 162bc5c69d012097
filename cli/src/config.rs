// Configuration for the podcast generator CLI

use std::path::PathBuf;

use anyhow::Context;

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub output_dir: PathBuf,
    pub script_model: String,
    pub tts_model: String,
}

impl Config {
    /// Load from the environment. The API key is mandatory: there is no
    /// embedded fallback, so a missing key is a startup error.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .context("GEMINI_API_KEY is not set; export it or add it to .env")?;

        let output_dir: PathBuf = std::env::var("OUTPUT_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "generated_podcasts".to_string())
            .into();

        let script_model = std::env::var("SCRIPT_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| llm_core::DEFAULT_SCRIPT_MODEL.to_string());

        let tts_model = std::env::var("TTS_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| llm_core::DEFAULT_TTS_MODEL.to_string());

        Ok(Self {
            api_key,
            output_dir,
            script_model,
            tts_model,
        })
    }
}
