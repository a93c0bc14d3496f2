use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::traits::{TranscriptionProvider, TranscriptionResult};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "whisper-large-v3-turbo";
const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct GroqResponse {
    text: String,
}

/// Whisper transcription through Groq's OpenAI-compatible endpoint.
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    language: String,
}

impl GroqProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for GroqProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptionProvider for GroqProvider {
    /// Expects `api_key`; `base_url`, `model` and `language` are optional overrides.
    async fn initialize(&mut self, config: serde_json::Value) -> Result<()> {
        let api_key = config
            .get("api_key")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Missing api_key in config"))?;
        self.api_key = Some(api_key.to_string());

        if let Some(base_url) = config.get("base_url").and_then(|v| v.as_str()) {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = config.get("model").and_then(|v| v.as_str()) {
            self.model = model.to_string();
        }
        if let Some(language) = config.get("language").and_then(|v| v.as_str()) {
            self.language = language.to_string();
        }
        Ok(())
    }

    async fn transcribe(&self, audio_data: Vec<u8>) -> Result<TranscriptionResult> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("Provider not initialized"))?;

        let form = self.build_transcription_form(audio_data)?;
        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;
        let text = handle_transcription_response(response).await?;

        Ok(TranscriptionResult {
            text,
            language: Some(self.language.clone()),
        })
    }

    fn name(&self) -> &str {
        "groq"
    }

    fn is_ready(&self) -> bool {
        self.api_key.is_some()
    }
}

impl GroqProvider {
    fn build_transcription_form(&self, wav_data: Vec<u8>) -> Result<multipart::Form> {
        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .text("language", self.language.clone())
            .part(
                "file",
                multipart::Part::bytes(wav_data)
                    .file_name("audio.wav")
                    .mime_str("audio/wav")?,
            );

        Ok(form)
    }
}

async fn handle_transcription_response(response: reqwest::Response) -> Result<String> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Groq API error {}: {}", status, error_text));
    }

    let transcription: GroqResponse = response.json().await?;
    Ok(transcription.text)
}
