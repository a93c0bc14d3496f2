use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub language: Option<String>,
}

#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Initialize the provider with necessary configuration
    async fn initialize(&mut self, config: serde_json::Value) -> Result<()>;

    /// Transcribe audio data (WAV format) to text
    async fn transcribe(&self, audio_data: Vec<u8>) -> Result<TranscriptionResult>;

    fn name(&self) -> &str;

    fn is_ready(&self) -> bool;
}
