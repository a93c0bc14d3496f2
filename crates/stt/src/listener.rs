use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::capture::capture_wav;
use crate::traits::TranscriptionProvider;

type CaptureFn = fn(Duration) -> Result<Vec<u8>>;

/// Records one spoken command and returns its transcript.
pub struct Listener<P: TranscriptionProvider> {
    provider: P,
    window: Duration,
    capture: CaptureFn,
}

impl<P: TranscriptionProvider> Listener<P> {
    pub fn new(provider: P, window: Duration) -> Self {
        Self::with_capture(provider, window, capture_wav)
    }

    pub fn with_capture(provider: P, window: Duration, capture: CaptureFn) -> Self {
        Self { provider, window, capture }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Captures audio for the configured window and transcribes it.
    ///
    /// Capture runs on the blocking pool. An empty transcript is an error, so
    /// callers only ever see real text on `Ok`.
    pub async fn listen(&self) -> Result<String> {
        let capture = self.capture;
        let window = self.window;
        info!("listening for {:.1}s", window.as_secs_f32());

        let wav = tokio::task::spawn_blocking(move || capture(window))
            .await
            .context("audio capture task failed")??;
        debug!("captured {} bytes of audio", wav.len());

        let result = self
            .provider
            .transcribe(wav)
            .await
            .with_context(|| format!("{} transcription failed", self.provider.name()))?;

        let text = result.text.trim().to_string();
        if text.is_empty() {
            return Err(anyhow!("could not understand audio"));
        }
        info!("transcribed \"{}\"", text);
        Ok(text)
    }
}
