use std::time::Duration;

use anyhow::{anyhow, Result};

/// Records from the default input device for `window` and returns 16kHz mono WAV.
///
/// Blocks the calling thread for the whole window.
#[cfg(feature = "microphone")]
pub fn capture_wav(window: Duration) -> Result<Vec<u8>> {
    use anyhow::Context;

    use crate::recorder::AudioRecorder;

    let mut recorder = AudioRecorder::new();
    recorder.start_recording().context("Failed to start microphone")?;
    std::thread::sleep(window);
    let samples = recorder.stop_recording();

    if samples.is_empty() {
        return Err(anyhow!("no audio captured"));
    }
    recorder.samples_to_wav(&samples)
}

#[cfg(not(feature = "microphone"))]
pub fn capture_wav(_window: Duration) -> Result<Vec<u8>> {
    Err(anyhow!("microphone capture unavailable: built without the microphone feature"))
}
