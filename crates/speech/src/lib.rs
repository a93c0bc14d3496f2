use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::debug;

#[cfg(all(feature = "system-voice", not(target_os = "macos")))]
use tts::Tts as LocalTts;

/// Pause after playback so consecutive turns don't run together.
const TRAILING_PAUSE: Duration = Duration::from_millis(300);

#[cfg(all(feature = "system-voice", not(target_os = "macos")))]
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Name fragments of voices that sound female on common platforms.
const PREFERRED_VOICE_HINTS: &[&str] = &["female", "zira"];

/// Whether [`SystemVoice`] can speak in this build: the `say` command on macOS,
/// the `tts` engine elsewhere when built with the `system-voice` feature.
pub const SYSTEM_VOICE_AVAILABLE: bool = cfg!(any(feature = "system-voice", target_os = "macos"));

/// Synchronous speech playback.
pub trait SpeechOutput: Send + Sync {
    /// Speaks `text` and returns once playback has finished.
    fn speak(&self, text: &str) -> Result<()>;
    fn name(&self) -> &str;
}

/// System voice. A fresh engine is created for every call and dropped after
/// playback, so nothing holds the audio device between turns.
pub struct SystemVoice {
    voice_name: String,
}

impl SystemVoice {
    pub fn new() -> Self {
        Self {
            voice_name: "System Voice".to_string(),
        }
    }
}

impl Default for SystemVoice {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechOutput for SystemVoice {
    fn speak(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(anyhow!("speech input text was empty"));
        }
        debug!(
            "speaking: {:?}...",
            text.chars().take(50).collect::<String>()
        );

        speak_blocking(text)?;
        std::thread::sleep(TRAILING_PAUSE);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.voice_name
    }
}

// The tts crate is unreliable on macOS, so use the `say` command there
#[cfg(target_os = "macos")]
fn speak_blocking(text: &str) -> Result<()> {
    use anyhow::Context;
    use std::process::Command;

    let status = Command::new("/usr/bin/say")
        .arg("-r")
        .arg("200")
        .arg(text)
        .status()
        .context("Failed to run macOS say command")?;

    if !status.success() {
        return Err(anyhow!("say exited with {}", status));
    }
    Ok(())
}

#[cfg(all(feature = "system-voice", not(target_os = "macos")))]
fn speak_blocking(text: &str) -> Result<()> {
    let mut engine = LocalTts::default().map_err(|e| anyhow!("Failed to initialize local TTS: {}", e))?;

    if engine.supported_features().voice {
        select_preferred_voice(&mut engine);
    }

    engine
        .speak(text, false)
        .map_err(|e| anyhow!("Failed to speak text: {}", e))?;

    // speak() only queues the utterance; wait until the engine goes quiet
    if engine.supported_features().is_speaking {
        while engine.is_speaking().unwrap_or(false) {
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    let _ = engine.stop();
    Ok(())
}

#[cfg(all(feature = "system-voice", not(target_os = "macos")))]
fn select_preferred_voice(engine: &mut LocalTts) {
    let Ok(voices) = engine.voices() else {
        return;
    };

    let candidates: Vec<(String, bool)> = voices
        .iter()
        .map(|v| (v.name(), matches!(v.gender(), Some(tts::Gender::Female))))
        .collect();

    if let Some(index) = preferred_voice_index(&candidates) {
        let voice = &voices[index];
        match engine.set_voice(voice) {
            Ok(()) => tracing::info!("using voice {}", voice.name()),
            Err(e) => debug!("could not select voice {}: {}", voice.name(), e),
        }
    }
}

#[cfg(not(any(feature = "system-voice", target_os = "macos")))]
fn speak_blocking(_text: &str) -> Result<()> {
    Err(anyhow!("system voice unavailable: built without the system-voice feature"))
}

/// First voice that is tagged female or whose name suggests it.
pub fn preferred_voice_index(voices: &[(String, bool)]) -> Option<usize> {
    voices.iter().position(|(name, female)| {
        let lower = name.to_lowercase();
        *female || PREFERRED_VOICE_HINTS.iter().any(|hint| lower.contains(hint))
    })
}

/// Does nothing; used when speech is switched off.
#[derive(Debug, Default)]
pub struct SilentVoice;

impl SpeechOutput for SilentVoice {
    fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(name: &str, female: bool) -> (String, bool) {
        (name.to_string(), female)
    }

    #[test]
    fn test_prefers_tagged_female_voice() {
        let voices = vec![voice("David", false), voice("Hazel", true), voice("Zira", false)];
        assert_eq!(preferred_voice_index(&voices), Some(1));
    }

    #[test]
    fn test_falls_back_to_name_hints() {
        let voices = vec![
            voice("Microsoft David Desktop", false),
            voice("Microsoft Zira Desktop", false),
        ];
        assert_eq!(preferred_voice_index(&voices), Some(1));

        let voices = vec![voice("English (Female)", false)];
        assert_eq!(preferred_voice_index(&voices), Some(0));
    }

    #[test]
    fn test_no_preferred_voice() {
        let voices = vec![voice("Alex", false), voice("Daniel", false)];
        assert_eq!(preferred_voice_index(&voices), None);
        assert_eq!(preferred_voice_index(&[]), None);
    }

    #[test]
    fn test_silent_voice() {
        let voice = SilentVoice;
        assert!(voice.speak("Goodbye!").is_ok());
        assert_eq!(voice.name(), "silent");
    }
}
