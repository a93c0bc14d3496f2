use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use providers::{build_http_client, OpenWeatherClient, SystemOpener, WikipediaClient};
use router::{CommandRouter, Responder};
use serde_json::json;
use speech::{SilentVoice, SpeechOutput, SystemVoice};
use stt::{GroqProvider, Listener, TranscriptionProvider};
use tracing::info;

use crate::constants::{commands, messages};
use crate::display;
use crate::session::{Session, TurnOutcome};
use crate::settings::AppSettings;

pub type AssistantRouter = CommandRouter<OpenWeatherClient, WikipediaClient, SystemOpener>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand<'a> {
    Text(&'a str),
    Speak,
    History,
    Help,
    Blank,
}

pub fn parse_input(line: &str) -> InputCommand<'_> {
    let trimmed = line.trim();
    let lower = trimmed.to_lowercase();

    if trimmed.is_empty() {
        InputCommand::Blank
    } else if commands::SPEAK.contains(&lower.as_str()) {
        InputCommand::Speak
    } else if lower == commands::HISTORY {
        InputCommand::History
    } else if lower == commands::HELP || lower == "?" {
        InputCommand::Help
    } else {
        InputCommand::Text(trimmed)
    }
}

/// Display surface wiring: one session, an optional microphone listener.
pub struct App<R: Responder, P: TranscriptionProvider> {
    session: Session<R>,
    listener: Option<Listener<P>>,
    history_size: usize,
}

impl<R: Responder, P: TranscriptionProvider> App<R, P> {
    pub fn new(session: Session<R>, listener: Option<Listener<P>>, history_size: usize) -> Self {
        Self { session, listener, history_size }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn voice_available(&self) -> bool {
        self.listener.is_some()
    }

    /// Handles one input line. Returns `true` when the session should end.
    pub async fn handle_line(&self, line: &str, out: &mut impl Write) -> Result<bool> {
        let outcome = match parse_input(line) {
            InputCommand::Blank => return Ok(false),
            InputCommand::Help => {
                display::print_help(out, self.voice_available())?;
                return Ok(false);
            }
            InputCommand::History => {
                display::print_history(out, &self.session.recent_history(self.history_size))?;
                return Ok(false);
            }
            InputCommand::Speak => match &self.listener {
                Some(listener) => {
                    writeln!(out, "{}", messages::LISTENING)?;
                    out.flush()?;
                    self.session.handle_voice(listener.listen().await).await
                }
                None => {
                    writeln!(out, "{}", messages::VOICE_UNAVAILABLE)?;
                    return Ok(false);
                }
            },
            InputCommand::Text(text) => match self.session.handle_text(text).await {
                Some(outcome) => outcome,
                None => return Ok(false),
            },
        };

        self.show(out, &outcome)?;
        Ok(outcome.ends_session)
    }

    fn show(&self, out: &mut impl Write, outcome: &TurnOutcome) -> Result<()> {
        display::print_response(out, &outcome.response)?;
        out.flush()?;
        Ok(())
    }
}

/// Builds the production app from settings.
pub async fn build_app(settings: &AppSettings) -> Result<App<AssistantRouter, GroqProvider>> {
    let http = build_http_client(settings.http_timeout()).context("Failed to build HTTP client")?;

    let weather = OpenWeatherClient::new(http.clone(), settings.openweather_api_key.clone())
        .with_base_url(settings.openweather_base_url.clone());
    let knowledge = WikipediaClient::new(http).with_api_url(settings.wikipedia_api_url.clone());
    let opener = if settings.dry_run_open {
        SystemOpener::dry_run()
    } else {
        SystemOpener::new()
    };
    let router = CommandRouter::new(weather, knowledge, opener);

    let speech: Arc<dyn SpeechOutput> = if settings.speech_enabled {
        Arc::new(SystemVoice::new())
    } else {
        Arc::new(SilentVoice)
    };
    info!("speech output: {}", speech.name());

    let listener = match &settings.groq_api_key {
        Some(key) => {
            let mut provider = GroqProvider::new();
            provider.initialize(json!({ "api_key": key })).await?;
            Some(Listener::new(provider, settings.listen_window()))
        }
        None => None,
    };

    Ok(App::new(Session::new(router, speech), listener, settings.history_size))
}
