use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use assistant::app::{parse_input, App, InputCommand};
use assistant::Session;
use async_trait::async_trait;
use chrono::NaiveTime;
use router::mocks::{FixedClock, StubKnowledge, StubOpener, StubWeather};
use router::{CommandRouter, ProviderResult, Responder, Speaker};
use speech::SpeechOutput;
use stt::{Listener, TranscriptionProvider, TranscriptionResult};

type TestRouter = CommandRouter<StubWeather, StubKnowledge, StubOpener, FixedClock>;

#[derive(Default)]
struct RecordingVoice {
    spoken: Mutex<Vec<String>>,
}

impl RecordingVoice {
    fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechOutput for RecordingVoice {
    fn speak(&self, text: &str) -> Result<()> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

struct BrokenVoice;

impl SpeechOutput for BrokenVoice {
    fn speak(&self, _text: &str) -> Result<()> {
        Err(anyhow!("no audio device"))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

struct CannedTranscriber(&'static str);

#[async_trait]
impl TranscriptionProvider for CannedTranscriber {
    async fn initialize(&mut self, _config: serde_json::Value) -> Result<()> {
        Ok(())
    }

    async fn transcribe(&self, _audio_data: Vec<u8>) -> Result<TranscriptionResult> {
        Ok(TranscriptionResult { text: self.0.to_string(), language: None })
    }

    fn name(&self) -> &str {
        "canned"
    }

    fn is_ready(&self) -> bool {
        true
    }
}

fn test_router() -> TestRouter {
    CommandRouter::with_clock(
        StubWeather::reporting(28.5, "clear sky"),
        StubKnowledge::returning(ProviderResult::success("Ada Lovelace was a mathematician.")),
        StubOpener::accepting(),
        FixedClock(NaiveTime::from_hms_opt(9, 5, 7).unwrap()),
    )
}

fn session_with(voice: Arc<dyn SpeechOutput>) -> Session<TestRouter> {
    Session::new(test_router(), voice)
}

fn fake_capture(_window: std::time::Duration) -> Result<Vec<u8>> {
    Ok(vec![0; 4])
}

fn failing_capture(_window: std::time::Duration) -> Result<Vec<u8>> {
    Err(anyhow!("No input device available"))
}

#[tokio::test]
async fn test_typed_turn_records_and_speaks_response() {
    let voice = Arc::new(RecordingVoice::default());
    let session = session_with(voice.clone());

    let outcome = session.handle_text("What time is it").await.unwrap();

    assert_eq!(outcome.response, "The current time is 09:05:07.");
    assert!(!outcome.ends_session);
    assert_eq!(session.latest_response(), outcome.response);
    assert_eq!(session.last_spoken(), outcome.response);
    assert_eq!(voice.spoken(), vec![outcome.response.clone()]);

    let history = session.recent_history(10);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].speaker, Speaker::User);
    assert_eq!(history[0].text, "What time is it");
    assert_eq!(history[1].speaker, Speaker::Assistant);
}

#[tokio::test]
async fn test_blank_input_is_not_a_turn() {
    let voice = Arc::new(RecordingVoice::default());
    let session = session_with(voice.clone());

    assert!(session.handle_text("   ").await.is_none());
    assert_eq!(session.history_len(), 0);
    assert!(voice.spoken().is_empty());
}

#[tokio::test]
async fn test_exit_ends_session_with_farewell() {
    let session = session_with(Arc::new(RecordingVoice::default()));

    let outcome = session.handle_text("Quit please").await.unwrap();
    assert_eq!(outcome.response, "Goodbye!");
    assert!(outcome.ends_session);
}

#[tokio::test]
async fn test_typed_input_is_lowercased_before_routing() {
    let session = session_with(Arc::new(RecordingVoice::default()));

    let outcome = session.handle_text("WEATHER IN PARIS").await.unwrap();
    assert_eq!(outcome.response, "The temperature in paris is 28.5°C with clear sky.");
}

#[tokio::test]
async fn test_failed_speech_keeps_previous_last_spoken() {
    let session = session_with(Arc::new(BrokenVoice));

    let outcome = session.handle_text("who is ada lovelace").await.unwrap();
    assert_eq!(outcome.response, "Ada Lovelace was a mathematician.");
    assert_eq!(session.latest_response(), outcome.response);
    assert_eq!(session.last_spoken(), "");
}

#[tokio::test]
async fn test_voice_failure_is_answered_as_empty_input() {
    let session = session_with(Arc::new(RecordingVoice::default()));

    let outcome = session.handle_voice(Err(anyhow!("could not understand audio"))).await;
    assert_eq!(outcome.response, "I didn't catch that. Please try again.");
    assert!(!outcome.ends_session);

    let history = session.recent_history(10);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].speaker, Speaker::Assistant);
}

#[tokio::test]
async fn test_recent_history_returns_last_entries_in_order() {
    let session = session_with(Arc::new(RecordingVoice::default()));

    for i in 0..8 {
        session.handle_text(&format!("search wikipedia for topic {}", i)).await.unwrap();
    }

    assert_eq!(session.history_len(), 16);
    let recent = session.recent_history(10);
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].text, "search wikipedia for topic 3");
    assert_eq!(recent[9].speaker, Speaker::Assistant);
}

#[tokio::test]
async fn test_app_prints_response_and_reports_exit() {
    let app: App<TestRouter, CannedTranscriber> =
        App::new(session_with(Arc::new(RecordingVoice::default())), None, 10);
    let mut out = Vec::new();

    assert!(!app.handle_line("open github\n", &mut out).await.unwrap());
    assert!(app.handle_line("exit\n", &mut out).await.unwrap());

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Opening https://www.github.com"));
    assert!(printed.contains("Goodbye!"));
}

#[tokio::test]
async fn test_app_history_and_help_are_not_turns() {
    let app: App<TestRouter, CannedTranscriber> =
        App::new(session_with(Arc::new(RecordingVoice::default())), None, 10);
    let mut out = Vec::new();

    app.handle_line(":history", &mut out).await.unwrap();
    app.handle_line(":help", &mut out).await.unwrap();
    app.handle_line(":speak", &mut out).await.unwrap();
    app.handle_line("", &mut out).await.unwrap();

    assert_eq!(app.session().history_len(), 0);
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("No commands yet."));
    assert!(printed.contains("Voice input is unavailable"));
}

#[tokio::test]
async fn test_app_routes_spoken_command() {
    let listener = Listener::with_capture(
        CannedTranscriber("Temperature in Lucknow"),
        std::time::Duration::from_millis(10),
        fake_capture,
    );
    let app = App::new(session_with(Arc::new(RecordingVoice::default())), Some(listener), 10);
    let mut out = Vec::new();

    assert!(app.voice_available());
    app.handle_line(":listen", &mut out).await.unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Listening..."));
    assert!(printed.contains("The temperature in lucknow is 28.5°C with clear sky."));
    assert_eq!(app.session().recent_history(1)[0].speaker, Speaker::Assistant);
}

#[tokio::test]
async fn test_app_microphone_failure_still_answers() {
    let listener = Listener::with_capture(
        CannedTranscriber("unused"),
        std::time::Duration::from_millis(10),
        failing_capture,
    );
    let app = App::new(session_with(Arc::new(RecordingVoice::default())), Some(listener), 10);
    let mut out = Vec::new();

    app.handle_line(":speak", &mut out).await.unwrap();
    assert_eq!(app.session().latest_response(), "I didn't catch that. Please try again.");
}

#[test]
fn test_parse_input_keeps_command_casing() {
    assert_eq!(parse_input("Who is Ada "), InputCommand::Text("Who is Ada"));
    assert_eq!(parse_input(":HISTORY"), InputCommand::History);
}

#[tokio::test]
async fn test_router_is_usable_as_responder_directly() {
    let router = test_router();
    assert_eq!(router.respond("").await, "I didn't catch that. Please try again.");
}
