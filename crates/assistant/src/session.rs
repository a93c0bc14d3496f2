use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use router::{classify, ConversationLog, ConversationRecord, Intent, Responder};
use speech::SpeechOutput;
use tracing::{debug, warn};

/// What the display surface needs after one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub response: String,
    /// The user asked to leave.
    pub ends_session: bool,
}

#[derive(Debug, Default)]
struct TurnState {
    response: String,
    last_spoken: String,
}

/// Per-process conversation context: latest response, last spoken text and
/// the conversation log.
///
/// Turns run one at a time, but the log and turn state sit behind mutexes so
/// a multi-threaded host can append and read history consistently.
pub struct Session<R: Responder> {
    router: R,
    speech: Arc<dyn SpeechOutput>,
    log: Mutex<ConversationLog>,
    state: Mutex<TurnState>,
}

impl<R: Responder> Session<R> {
    pub fn new(router: R, speech: Arc<dyn SpeechOutput>) -> Self {
        Self {
            router,
            speech,
            log: Mutex::new(ConversationLog::new()),
            state: Mutex::new(TurnState::default()),
        }
    }

    /// A typed command. Blank input is not a turn and returns `None`.
    pub async fn handle_text(&self, input: &str) -> Option<TurnOutcome> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        self.lock_log().add_user_message(input);
        Some(self.run_turn(&input.to_lowercase()).await)
    }

    /// A spoken command. A failed capture or transcription counts as an empty
    /// utterance, which the router answers with its "didn't catch that" line.
    pub async fn handle_voice(&self, transcript: Result<String>) -> TurnOutcome {
        match transcript {
            Ok(text) => {
                self.lock_log().add_user_message(text.as_str());
                self.run_turn(&text.to_lowercase()).await
            }
            Err(e) => {
                warn!("voice input failed: {:#}", e);
                self.run_turn("").await
            }
        }
    }

    pub fn latest_response(&self) -> String {
        self.lock_state().response.clone()
    }

    pub fn last_spoken(&self) -> String {
        self.lock_state().last_spoken.clone()
    }

    /// The last `count` log records, oldest first.
    pub fn recent_history(&self, count: usize) -> Vec<ConversationRecord> {
        self.lock_log().recent(count).to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.lock_log().len()
    }

    async fn run_turn(&self, utterance: &str) -> TurnOutcome {
        let response = self.router.respond(utterance).await;
        let ends_session = classify(utterance) == Intent::Exit;
        debug!("turn utterance=\"{}\" ends_session={}", utterance, ends_session);

        self.lock_log().add_assistant_message(response.as_str());
        self.lock_state().response = response.clone();
        self.speak(&response).await;

        TurnOutcome { response, ends_session }
    }

    async fn speak(&self, text: &str) {
        let speech = Arc::clone(&self.speech);
        let owned = text.to_string();

        match tokio::task::spawn_blocking(move || speech.speak(&owned)).await {
            Ok(Ok(())) => self.lock_state().last_spoken = text.to_string(),
            Ok(Err(e)) => warn!("speech output failed: {:#}", e),
            Err(e) => warn!("speech task failed: {}", e),
        }
    }

    fn lock_log(&self) -> MutexGuard<'_, ConversationLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_state(&self) -> MutexGuard<'_, TurnState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
