use async_trait::async_trait;
use tracing::{debug, warn};

use crate::intent::{classify, normalize_address, Intent};
use crate::ports::{Clock, KnowledgePort, OpenerPort, Responder, SystemClock, WeatherPort};
use crate::responses;
use crate::types::ProviderResult;

/// Keyword router: one utterance in, one response line out.
///
/// Holds no per-turn state, so the same utterance against the same provider
/// answers always produces the same text.
pub struct CommandRouter<W, K, O, C = SystemClock> {
    weather: W,
    knowledge: K,
    opener: O,
    clock: C,
}

impl<W, K, O> CommandRouter<W, K, O, SystemClock>
where
    W: WeatherPort,
    K: KnowledgePort,
    O: OpenerPort,
{
    pub fn new(weather: W, knowledge: K, opener: O) -> Self {
        Self::with_clock(weather, knowledge, opener, SystemClock)
    }
}

impl<W, K, O, C> CommandRouter<W, K, O, C>
where
    W: WeatherPort,
    K: KnowledgePort,
    O: OpenerPort,
    C: Clock,
{
    pub fn with_clock(weather: W, knowledge: K, opener: O, clock: C) -> Self {
        Self { weather, knowledge, opener, clock }
    }

    /// Classifies the utterance and answers it, calling at most one provider.
    pub async fn classify_and_respond(&self, utterance: &str) -> String {
        if utterance.trim().is_empty() {
            debug!("empty utterance");
            return responses::EMPTY_INPUT.to_string();
        }

        let intent = classify(utterance);
        debug!(kind = ?intent.kind(), argument = ?intent.argument(), "classified utterance");
        self.respond_to(intent).await
    }

    pub async fn respond_to(&self, intent: Intent) -> String {
        match intent {
            Intent::Weather(Some(place)) | Intent::Temperature(Some(place)) => {
                let result = self.weather.fetch(&place).await;
                log_failure("weather", &result);
                responses::render_weather(result)
            }
            Intent::Weather(None) => responses::WEATHER_NEEDS_PLACE.to_string(),
            Intent::Temperature(None) => responses::TEMPERATURE_NEEDS_PLACE.to_string(),
            Intent::OpenResource(Some(target)) => {
                let address = normalize_address(&target);
                let result = self.opener.open(&address).await;
                log_failure("opener", &result);
                responses::render_open(&address, result)
            }
            Intent::OpenResource(None) => responses::OPEN_NEEDS_TARGET.to_string(),
            Intent::TellTime => responses::time_sentence(self.clock.now()),
            Intent::KnowledgeLookup(Some(topic)) => {
                let result = self.knowledge.fetch(&topic).await;
                log_failure("knowledge", &result);
                responses::render_knowledge(result)
            }
            Intent::KnowledgeLookup(None) => responses::KNOWLEDGE_NEEDS_TOPIC.to_string(),
            Intent::Exit => responses::FAREWELL.to_string(),
            Intent::Unrecognized => responses::UNRECOGNIZED.to_string(),
        }
    }
}

#[async_trait]
impl<W, K, O, C> Responder for CommandRouter<W, K, O, C>
where
    W: WeatherPort,
    K: KnowledgePort,
    O: OpenerPort,
    C: Clock,
{
    async fn respond(&self, utterance: &str) -> String {
        self.classify_and_respond(utterance).await
    }
}

fn log_failure(provider: &str, result: &ProviderResult) {
    match result {
        ProviderResult::ProviderError(reason) => warn!(provider, %reason, "provider failed"),
        ProviderResult::NotFound(context) => debug!(provider, %context, "provider found nothing"),
        _ => {}
    }
}
