use async_trait::async_trait;
use chrono::NaiveTime;

use crate::types::ProviderResult;

#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Current conditions for a place, already phrased for display on success.
    async fn fetch(&self, place: &str) -> ProviderResult;
}

#[async_trait]
pub trait KnowledgePort: Send + Sync {
    /// Short summary for a topic.
    async fn fetch(&self, topic: &str) -> ProviderResult;
}

#[async_trait]
pub trait OpenerPort: Send + Sync {
    /// Hands a fully qualified address to the platform viewer. Does not wait for it.
    async fn open(&self, address: &str) -> ProviderResult;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// Anything that can answer one utterance with one response line.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, utterance: &str) -> String;
}
