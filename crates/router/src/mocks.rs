//! Recording stand-ins for the provider ports, used by tests and demos.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveTime;

use crate::ports::{Clock, KnowledgePort, OpenerPort, WeatherPort};
use crate::responses::weather_sentence;
use crate::types::ProviderResult;

/// Arguments a stub was called with, shared with the test that built it.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn record(&self, argument: &str) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(argument.to_string());
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.calls().len()
    }
}

enum WeatherReply {
    Conditions { temperature: f64, description: String },
    Fixed(ProviderResult),
}

pub struct StubWeather {
    reply: WeatherReply,
    pub calls: CallLog,
}

impl StubWeather {
    /// Answers every place with the given conditions.
    pub fn reporting(temperature: f64, description: &str) -> Self {
        Self {
            reply: WeatherReply::Conditions {
                temperature,
                description: description.to_string(),
            },
            calls: CallLog::default(),
        }
    }

    pub fn returning(result: ProviderResult) -> Self {
        Self { reply: WeatherReply::Fixed(result), calls: CallLog::default() }
    }
}

#[async_trait]
impl WeatherPort for StubWeather {
    async fn fetch(&self, place: &str) -> ProviderResult {
        self.calls.record(place);
        match &self.reply {
            WeatherReply::Conditions { temperature, description } => {
                ProviderResult::Success(weather_sentence(place, temperature, description))
            }
            WeatherReply::Fixed(result) => result.clone(),
        }
    }
}

pub struct StubKnowledge {
    result: ProviderResult,
    pub calls: CallLog,
}

impl StubKnowledge {
    pub fn returning(result: ProviderResult) -> Self {
        Self { result, calls: CallLog::default() }
    }
}

#[async_trait]
impl KnowledgePort for StubKnowledge {
    async fn fetch(&self, topic: &str) -> ProviderResult {
        self.calls.record(topic);
        self.result.clone()
    }
}

/// Opener that accepts everything unless built with [`StubOpener::refusing`].
pub struct StubOpener {
    accept: bool,
    pub calls: CallLog,
}

impl StubOpener {
    pub fn accepting() -> Self {
        Self { accept: true, calls: CallLog::default() }
    }

    pub fn refusing() -> Self {
        Self { accept: false, calls: CallLog::default() }
    }
}

#[async_trait]
impl OpenerPort for StubOpener {
    async fn open(&self, address: &str) -> ProviderResult {
        self.calls.record(address);
        if self.accept {
            ProviderResult::Success(format!("Opening {}", address))
        } else {
            ProviderResult::ProviderError("viewer refused".to_string())
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}
