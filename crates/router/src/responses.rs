use std::fmt::Display;

use chrono::NaiveTime;

use crate::types::{ProviderResult, MAX_CHOICES};

pub const EMPTY_INPUT: &str = "I didn't catch that. Please try again.";
pub const WEATHER_NEEDS_PLACE: &str = "Please specify a city. Example: 'weather in Lucknow'.";
pub const TEMPERATURE_NEEDS_PLACE: &str = "Please specify a city for temperature.";
pub const OPEN_NEEDS_TARGET: &str = "Please specify a website to open.";
pub const KNOWLEDGE_NEEDS_TOPIC: &str = "Please specify what you want to search on Wikipedia.";
pub const FAREWELL: &str = "Goodbye!";
pub const UNRECOGNIZED: &str =
    "Sorry, I didn't understand that. Try asking about weather, time, Wikipedia, or opening a website.";
pub const NO_INFORMATION: &str = "No information found.";
pub const WEATHER_UNAVAILABLE: &str = "Sorry, the weather service is unavailable right now.";
pub const KNOWLEDGE_UNAVAILABLE: &str = "Sorry, the knowledge service is unavailable right now.";

/// Sentence used by weather providers for a successful lookup.
pub fn weather_sentence(place: &str, temperature: impl Display, description: &str) -> String {
    format!(
        "The temperature in {} is {}°C with {}.",
        place, temperature, description
    )
}

pub fn time_sentence(time: NaiveTime) -> String {
    format!("The current time is {}.", time.format("%H:%M:%S"))
}

pub fn render_weather(result: ProviderResult) -> String {
    match result {
        ProviderResult::Success(text) => text,
        ProviderResult::NotFound(place) => format!("Could not find weather data for {}.", place),
        ProviderResult::AmbiguousChoices(choices) => format!(
            "Could not find weather data for {}.",
            choices.first().map(String::as_str).unwrap_or("that place")
        ),
        ProviderResult::ProviderError(_) => WEATHER_UNAVAILABLE.to_string(),
    }
}

pub fn render_knowledge(result: ProviderResult) -> String {
    match result {
        ProviderResult::Success(summary) => summary,
        ProviderResult::AmbiguousChoices(choices) => {
            let listed: Vec<&str> = choices.iter().take(MAX_CHOICES).map(String::as_str).collect();
            format!(
                "Multiple results found, try being more specific: {}.",
                listed.join(", ")
            )
        }
        ProviderResult::NotFound(_) => NO_INFORMATION.to_string(),
        ProviderResult::ProviderError(_) => KNOWLEDGE_UNAVAILABLE.to_string(),
    }
}

pub fn render_open(address: &str, result: ProviderResult) -> String {
    match result {
        ProviderResult::Success(text) => text,
        _ => format!("Cannot open {}.", address),
    }
}
