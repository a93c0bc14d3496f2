use serde::{Deserialize, Serialize};

pub const WEATHER_KEYWORDS: &[&str] = &["weather"];
pub const TEMPERATURE_KEYWORDS: &[&str] = &["temperature"];
pub const OPEN_KEYWORDS: &[&str] = &["open"];
pub const TIME_KEYWORDS: &[&str] = &["time"];
pub const KNOWLEDGE_KEYWORDS: &[&str] = &["wikipedia", "who is", "what is"];
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit"];

/// Keyword table checked top to bottom; the first row with a substring hit wins.
///
/// Order is load-bearing: "weather time in tokyo" is a weather request because
/// the weather row comes before the time row.
pub const INTENT_PRIORITY: &[(IntentKind, &[&str])] = &[
    (IntentKind::Weather, WEATHER_KEYWORDS),
    (IntentKind::Temperature, TEMPERATURE_KEYWORDS),
    (IntentKind::OpenResource, OPEN_KEYWORDS),
    (IntentKind::TellTime, TIME_KEYWORDS),
    (IntentKind::KnowledgeLookup, KNOWLEDGE_KEYWORDS),
    (IntentKind::Exit, EXIT_KEYWORDS),
];

/// Address prefixes treated as already fully qualified.
pub const RECOGNIZED_SCHEMES: &[&str] = &["http://", "https://", "ftp://", "file://", "mailto:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Weather,
    Temperature,
    OpenResource,
    TellTime,
    KnowledgeLookup,
    Exit,
    Unrecognized,
}

/// A classified utterance. The argument is `None` when extraction left nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Weather(Option<String>),
    Temperature(Option<String>),
    OpenResource(Option<String>),
    TellTime,
    KnowledgeLookup(Option<String>),
    Exit,
    Unrecognized,
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Weather(_) => IntentKind::Weather,
            Intent::Temperature(_) => IntentKind::Temperature,
            Intent::OpenResource(_) => IntentKind::OpenResource,
            Intent::TellTime => IntentKind::TellTime,
            Intent::KnowledgeLookup(_) => IntentKind::KnowledgeLookup,
            Intent::Exit => IntentKind::Exit,
            Intent::Unrecognized => IntentKind::Unrecognized,
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self {
            Intent::Weather(arg)
            | Intent::Temperature(arg)
            | Intent::OpenResource(arg)
            | Intent::KnowledgeLookup(arg) => arg.as_deref(),
            Intent::TellTime | Intent::Exit | Intent::Unrecognized => None,
        }
    }
}

/// Picks the intent row for an utterance without extracting anything.
pub fn match_kind(utterance: &str) -> IntentKind {
    INTENT_PRIORITY
        .iter()
        .find(|(_, keywords)| contains_any(utterance, keywords))
        .map(|(kind, _)| *kind)
        .unwrap_or(IntentKind::Unrecognized)
}

/// Classifies a lowercased utterance and extracts its argument.
pub fn classify(utterance: &str) -> Intent {
    match match_kind(utterance) {
        IntentKind::Weather => Intent::Weather(place_argument(utterance, "weather")),
        IntentKind::Temperature => Intent::Temperature(place_argument(utterance, "temperature")),
        IntentKind::OpenResource => Intent::OpenResource(resource_argument(utterance)),
        IntentKind::TellTime => Intent::TellTime,
        IntentKind::KnowledgeLookup => Intent::KnowledgeLookup(topic_argument(utterance)),
        IntentKind::Exit => Intent::Exit,
        IntentKind::Unrecognized => Intent::Unrecognized,
    }
}

/// Turns a bare resource name into a navigable address.
///
/// `example` becomes `https://www.example.com`; anything that already starts
/// with a recognized scheme is returned as is.
pub fn normalize_address(target: &str) -> String {
    if RECOGNIZED_SCHEMES.iter().any(|scheme| target.starts_with(scheme)) {
        target.to_string()
    } else {
        format!("https://www.{}.com", target)
    }
}

fn contains_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

/// "weather in paris" -> "paris"; "weather london" -> "london".
fn place_argument(utterance: &str, keyword: &str) -> Option<String> {
    let connector = format!("{} in", keyword);
    let place = match utterance.rsplit_once(connector.as_str()) {
        Some((_, after)) => after.trim().to_string(),
        None => utterance.replace(keyword, "").trim().to_string(),
    };
    non_empty(place)
}

fn resource_argument(utterance: &str) -> Option<String> {
    let stripped = OPEN_KEYWORDS
        .iter()
        .fold(utterance.to_string(), |acc, keyword| acc.replace(keyword, ""));
    non_empty(stripped.split_whitespace().collect())
}

fn topic_argument(utterance: &str) -> Option<String> {
    let stripped = KNOWLEDGE_KEYWORDS
        .iter()
        .fold(utterance.to_string(), |acc, trigger| acc.replace(trigger, ""));
    non_empty(stripped.trim().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_weather_connector_extraction() {
        assert_eq!(classify("weather in paris"), Intent::Weather(some("paris")));
        assert_eq!(classify("what's the weather in new delhi "), Intent::Weather(some("new delhi")));
        assert_eq!(classify("weather in   "), Intent::Weather(None));
    }

    #[test]
    fn test_weather_uses_last_connector() {
        assert_eq!(
            classify("weather in the weather in oslo"),
            Intent::Weather(some("oslo"))
        );
    }

    #[test]
    fn test_weather_without_connector() {
        assert_eq!(classify("weather london"), Intent::Weather(some("london")));
        assert_eq!(classify("  weather  "), Intent::Weather(None));
        assert_eq!(classify("weather"), Intent::Weather(None));
    }

    #[test]
    fn test_temperature_extraction() {
        assert_eq!(
            classify("temperature in lucknow"),
            Intent::Temperature(some("lucknow"))
        );
        assert_eq!(classify("temperature tokyo"), Intent::Temperature(some("tokyo")));
        assert_eq!(classify("temperature"), Intent::Temperature(None));
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(match_kind("weather time in tokyo"), IntentKind::Weather);
        assert_eq!(
            match_kind("what is the weather in paris and what time is it"),
            IntentKind::Weather
        );
        assert_eq!(match_kind("what is the temperature"), IntentKind::Temperature);
        assert_eq!(match_kind("open the time zone site"), IntentKind::OpenResource);
        assert_eq!(match_kind("what is the time"), IntentKind::TellTime);
        assert_eq!(match_kind("who is going to quit"), IntentKind::KnowledgeLookup);
        assert_eq!(match_kind("exit"), IntentKind::Exit);
        assert_eq!(match_kind("sing me a song"), IntentKind::Unrecognized);
    }

    #[test]
    fn test_priority_table_order_is_stable() {
        let kinds: Vec<IntentKind> = INTENT_PRIORITY.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![
                IntentKind::Weather,
                IntentKind::Temperature,
                IntentKind::OpenResource,
                IntentKind::TellTime,
                IntentKind::KnowledgeLookup,
                IntentKind::Exit,
            ]
        );
    }

    #[test]
    fn test_open_strips_whitespace() {
        assert_eq!(classify("open my site"), Intent::OpenResource(some("mysite")));
        assert_eq!(
            classify("open https://foo.org"),
            Intent::OpenResource(some("https://foo.org"))
        );
        assert_eq!(classify("open"), Intent::OpenResource(None));
    }

    #[test]
    fn test_knowledge_triggers_removed() {
        assert_eq!(
            classify("who is alan turing"),
            Intent::KnowledgeLookup(some("alan turing"))
        );
        assert_eq!(classify("wikipedia rust"), Intent::KnowledgeLookup(some("rust")));
        assert_eq!(
            classify("what is photosynthesis"),
            Intent::KnowledgeLookup(some("photosynthesis"))
        );
        assert_eq!(classify("wikipedia"), Intent::KnowledgeLookup(None));
    }

    #[test]
    fn test_argumentless_intents() {
        assert_eq!(classify("tell me the time"), Intent::TellTime);
        assert_eq!(classify("quit"), Intent::Exit);
        assert_eq!(classify("please exit now"), Intent::Exit);
        assert_eq!(classify("hello there"), Intent::Unrecognized);
        assert_eq!(classify(""), Intent::Unrecognized);
        assert_eq!(Intent::TellTime.argument(), None);
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address("example"), "https://www.example.com");
        assert_eq!(normalize_address("https://foo.org"), "https://foo.org");
        assert_eq!(normalize_address("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(normalize_address("mailto:me@example.com"), "mailto:me@example.com");
    }
}
