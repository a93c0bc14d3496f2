use async_trait::async_trait;
use reqwest::Client;
use router::responses::weather_sentence;
use router::{ProviderResult, WeatherPort};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ProviderFault;

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "http://api.openweathermap.org";

/// OpenWeatherMap current-conditions lookup, metric units.
#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn lookup(&self, place: &str) -> Result<ProviderResult, ProviderFault> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderFault::NotConfigured("OPENWEATHER_API_KEY"))?;

        let url = format!("{}/data/2.5/weather", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(url)
            .query(&[("q", place), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderFault::Status(response.status()));
        }

        let body: Value = response.json().await?;
        interpret_conditions(place, &body)
    }
}

#[async_trait]
impl WeatherPort for OpenWeatherClient {
    async fn fetch(&self, place: &str) -> ProviderResult {
        info!("weather lookup place=\"{}\"", place);
        match self.lookup(place).await {
            Ok(result) => result,
            Err(ProviderFault::Status(status)) => {
                debug!("weather service status={} place=\"{}\"", status, place);
                ProviderResult::not_found(place)
            }
            Err(e) => {
                warn!("weather lookup failed: {}", e);
                ProviderResult::error(e.to_string())
            }
        }
    }
}

/// Reads an OpenWeatherMap body. `cod` other than 200 means the place is unknown.
pub(crate) fn interpret_conditions(place: &str, body: &Value) -> Result<ProviderResult, ProviderFault> {
    if !cod_is_ok(body.get("cod")) {
        return Ok(ProviderResult::not_found(place));
    }

    let temperature = body
        .pointer("/main/temp")
        .and_then(|temp| match temp {
            Value::Number(n) => Some(n),
            _ => None,
        })
        .ok_or(ProviderFault::MissingField("main.temp"))?;
    let description = body
        .pointer("/weather/0/description")
        .and_then(Value::as_str)
        .ok_or(ProviderFault::MissingField("weather[0].description"))?;

    Ok(ProviderResult::Success(weather_sentence(place, temperature, description)))
}

// The service sends 200 as a number on success but error codes as strings.
fn cod_is_ok(cod: Option<&Value>) -> bool {
    match cod {
        Some(Value::Number(n)) => n.as_u64() == Some(200),
        Some(Value::String(s)) => s == "200",
        _ => false,
    }
}
