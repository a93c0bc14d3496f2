use thiserror::Error;

/// Failures inside a provider. These never leave the crate: each provider folds
/// them into a `ProviderResult` before answering the router.
#[derive(Debug, Error)]
pub enum ProviderFault {
    /// Holds the error with its request URL removed; the URL carries the API key.
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("missing field `{0}` in response")]
    MissingField(&'static str),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("unsupported address `{0}`")]
    UnsupportedAddress(String),

    #[error("failed to launch viewer: {0}")]
    Launch(#[source] std::io::Error),
}

impl From<reqwest::Error> for ProviderFault {
    fn from(e: reqwest::Error) -> Self {
        ProviderFault::Transport(e.without_url())
    }
}
