use serde::{Deserialize, Serialize};

/// Upper bound on the alternatives an ambiguous lookup may carry.
pub const MAX_CHOICES: usize = 5;

/// Outcome of a single provider call.
///
/// Providers never return raw faults: network and library failures are folded
/// into `ProviderError` before the router sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderResult {
    /// Display-ready text from the provider.
    Success(String),
    /// Nothing matched; carries the place/topic that was asked for.
    NotFound(String),
    /// Several candidates matched; at most [`MAX_CHOICES`] titles.
    AmbiguousChoices(Vec<String>),
    /// Transport or service failure, with a short reason for the logs.
    ProviderError(String),
}

impl ProviderResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success(text.into())
    }

    pub fn not_found(context: impl Into<String>) -> Self {
        Self::NotFound(context.into())
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::ProviderError(reason.into())
    }

    /// Builds an `AmbiguousChoices`, keeping only the first [`MAX_CHOICES`] entries.
    pub fn ambiguous<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AmbiguousChoices(choices.into_iter().take(MAX_CHOICES).map(Into::into).collect())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
