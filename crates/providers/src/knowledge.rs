use async_trait::async_trait;
use reqwest::Client;
use router::{KnowledgePort, ProviderResult, MAX_CHOICES};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ProviderFault;

pub const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Sentences requested for a summary.
const SUMMARY_SENTENCES: &str = "2";

/// Wikipedia summaries through the MediaWiki action API.
///
/// A lookup is a search (taking the service's spelling suggestion when it has
/// one), then an intro extract of the best title. Disambiguation pages answer
/// with the titles they link to instead of a summary.
#[derive(Clone, Debug)]
pub struct WikipediaClient {
    http: Client,
    api_url: String,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PageOutcome {
    Missing,
    Disambiguation,
    Summary(String),
}

impl WikipediaClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            api_url: DEFAULT_WIKIPEDIA_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    async fn lookup(&self, topic: &str) -> Result<ProviderResult, ProviderFault> {
        let search = self
            .query(&[
                ("list", "search"),
                ("srsearch", topic),
                ("srlimit", "1"),
                ("srinfo", "suggestion"),
                ("srprop", ""),
            ])
            .await?;

        let Some(title) = best_title(&search) else {
            return Ok(ProviderResult::not_found(topic));
        };
        debug!("knowledge search topic=\"{}\" title=\"{}\"", topic, title);

        let page = self
            .query(&[
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exsentences", SUMMARY_SENTENCES),
                ("redirects", "1"),
                ("titles", title.as_str()),
            ])
            .await?;

        match interpret_page(&page) {
            PageOutcome::Missing => Ok(ProviderResult::not_found(topic)),
            PageOutcome::Summary(summary) => Ok(ProviderResult::Success(summary)),
            PageOutcome::Disambiguation => {
                // Page wikitext keeps the options in the order the page lists them
                let source = self
                    .query(&[
                        ("prop", "revisions"),
                        ("rvprop", "content"),
                        ("rvslots", "main"),
                        ("redirects", "1"),
                        ("titles", title.as_str()),
                    ])
                    .await?;
                let choices = disambiguation_options(&source);
                if choices.is_empty() {
                    Ok(ProviderResult::not_found(topic))
                } else {
                    Ok(ProviderResult::ambiguous(choices))
                }
            }
        }
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Value, ProviderFault> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderFault::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl KnowledgePort for WikipediaClient {
    async fn fetch(&self, topic: &str) -> ProviderResult {
        info!("knowledge lookup topic=\"{}\"", topic);
        match self.lookup(topic).await {
            Ok(result) => result,
            Err(e) => {
                warn!("knowledge lookup failed: {}", e);
                ProviderResult::error(e.to_string())
            }
        }
    }
}

/// Spelling suggestion if the service offered one, else the top hit.
pub(crate) fn best_title(search: &Value) -> Option<String> {
    let suggestion = search
        .pointer("/query/searchinfo/suggestion")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let first_hit = search
        .pointer("/query/search/0/title")
        .and_then(Value::as_str);

    suggestion.or(first_hit).map(String::from)
}

pub(crate) fn interpret_page(page: &Value) -> PageOutcome {
    let Some(entry) = page.pointer("/query/pages/0") else {
        return PageOutcome::Missing;
    };

    if entry.get("missing").is_some() || entry.get("invalid").is_some() {
        return PageOutcome::Missing;
    }
    if entry.pointer("/pageprops/disambiguation").is_some() {
        return PageOutcome::Disambiguation;
    }

    match entry.get("extract").and_then(Value::as_str).map(str::trim) {
        Some(extract) if !extract.is_empty() => PageOutcome::Summary(extract.to_string()),
        _ => PageOutcome::Missing,
    }
}

/// Link targets of the page's list items, in page order, capped at [`MAX_CHOICES`].
pub(crate) fn disambiguation_options(source: &Value) -> Vec<String> {
    let Some(wikitext) = source
        .pointer("/query/pages/0/revisions/0/slots/main/content")
        .and_then(Value::as_str)
    else {
        return Vec::new();
    };

    let mut options: Vec<String> = Vec::new();
    for line in wikitext.lines().filter(|line| line.trim_start().starts_with('*')) {
        let Some(target) = first_link_target(line) else {
            continue;
        };
        if !options.contains(&target) {
            options.push(target);
        }
        if options.len() == MAX_CHOICES {
            break;
        }
    }
    options
}

/// `* [[Mercury (planet)|Mercury]], the planet` -> `Mercury (planet)`.
fn first_link_target(line: &str) -> Option<String> {
    let start = line.find("[[")? + 2;
    let end = start + line[start..].find("]]")?;
    let target = line[start..end].split('|').next()?.replace('_', " ");
    let target = target.trim();

    // File:, Category: and other namespaced links are not options
    if target.is_empty() || target.contains(':') {
        None
    } else {
        Some(target.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_best_title_prefers_suggestion() {
        let search = json!({
            "query": {
                "searchinfo": { "suggestion": "alan turing" },
                "search": [{ "ns": 0, "title": "Alan Turning Institute" }]
            }
        });
        assert_eq!(best_title(&search), Some("alan turing".to_string()));

        let search = json!({
            "query": {
                "searchinfo": { "totalhits": 12 },
                "search": [{ "ns": 0, "title": "Alan Turing" }]
            }
        });
        assert_eq!(best_title(&search), Some("Alan Turing".to_string()));
    }

    #[test]
    fn test_best_title_no_hits() {
        let search = json!({ "query": { "searchinfo": { "totalhits": 0 }, "search": [] } });
        assert_eq!(best_title(&search), None);
    }

    #[test]
    fn test_summary_page() {
        let page = json!({
            "query": {
                "pages": [{
                    "pageid": 1208,
                    "title": "Alan Turing",
                    "extract": "Alan Mathison Turing was an English mathematician. He was influential.\n"
                }]
            }
        });
        assert_eq!(
            interpret_page(&page),
            PageOutcome::Summary(
                "Alan Mathison Turing was an English mathematician. He was influential.".to_string()
            )
        );
    }

    #[test]
    fn test_missing_and_disambiguation_pages() {
        let missing = json!({ "query": { "pages": [{ "title": "Qwxz", "missing": true }] } });
        assert_eq!(interpret_page(&missing), PageOutcome::Missing);

        let empty = json!({ "batchcomplete": true });
        assert_eq!(interpret_page(&empty), PageOutcome::Missing);

        let disambiguation = json!({
            "query": {
                "pages": [{
                    "title": "Mercury",
                    "pageprops": { "disambiguation": "" },
                    "extract": "Mercury may refer to:"
                }]
            }
        });
        assert_eq!(interpret_page(&disambiguation), PageOutcome::Disambiguation);
    }

    #[test]
    fn test_disambiguation_options_follow_page_order() {
        let wikitext = "'''Mercury''' may refer to:\n\
            == Science ==\n\
            * [[Mercury (planet)]], the closest planet to the Sun\n\
            * [[Mercury (element)|mercury]], a chemical element\n\
            * [[File:Hg.png|thumb]] image caption\n\
            * [[Mercury (planet)]] again\n\
            == People ==\n\
            * [[Freddie_Mercury]], singer\n\
            * plain entry without a link\n\
            * [[Mercury (mythology)]], a Roman god\n\
            * [[Mercury Records]]\n\
            * [[Mercury, Nevada]]\n";
        let source = json!({
            "query": {
                "pages": [{
                    "title": "Mercury",
                    "revisions": [{ "slots": { "main": { "content": wikitext } } }]
                }]
            }
        });

        assert_eq!(
            disambiguation_options(&source),
            vec![
                "Mercury (planet)",
                "Mercury (element)",
                "Freddie Mercury",
                "Mercury (mythology)",
                "Mercury Records",
            ]
        );
    }

    #[test]
    fn test_disambiguation_options_without_content() {
        let source = json!({ "query": { "pages": [{ "title": "Mercury", "missing": true }] } });
        assert!(disambiguation_options(&source).is_empty());
    }
}
