//! Web-context enrichment: a handful of external lookups keyed on
//! industry and stage, degraded to canned snippets when the network
//! gives us nothing.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::types::WebSearchResult;

/// One instant-answer style hit for a query.
#[derive(Debug, Clone)]
pub struct InstantAnswer {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Narrow capability seam around the external search API. Timeout/retry
/// policy can change behind this trait without touching call sites.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns `Ok(None)` when the query produced no usable abstract.
    async fn instant_answer(&self, query: &str) -> Result<Option<InstantAnswer>>;
}

#[async_trait]
impl<T: SearchProvider + ?Sized> SearchProvider for std::sync::Arc<T> {
    async fn instant_answer(&self, query: &str) -> Result<Option<InstantAnswer>> {
        (**self).instant_answer(query).await
    }
}

/// DuckDuckGo Instant Answer API client.
pub struct DuckDuckGoProvider {
    client: Client,
}

impl DuckDuckGoProvider {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

#[derive(Debug, Deserialize)]
struct InstantAnswerResponse {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn instant_answer(&self, query: &str) -> Result<Option<InstantAnswer>> {
        let response = self
            .client
            .get("https://api.duckduckgo.com/")
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| anyhow!("Search request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Search API error: {}", response.status()));
        }

        let body: InstantAnswerResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse search response: {}", e))?;

        if body.abstract_text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(InstantAnswer {
            title: if body.heading.is_empty() {
                query.to_string()
            } else {
                body.heading
            },
            snippet: body.abstract_text,
            url: body.abstract_url,
        }))
    }
}

/// Issues the fixed query set sequentially and normalizes the answers.
pub struct WebEnricher<P: SearchProvider> {
    provider: P,
}

impl<P: SearchProvider> WebEnricher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// 0-4 results on the network path, exactly 2 canned records when every
    /// query comes back empty or fails. Queries run strictly sequentially,
    /// failures are logged and swallowed, and there is no retry.
    pub async fn enrich(&self, industry: &str, stage: &str) -> Vec<WebSearchResult> {
        let queries = build_queries(industry, stage);
        let mut results = Vec::new();

        for query in &queries {
            match self.provider.instant_answer(query).await {
                Ok(Some(answer)) => {
                    results.push(WebSearchResult {
                        query: query.clone(),
                        title: answer.title,
                        snippet: answer.snippet,
                        url: answer.url,
                        result_type: "investor_criteria".to_string(),
                    });
                }
                Ok(None) => {
                    tracing::debug!(query = %query, "search query produced no abstract");
                }
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "search query failed");
                }
            }
        }

        if results.is_empty() {
            results = fallback_results(industry, stage);
        }

        results
    }
}

fn build_queries(industry: &str, stage: &str) -> Vec<String> {
    vec![
        format!("{} startup investor criteria {} stage", industry, stage),
        format!("{} pitch deck best practices", industry),
        format!("{} funding requirements for {} companies", stage, industry),
        format!("what investors look for in {} {} startups", stage, industry),
    ]
}

/// Canned degrade-gracefully records. Always exactly two, both templated
/// with the supplied industry and stage.
pub(crate) fn fallback_results(industry: &str, stage: &str) -> Vec<WebSearchResult> {
    vec![
        WebSearchResult {
            query: format!("{} startup investor criteria {} stage", industry, stage),
            title: format!("Investor criteria for {} startups", industry),
            snippet: format!(
                "Investors evaluating {} companies at the {} stage focus on traction, \
                 unit economics, market size, and the strength of the founding team.",
                industry, stage
            ),
            url: String::new(),
            result_type: "fallback".to_string(),
        },
        WebSearchResult {
            query: format!("{} pitch deck best practices", industry),
            title: format!("Pitch deck expectations at the {} stage", stage),
            snippet: format!(
                "A {} stage pitch deck in the {} sector should cover the problem, \
                 solution, competitive landscape, go-to-market plan, and financial projections.",
                stage, industry
            ),
            url: String::new(),
            result_type: "fallback".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchProvider for FailingProvider {
        async fn instant_answer(&self, _query: &str) -> Result<Option<InstantAnswer>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("connection refused"))
        }
    }

    struct CannedProvider;

    #[async_trait]
    impl SearchProvider for CannedProvider {
        async fn instant_answer(&self, query: &str) -> Result<Option<InstantAnswer>> {
            // Only the first two phrasings produce an abstract.
            if query.contains("investor criteria") || query.contains("best practices") {
                Ok(Some(InstantAnswer {
                    title: "hit".into(),
                    snippet: format!("abstract for {}", query),
                    url: "https://example.com".into(),
                }))
            } else {
                Ok(None)
            }
        }
    }

    #[tokio::test]
    async fn test_all_failures_yield_exactly_two_fallback_records() {
        let provider = FailingProvider {
            calls: AtomicUsize::new(0),
        };
        let enricher = WebEnricher::new(provider);
        let results = enricher.enrich("Fintech", "Seed").await;

        assert_eq!(results.len(), 2);
        assert_eq!(enricher.provider.calls.load(Ordering::SeqCst), 4);
        for result in &results {
            assert_eq!(result.result_type, "fallback");
            assert!(!result.snippet.is_empty());
            assert!(result.snippet.contains("Fintech"));
            assert!(result.snippet.contains("Seed"));
        }
    }

    #[tokio::test]
    async fn test_partial_hits_keep_query_order_and_no_fallback() {
        let enricher = WebEnricher::new(CannedProvider);
        let results = enricher.enrich("SaaS", "Series A").await;

        assert_eq!(results.len(), 2);
        assert!(results[0].query.contains("investor criteria"));
        assert!(results[1].query.contains("best practices"));
        for result in &results {
            assert_eq!(result.result_type, "investor_criteria");
        }
    }

    #[test]
    fn test_four_queries_template_industry_and_stage() {
        let queries = build_queries("Healthtech", "MVP");
        assert_eq!(queries.len(), 4);
        assert!(queries.iter().any(|q| q.contains("Healthtech") && q.contains("MVP")));
    }
}
