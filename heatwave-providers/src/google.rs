//! Google Custom Search-style adapter.

use crate::http::send_and_classify;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use heatwave_core::NewsProvider;
use heatwave_types::{ArticleRef, HeatwaveError, LanguageCode, ProviderProfile, RegionContext};
use serde::Deserialize;

const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Minimal Custom Search JSON response: a list of result `items`. Each item
/// carries a title, a link, and a display link used as the source name;
/// Custom Search does not reliably surface a publication timestamp, so
/// `published_at` is always `None` for this provider.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    link: String,
    #[serde(rename = "displayLink", default)]
    display_link: String,
}

/// Adapter for Google's Custom Search JSON API, used as this pipeline's
/// "google" provider. Supports all 14 languages and unbounded daily
/// volume; pacing and breaker isolation happen one layer up, in the
/// scheduler.
pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    search_engine_id: Option<String>,
    supported_languages: Vec<LanguageCode>,
}

impl GoogleProvider {
    /// Build an adapter. `api_key`/`search_engine_id` may be empty strings;
    /// an empty value is treated the same as absent by
    /// [`NewsProvider::is_configured`].
    #[must_use]
    pub fn new(api_key: impl Into<String>, search_engine_id: impl Into<String>) -> Self {
        let api_key = non_empty(api_key.into());
        let search_engine_id = non_empty(search_engine_id.into());
        Self {
            client: reqwest::Client::new(),
            api_key,
            search_engine_id,
            supported_languages: ProviderProfile::default_for(heatwave_types::ProviderKind::Google)
                .supported_languages,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}

#[async_trait]
impl NewsProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn supported_languages(&self) -> &[LanguageCode] {
        &self.supported_languages
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.search_engine_id.is_some()
    }

    async fn search(
        &self,
        query_string: &str,
        language: LanguageCode,
        region_context: &RegionContext,
    ) -> Result<Vec<ArticleRef>, HeatwaveError> {
        let (Some(api_key), Some(cx)) = (&self.api_key, &self.search_engine_id) else {
            return Err(HeatwaveError::MissingCredentials("google".to_string()));
        };

        let request = self.client.get(ENDPOINT).query(&[
            ("key", api_key.as_str()),
            ("cx", cx.as_str()),
            ("q", query_string),
        ]);
        let body = send_and_classify(request).await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|err| HeatwaveError::permanent(format!("malformed response body: {err}")))?;

        Ok(parsed
            .items
            .into_iter()
            .map(|item| ArticleRef {
                title: item.title,
                url: item.link,
                source: item.display_link,
                published_at: None::<DateTime<Utc>>,
                language,
                region_slug: region_context.slug.clone(),
                search_term: query_string.to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_without_credentials() {
        let provider = GoogleProvider::new("", "");
        assert!(!provider.is_configured());
    }

    #[test]
    fn configured_with_both_credentials() {
        let provider = GoogleProvider::new("key", "cx");
        assert!(provider.is_configured());
    }

    #[tokio::test]
    async fn search_without_credentials_fails_without_a_network_call() {
        let provider = GoogleProvider::new("", "");
        let ctx = RegionContext { slug: "raj".into(), display_name: "Rajasthan".into() };
        let err = provider
            .search("(loo) Rajasthan", LanguageCode::Hi, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, HeatwaveError::MissingCredentials(_)));
    }
}
