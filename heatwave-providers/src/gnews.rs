//! `GNews` adapter.

use crate::http::send_and_classify;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use heatwave_core::NewsProvider;
use heatwave_types::{ArticleRef, HeatwaveError, LanguageCode, ProviderProfile, RegionContext};
use serde::Deserialize;

const ENDPOINT: &str = "https://gnews.io/api/v4/search";

#[derive(Debug, Deserialize)]
struct GnewsResponse {
    #[serde(default)]
    articles: Vec<GnewsArticle>,
}

#[derive(Debug, Deserialize)]
struct GnewsArticle {
    title: String,
    url: String,
    #[serde(default)]
    source: GnewsSource,
    #[serde(rename = "publishedAt", default)]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct GnewsSource {
    #[serde(default)]
    name: String,
}

/// Adapter for `GNews`'s `/search` endpoint, used as this pipeline's
/// "gnews" provider — the most constrained of the three: 1 req/s, a
/// 100/day cap, and only 8 of the 14 supported languages.
pub struct GnewsProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    supported_languages: Vec<LanguageCode>,
}

impl GnewsProvider {
    /// Build an adapter. An empty `api_key` is treated as absent by
    /// [`NewsProvider::is_configured`].
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            client: reqwest::Client::new(),
            api_key: (!api_key.trim().is_empty()).then_some(api_key),
            supported_languages: ProviderProfile::default_for(heatwave_types::ProviderKind::Gnews)
                .supported_languages,
        }
    }
}

#[async_trait]
impl NewsProvider for GnewsProvider {
    fn name(&self) -> &'static str {
        "gnews"
    }

    fn supported_languages(&self) -> &[LanguageCode] {
        &self.supported_languages
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(
        &self,
        query_string: &str,
        language: LanguageCode,
        region_context: &RegionContext,
    ) -> Result<Vec<ArticleRef>, HeatwaveError> {
        let Some(api_key) = &self.api_key else {
            return Err(HeatwaveError::MissingCredentials("gnews".to_string()));
        };
        if !language.gnews_supported() {
            return Err(HeatwaveError::LanguageUnsupported(language.as_str().to_string()));
        }

        let request = self.client.get(ENDPOINT).query(&[
            ("token", api_key.as_str()),
            ("q", query_string),
            ("lang", language.as_str()),
        ]);
        let body = send_and_classify(request).await?;
        let parsed: GnewsResponse = serde_json::from_str(&body)
            .map_err(|err| HeatwaveError::permanent(format!("malformed response body: {err}")))?;

        Ok(parsed
            .articles
            .into_iter()
            .map(|article| ArticleRef {
                title: article.title,
                url: article.url,
                source: article.source.name,
                published_at: article.published_at,
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
    fn unconfigured_without_api_key() {
        assert!(!GnewsProvider::new("").is_configured());
    }

    #[test]
    fn supported_languages_is_the_eight_code_subset() {
        let provider = GnewsProvider::new("token");
        assert_eq!(provider.supported_languages().len(), 8);
    }

    #[tokio::test]
    async fn search_rejects_unsupported_language_without_a_network_call() {
        let provider = GnewsProvider::new("token");
        let ctx = RegionContext { slug: "mizoram".into(), display_name: "Mizoram".into() };
        let err = provider
            .search("(garmi) Mizoram", LanguageCode::Ne, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, HeatwaveError::LanguageUnsupported(_)));
    }
}
