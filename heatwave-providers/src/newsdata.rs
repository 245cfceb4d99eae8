//! `NewsData.io` adapter.

use crate::http::send_and_classify;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use heatwave_core::NewsProvider;
use heatwave_types::{ArticleRef, HeatwaveError, LanguageCode, ProviderProfile, RegionContext};
use serde::Deserialize;

const ENDPOINT: &str = "https://newsdata.io/api/1/news";

#[derive(Debug, Deserialize)]
struct NewsdataResponse {
    #[serde(default)]
    results: Vec<NewsdataArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsdataArticle {
    title: String,
    link: String,
    #[serde(default)]
    source_id: String,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
}

/// Adapter for `NewsData.io`'s `/news` endpoint, used as this pipeline's
/// "newsdata" provider. Accepts all 14 languages; its 10 req/s pacing, 30
/// per 900s rolling window, and 200/day cap are enforced one layer up in
/// the rate governor, not here.
pub struct NewsdataProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    supported_languages: Vec<LanguageCode>,
}

impl NewsdataProvider {
    /// Build an adapter. An empty `api_key` is treated as absent by
    /// [`NewsProvider::is_configured`].
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            client: reqwest::Client::new(),
            api_key: (!api_key.trim().is_empty()).then_some(api_key),
            supported_languages: ProviderProfile::default_for(heatwave_types::ProviderKind::Newsdata)
                .supported_languages,
        }
    }
}

/// `pubDate` arrives as `"YYYY-MM-DD HH:MM:SS"` UTC, with no offset marker.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[async_trait]
impl NewsProvider for NewsdataProvider {
    fn name(&self) -> &'static str {
        "newsdata"
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
            return Err(HeatwaveError::MissingCredentials("newsdata".to_string()));
        };

        let request = self.client.get(ENDPOINT).query(&[
            ("apikey", api_key.as_str()),
            ("q", query_string),
            ("language", language.as_str()),
        ]);
        let body = send_and_classify(request).await?;
        let parsed: NewsdataResponse = serde_json::from_str(&body)
            .map_err(|err| HeatwaveError::permanent(format!("malformed response body: {err}")))?;

        Ok(parsed
            .results
            .into_iter()
            .map(|article| ArticleRef {
                title: article.title,
                url: article.link,
                source: article.source_id,
                published_at: article.pub_date.as_deref().and_then(parse_pub_date),
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
        assert!(!NewsdataProvider::new("").is_configured());
        assert!(!NewsdataProvider::new("   ").is_configured());
    }

    #[test]
    fn parses_pub_date_format() {
        let parsed = parse_pub_date("2026-05-01 12:30:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-05-01T12:30:00+00:00");
    }

    #[test]
    fn malformed_pub_date_yields_none() {
        assert!(parse_pub_date("not-a-date").is_none());
    }

    #[tokio::test]
    async fn search_without_credentials_fails_without_a_network_call() {
        let provider = NewsdataProvider::new("");
        let ctx = RegionContext { slug: "raj".into(), display_name: "Rajasthan".into() };
        let err = provider
            .search("(loo) Rajasthan", LanguageCode::Hi, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, HeatwaveError::MissingCredentials(_)));
    }
}
