use crate::config::Settings;
use crate::domain::asteroid::FeedResult;
use crate::domain::range::DateRange;
use crate::feed::types::FeedResponse;
use crate::feed::{FeedError, NeoFeedClient};
use anyhow::Context;
use std::time::Duration;

const FEED_PATH: &str = "/neo/rest/v1/feed";

#[derive(Debug, Clone)]
pub struct NasaFeedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NasaFeedClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        // No timeout unless one is configured; a slow upstream holds only its own request.
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.feed_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .context("failed to build feed http client")?;

        Ok(Self::new(
            http,
            settings.feed_base_url.clone(),
            settings.api_key.clone().unwrap_or_default(),
        ))
    }

    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Dates and key are interpolated verbatim, without validation or percent-encoding.
    pub fn feed_url(&self, range: &DateRange) -> String {
        format!(
            "{}{}?start_date={}&end_date={}&api_key={}",
            self.base_url.trim_end_matches('/'),
            FEED_PATH,
            range.start,
            range.end,
            self.api_key
        )
    }
}

#[async_trait::async_trait]
impl NeoFeedClient for NasaFeedClient {
    fn provider_name(&self) -> &'static str {
        "nasa_neows"
    }

    async fn fetch_feed(&self, range: &DateRange) -> Result<FeedResult, FeedError> {
        let res = self.http.get(self.feed_url(range)).send().await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(FeedError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed = serde_json::from_str::<FeedResponse>(&text)?;
        let element_count = parsed.element_count;
        let result = parsed.into_feed_result();
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            element_count,
            dates = result.len(),
            asteroids = result.item_count(),
            "feed fetched"
        );
        Ok(result)
    }
}
