use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Shortens a signed audio URL before it is handed to the podcast host.
///
/// `Ok(None)` means the service answered but produced no link; callers are
/// expected to degrade rather than abort.
pub trait LinkShortener {
    fn shorten(&self, long_url: &str) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;
}

/// Bitly v4 client. Links are filed under the configured group.
pub struct BitlyShortener {
    client: Client,
    api_key: String,
    group_guid: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ShortenRequest<'a> {
    long_url: &'a str,
    group_guid: &'a str,
}

#[derive(Debug, Deserialize)]
struct ShortenResponse {
    link: Option<String>,
}

impl BitlyShortener {
    pub fn new(api_key: impl Into<String>, group_guid: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            group_guid: group_guid.into(),
            base_url: "https://api-ssl.bitly.com/v4".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl LinkShortener for BitlyShortener {
    async fn shorten(&self, long_url: &str) -> anyhow::Result<Option<String>> {
        let body = ShortenRequest {
            long_url,
            group_guid: &self.group_guid,
        };

        // Shortening failures are tolerated: the episode still publishes,
        // just with an empty audio URL.
        let resp = match self
            .client
            .post(format!("{}/shorten", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "Link shortener unreachable");
                return Ok(None);
            }
        };

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            tracing::warn!(status, "Link shortener returned non-success status");
            return Ok(None);
        }

        let response = resp.json::<ShortenResponse>().await?;
        Ok(response.link)
    }
}
