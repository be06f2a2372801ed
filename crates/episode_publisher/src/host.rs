use std::future::Future;

use reqwest::Client;

use crate::domain::{PublishReceipt, PublishRequest};

/// The podcast-hosting API the finished episode is registered with.
pub trait PodcastHost {
    fn publish(
        &self,
        request: &PublishRequest,
    ) -> impl Future<Output = anyhow::Result<PublishReceipt>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Registers episodes with a single authenticated POST to the host's
/// episodes endpoint.
pub struct HostedEpisodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HostedEpisodeClient {
    /// Status the host answers with when the episode was created.
    const CREATED: u16 = 201;

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl PodcastHost for HostedEpisodeClient {
    async fn publish(&self, request: &PublishRequest) -> anyhow::Result<PublishReceipt> {
        let resp = self
            .client
            .post(self.base_url.as_str())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(HostError::Request)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to reach podcast host"))?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        if status != Self::CREATED {
            tracing::error!(status, body, "Podcast host rejected episode");
            return Err(HostError::Api {
                status,
                message: body,
            }
            .into());
        }

        tracing::info!(title = %request.title, "Episode registered with podcast host");
        Ok(PublishReceipt { status, body })
    }
}
