use std::{future::Future, path::Path};

use anyhow::Context;

use crate::{
    blob::{blob_name_for, BlobStore},
    domain::{EpisodeMetadata, PublishRequest, PublishedEpisode},
    host::PodcastHost,
    shortener::LinkShortener,
};

/// The publish side of the pipeline, behind one seam so the controller can
/// be tested without touching any remote service.
pub trait AudioPublisher {
    fn publish_episode(
        &self,
        metadata: &EpisodeMetadata,
        audio_path: &Path,
        private: bool,
    ) -> impl Future<Output = anyhow::Result<PublishedEpisode>> + Send;
}

/// Sequences upload -> signed URL -> shorten -> host registration.
///
/// Every step hard-depends on the previous one succeeding; the host is
/// never called unless the blob upload went through. Partial side effects
/// (blob uploaded, publish failed) are not rolled back.
pub struct EpisodePublisher<B, L, H> {
    blobs: B,
    shortener: L,
    host: H,
}

impl<B, L, H> EpisodePublisher<B, L, H> {
    /// Read access window on the signed audio URL. Long enough for the
    /// host's ingestion crawl to fetch the file.
    pub const SIGNED_URL_EXPIRY_HOURS: i64 = 8;

    pub fn new(blobs: B, shortener: L, host: H) -> Self {
        Self {
            blobs,
            shortener,
            host,
        }
    }
}

impl<B, L, H> AudioPublisher for EpisodePublisher<B, L, H>
where
    B: BlobStore + Send + Sync,
    L: LinkShortener + Send + Sync,
    H: PodcastHost + Send + Sync,
{
    #[tracing::instrument(skip(self, metadata), fields(title = %metadata.title))]
    async fn publish_episode(
        &self,
        metadata: &EpisodeMetadata,
        audio_path: &Path,
        private: bool,
    ) -> anyhow::Result<PublishedEpisode> {
        let blob_name = blob_name_for(&metadata.title);

        self.blobs
            .upload(&blob_name, audio_path)
            .await
            .context("Failed to upload episode audio")?;

        let signed_url = self
            .blobs
            .signed_url(
                &blob_name,
                chrono::Duration::hours(Self::SIGNED_URL_EXPIRY_HOURS),
            )
            .await
            .context("Failed to mint signed audio URL")?;

        let audio_url = match self.shortener.shorten(&signed_url).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                tracing::warn!("Shortener returned no link; publishing with empty audio URL");
                String::new()
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Shortener failed; publishing with empty audio URL");
                String::new()
            }
        };

        let request = PublishRequest {
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            audio_url: audio_url.clone(),
            private,
        };

        let receipt = self
            .host
            .publish(&request)
            .await
            .context("Failed to register episode with podcast host")?;

        Ok(PublishedEpisode {
            blob_name,
            audio_url,
            receipt,
        })
    }
}
