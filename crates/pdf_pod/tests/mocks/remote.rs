//! Mocks for the publisher's remote collaborators, used to drive a real
//! `EpisodePublisher` end to end.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use episode_publisher::{BlobStore, LinkShortener, PodcastHost, PublishReceipt, PublishRequest};

#[derive(Clone, Default)]
pub struct MockBlobStore {
    pub uploads: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl BlobStore for MockBlobStore {
    async fn upload(&self, blob_name: &str, audio_path: &Path) -> anyhow::Result<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((blob_name.to_string(), audio_path.to_path_buf()));
        Ok(())
    }

    async fn signed_url(&self, blob_name: &str, _expiry: chrono::Duration) -> anyhow::Result<String> {
        Ok(format!("https://blobs.example/episodes/{blob_name}?sig=abc"))
    }
}

#[derive(Clone, Default)]
pub struct MockShortener {
    pub link: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockShortener {
    pub fn new(link: &str) -> Self {
        Self {
            link: Some(link.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl LinkShortener for MockShortener {
    async fn shorten(&self, long_url: &str) -> anyhow::Result<Option<String>> {
        self.calls.lock().unwrap().push(long_url.to_string());
        Ok(self.link.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockHost {
    pub requests: Arc<Mutex<Vec<PublishRequest>>>,
}

impl PodcastHost for MockHost {
    async fn publish(&self, request: &PublishRequest) -> anyhow::Result<PublishReceipt> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(PublishReceipt {
            status: 201,
            body: r#"{"id":"ep_1"}"#.to_string(),
        })
    }
}
