use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use episode_publisher::{AudioPublisher, EpisodeMetadata, PublishReceipt, PublishedEpisode};

#[derive(Clone)]
pub struct MockPublisher {
    pub calls: Arc<Mutex<Vec<(EpisodeMetadata, PathBuf, bool)>>>,
    pub fail_with: Option<String>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl AudioPublisher for MockPublisher {
    async fn publish_episode(
        &self,
        metadata: &EpisodeMetadata,
        audio_path: &Path,
        private: bool,
    ) -> anyhow::Result<PublishedEpisode> {
        self.calls
            .lock()
            .unwrap()
            .push((metadata.clone(), audio_path.to_path_buf(), private));
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(PublishedEpisode {
            blob_name: "Ep.mp3".to_string(),
            audio_url: "https://sho.rt/abc".to_string(),
            receipt: PublishReceipt {
                status: 201,
                body: r#"{"id":"ep_1"}"#.to_string(),
            },
        })
    }
}
