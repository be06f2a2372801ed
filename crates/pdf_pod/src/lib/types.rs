use std::path::{Path, PathBuf};

use anyhow::Context;
use episode_publisher::EpisodeMetadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stages of one pipeline run. Transitions are strictly linear; `Done` and
/// `Failed` are terminal, and a failed run can only be retried from
/// scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Idle,
    Extracting,
    Generating,
    Synthesizing,
    Publishing,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn advance(&mut self, next: PipelineStage) {
        tracing::info!(from = ?self, to = ?next, "Pipeline stage");
        *self = next;
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

/// Everything `generate` produced for one run. Persisted as a JSON sidecar
/// in the workdir so a later `publish` invocation can pick it up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeDraft {
    pub run_id: Uuid,
    pub script: String,
    pub metadata: EpisodeMetadata,
    pub audio_path: PathBuf,
}

impl EpisodeDraft {
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read draft at {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse draft at {}", path.display()))
    }
}
