pub mod builder;

use std::path::PathBuf;

use anyhow::Context;
use episode_publisher::{AudioPublisher, EpisodeMetadata, PublishedEpisode};
use uuid::Uuid;

use crate::{
    extract::{concat_pages, DocumentExtractor},
    llm::{
        generator::{GenerationTask, ScriptGenerator},
        synthesizer::SpeechSynthesizer,
    },
    types::{EpisodeDraft, PipelineStage},
};

/// The core upload-to-published-episode sequencer.
///
/// One invocation owns its whole run: a fresh run id, the audio artifact
/// named after it, and an explicit stage record. All external calls are
/// awaited one after another; there is no parallelism, no cancellation, and
/// no retry anywhere.
pub struct EpisodePipeline<X, G, S, P>
where
    X: DocumentExtractor + Send + Sync + 'static,
    G: ScriptGenerator + Send + Sync + 'static,
    S: SpeechSynthesizer + Send + Sync + 'static,
    P: AudioPublisher + Send + Sync + 'static,
{
    workdir: PathBuf,
    extractor: X,
    generator: G,
    synthesizer: S,
    publisher: P,
}

impl<X, G, S, P> EpisodePipeline<X, G, S, P>
where
    X: DocumentExtractor + Send + Sync + 'static,
    G: ScriptGenerator + Send + Sync + 'static,
    S: SpeechSynthesizer + Send + Sync + 'static,
    P: AudioPublisher + Send + Sync + 'static,
{
    /// Extracts the PDF and concatenates its pages in order.
    #[tracing::instrument(skip_all)]
    async fn extract_text(&self, pdf_bytes: &[u8]) -> anyhow::Result<String> {
        let pages = self
            .extractor
            .extract_pages(pdf_bytes)
            .map_err(|e| anyhow::anyhow!("Failed to extract PDF text: {e:?}"))?;

        let text = concat_pages(&pages);
        if text.is_empty() {
            tracing::warn!("Document yielded no extractable text");
        } else {
            tracing::info!(pages = pages.len(), chars = text.len(), "Extracted document text");
        }
        Ok(text)
    }

    /// Issues the three generation calls against the same paper text.
    /// Title and description are generated independently of the script, so
    /// nothing guarantees they are thematically consistent with it.
    #[tracing::instrument(skip_all)]
    async fn generate_episode_texts(
        &self,
        paper_text: &str,
    ) -> anyhow::Result<(String, EpisodeMetadata)> {
        let paper_text = clamp_to_limit(paper_text, G::CONTEXT_WINDOW_LIMIT);

        let script = self
            .generator
            .generate(GenerationTask::Script, paper_text)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to generate podcast script: {e:?}"))?;

        let title = self
            .generator
            .generate(GenerationTask::Title, paper_text)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to generate episode title: {e:?}"))?;

        let description = self
            .generator
            .generate(GenerationTask::Description, paper_text)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to generate episode description: {e:?}"))?;

        Ok((script, EpisodeMetadata { title, description }))
    }

    /// Synthesizes speech and writes it under the run id, so concurrent
    /// runs never overwrite each other's audio.
    #[tracing::instrument(skip(self, script))]
    async fn synthesize_audio(&self, run_id: Uuid, script: &str) -> anyhow::Result<PathBuf> {
        let audio = self
            .synthesizer
            .synthesize(script)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to synthesize speech: {e:?}"))?;

        let audio_dir = self.workdir.join("audio");
        tokio::fs::create_dir_all(&audio_dir)
            .await
            .context("Failed to create audio directory")?;

        let audio_path = audio_dir.join(format!("{run_id}.mp3"));
        tokio::fs::write(&audio_path, &audio)
            .await
            .with_context(|| format!("Failed to write audio to {}", audio_path.display()))?;

        tracing::info!(path = %audio_path.display(), bytes = audio.len(), "Wrote episode audio");
        Ok(audio_path)
    }

    async fn persist_draft(&self, draft: &EpisodeDraft) -> anyhow::Result<PathBuf> {
        let drafts_dir = self.workdir.join("drafts");
        tokio::fs::create_dir_all(&drafts_dir)
            .await
            .context("Failed to create drafts directory")?;

        let draft_path = drafts_dir.join(format!("{}.json", draft.run_id));
        let json = serde_json::to_vec_pretty(draft).context("Failed to serialize draft")?;
        tokio::fs::write(&draft_path, json)
            .await
            .with_context(|| format!("Failed to write draft to {}", draft_path.display()))?;

        tracing::info!(path = %draft_path.display(), "Saved episode draft");
        Ok(draft_path)
    }

    /// Extract, generate, synthesize. The publisher is not touched; the
    /// returned draft (also persisted as a sidecar) is what `publish`
    /// consumes later.
    #[tracing::instrument(skip_all)]
    pub async fn generate(&self, pdf_bytes: &[u8]) -> anyhow::Result<EpisodeDraft> {
        let run_id = Uuid::new_v4();
        let mut stage = PipelineStage::Idle;
        tracing::info!(%run_id, "Starting episode generation");

        match self.generate_inner(run_id, pdf_bytes, &mut stage).await {
            Ok(draft) => Ok(draft),
            Err(e) => {
                stage.advance(PipelineStage::Failed);
                Err(e)
            }
        }
    }

    async fn generate_inner(
        &self,
        run_id: Uuid,
        pdf_bytes: &[u8],
        stage: &mut PipelineStage,
    ) -> anyhow::Result<EpisodeDraft> {
        stage.advance(PipelineStage::Extracting);
        let paper_text = self.extract_text(pdf_bytes).await?;

        stage.advance(PipelineStage::Generating);
        let (script, metadata) = self.generate_episode_texts(&paper_text).await?;

        stage.advance(PipelineStage::Synthesizing);
        let audio_path = self.synthesize_audio(run_id, &script).await?;

        let draft = EpisodeDraft {
            run_id,
            script,
            metadata,
            audio_path,
        };
        self.persist_draft(&draft).await?;
        Ok(draft)
    }

    /// The user-gated second action: hand the draft to the publisher.
    #[tracing::instrument(skip_all, fields(run_id = %draft.run_id))]
    pub async fn publish(
        &self,
        draft: &EpisodeDraft,
        private: bool,
    ) -> anyhow::Result<PublishedEpisode> {
        let mut stage = PipelineStage::Publishing;
        tracing::info!(stage = ?stage, private, "Publishing episode");

        match self
            .publisher
            .publish_episode(&draft.metadata, &draft.audio_path, private)
            .await
        {
            Ok(episode) => {
                stage.advance(PipelineStage::Done);
                tracing::info!(audio_url = %episode.audio_url, "Episode published");
                Ok(episode)
            }
            Err(e) => {
                stage.advance(PipelineStage::Failed);
                Err(e).context("Failed to publish episode")
            }
        }
    }

    /// Full pipeline in one go.
    pub async fn run(
        &self,
        pdf_bytes: &[u8],
        private: bool,
    ) -> anyhow::Result<(EpisodeDraft, PublishedEpisode)> {
        let draft = self.generate(pdf_bytes).await?;
        let episode = self.publish(&draft, private).await?;
        Ok((draft, episode))
    }
}

/// Truncates `text` to at most `limit` bytes, backing off to the previous
/// char boundary so multi-byte characters are never split.
fn clamp_to_limit(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    tracing::warn!(
        chars = text.len(),
        limit,
        "Truncating extracted text to fit the model context"
    );
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::clamp_to_limit;

    #[test]
    fn text_within_the_limit_passes_through() {
        assert_eq!(clamp_to_limit("abc", 8), "abc");
        assert_eq!(clamp_to_limit("exactly8", 8), "exactly8");
    }

    #[test]
    fn oversized_text_is_cut_at_the_limit() {
        assert_eq!(clamp_to_limit("abcdefghij", 4), "abcd");
    }

    #[test]
    fn cut_backs_off_to_a_char_boundary() {
        // 'é' spans bytes 1..3, so a limit of 2 lands inside it.
        let text = "aéz";
        let clamped = clamp_to_limit(text, 2);
        assert_eq!(clamped, "a");
        assert!(text.is_char_boundary(clamped.len()));
    }
}
