use std::path::PathBuf;

use episode_publisher::AudioPublisher;

use crate::{
    extract::DocumentExtractor,
    llm::{generator::ScriptGenerator, synthesizer::SpeechSynthesizer},
    EpisodePipeline,
};

/// Typestate builder: every collaborator slot starts as `()` and `build`
/// only exists once all four are filled.
pub struct EpisodePipelineBuilder<X = (), G = (), S = (), P = ()> {
    workdir: PathBuf,
    extractor: X,
    generator: G,
    synthesizer: S,
    publisher: P,
}

impl EpisodePipelineBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            extractor: (),
            generator: (),
            synthesizer: (),
            publisher: (),
        }
    }
}

impl<X, G, S, P> EpisodePipelineBuilder<X, G, S, P> {
    pub fn extractor<X2: DocumentExtractor + Send + Sync + 'static>(
        self,
        extractor: X2,
    ) -> EpisodePipelineBuilder<X2, G, S, P> {
        EpisodePipelineBuilder {
            workdir: self.workdir,
            extractor,
            generator: self.generator,
            synthesizer: self.synthesizer,
            publisher: self.publisher,
        }
    }

    pub fn generator<G2: ScriptGenerator + Send + Sync + 'static>(
        self,
        generator: G2,
    ) -> EpisodePipelineBuilder<X, G2, S, P> {
        EpisodePipelineBuilder {
            workdir: self.workdir,
            extractor: self.extractor,
            generator,
            synthesizer: self.synthesizer,
            publisher: self.publisher,
        }
    }

    pub fn synthesizer<S2: SpeechSynthesizer + Send + Sync + 'static>(
        self,
        synthesizer: S2,
    ) -> EpisodePipelineBuilder<X, G, S2, P> {
        EpisodePipelineBuilder {
            workdir: self.workdir,
            extractor: self.extractor,
            generator: self.generator,
            synthesizer,
            publisher: self.publisher,
        }
    }

    pub fn publisher<P2: AudioPublisher + Send + Sync + 'static>(
        self,
        publisher: P2,
    ) -> EpisodePipelineBuilder<X, G, S, P2> {
        EpisodePipelineBuilder {
            workdir: self.workdir,
            extractor: self.extractor,
            generator: self.generator,
            synthesizer: self.synthesizer,
            publisher,
        }
    }
}

impl<X, G, S, P> EpisodePipelineBuilder<X, G, S, P>
where
    X: DocumentExtractor + Send + Sync + 'static,
    G: ScriptGenerator + Send + Sync + 'static,
    S: SpeechSynthesizer + Send + Sync + 'static,
    P: AudioPublisher + Send + Sync + 'static,
{
    pub fn build(self) -> EpisodePipeline<X, G, S, P> {
        EpisodePipeline {
            workdir: self.workdir,
            extractor: self.extractor,
            generator: self.generator,
            synthesizer: self.synthesizer,
            publisher: self.publisher,
        }
    }
}
