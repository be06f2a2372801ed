use std::{fmt::Debug, future::Future};

/// The three independent generation calls made per run. Each task carries
/// its own fixed instruction; all three are issued against the same
/// extracted paper text, with no shared context between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationTask {
    Script,
    Title,
    Description,
}

impl GenerationTask {
    /// Instruction used as the system turn. Provider-independent: switching
    /// the generation provider never changes this text.
    pub fn instruction(&self) -> &'static str {
        match self {
            GenerationTask::Script => include_str!("./prompts/script.txt"),
            GenerationTask::Title => include_str!("./prompts/title.txt"),
            GenerationTask::Description => include_str!("./prompts/description.txt"),
        }
    }
}

pub trait ScriptGenerator {
    /// Rough character ceiling for the paper text, leaving headroom for the
    /// instruction and the completion.
    const CONTEXT_WINDOW_LIMIT: usize = 110_000;
    const GENERATION_MODEL: &str;

    type Error: Debug;

    /// Sends the paper text as the user turn and the task instruction as
    /// the system turn, returning the model's plain-text completion.
    fn generate(
        &self,
        task: GenerationTask,
        paper_text: &str,
    ) -> impl Future<Output = Result<String, Self::Error>>;
}
