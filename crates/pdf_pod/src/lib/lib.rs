mod extract;
mod llm;
mod pipeline;
pub mod tracing;
pub mod types;

pub use extract::{concat_pages, DocumentExtractor, ExtractError, PdfTextExtractor};
pub use llm::generator::{GenerationTask, ScriptGenerator};
pub use llm::mistral::{MistralClient, MistralError};
pub use llm::openai::{OpenAIClient, OpenAIError};
pub use llm::synthesizer::SpeechSynthesizer;
pub use pipeline::{builder::EpisodePipelineBuilder, EpisodePipeline};
