pub mod generator;
pub mod mistral;
pub mod openai;
pub mod synthesizer;
