pub mod extractor;
pub mod generator;
pub mod publisher;
pub mod remote;
pub mod synthesizer;
