use std::{fmt::Debug, future::Future};

use bytes::Bytes;

/// Converts a podcast script into an audio byte stream with a fixed
/// voice/model selection. One fixed encoding (MP3), no chunking for long
/// scripts: if the provider has an input-length limit, the call fails.
pub trait SpeechSynthesizer {
    const SPEECH_MODEL: &'static str;
    const VOICE: &'static str;

    type Error: Debug;

    fn synthesize(&self, script: &str) -> impl Future<Output = Result<Bytes, Self::Error>>;
}
