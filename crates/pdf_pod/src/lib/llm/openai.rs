use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;

use crate::llm::{
    generator::{GenerationTask, ScriptGenerator},
    synthesizer::SpeechSynthesizer,
};

pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub(crate) fn completion_body(
        model: &str,
        system_content: &str,
        user_content: &str,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": model,
            "messages": [
                {
                    "role": "system",
                    "content": system_content
                },
                {
                    "role": "user",
                    "content": user_content
                }
            ]
        })
    }

    pub async fn send_completion_request(
        &self,
        model_name: impl Into<String>,
        system_content: impl Into<String>,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, OpenAIError> {
        let body = Self::completion_body(
            &model_name.into(),
            &system_content.into(),
            &user_content.into(),
        );

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }

    pub async fn send_speech_request(
        &self,
        model_name: impl Into<String>,
        voice: impl Into<String>,
        input: impl Into<String>,
    ) -> Result<Bytes, OpenAIError> {
        let body = serde_json::json!({
            "model": model_name.into(),
            "voice": voice.into(),
            "input": input.into()
        });

        let resp = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.bytes().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if the model produced any.
    pub fn first_content(&self) -> Option<String> {
        self.choices.first().and_then(|c| c.message.content.clone())
    }
}

impl ScriptGenerator for OpenAIClient {
    const GENERATION_MODEL: &str = "gpt-4o";
    type Error = OpenAIError;

    async fn generate(
        &self,
        task: GenerationTask,
        paper_text: &str,
    ) -> Result<String, Self::Error> {
        let response = self
            .send_completion_request(Self::GENERATION_MODEL, task.instruction(), paper_text)
            .await
            .inspect_err(|e| tracing::error!(error = %e, ?task, "Failed to generate episode text"))?;

        response.first_content().ok_or_else(|| OpenAIError::Api {
            status: 0,
            message: "No content in response".into(),
        })
    }
}

impl SpeechSynthesizer for OpenAIClient {
    const SPEECH_MODEL: &'static str = "tts-1";
    const VOICE: &'static str = "alloy";
    type Error = OpenAIError;

    async fn synthesize(&self, script: &str) -> Result<Bytes, Self::Error> {
        self.send_speech_request(Self::SPEECH_MODEL, Self::VOICE, script)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to synthesize speech"))
    }
}
