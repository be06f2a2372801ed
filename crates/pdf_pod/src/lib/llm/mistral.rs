use reqwest::Client;

use crate::llm::{
    generator::{GenerationTask, ScriptGenerator},
    openai::CompletionResponse,
};

/// Second generation provider. Mistral's chat API is wire-compatible with
/// the OpenAI completion shape, so the response types are shared.
pub struct MistralClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MistralError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl MistralClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.mistral.ai/v1".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_completion_request(
        &self,
        model_name: impl Into<String>,
        system_content: impl Into<String>,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, MistralError> {
        let body = serde_json::json!({
            "model": model_name.into(),
            "messages": [
                {
                    "role": "system",
                    "content": system_content.into()
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });

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
            return Err(MistralError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

impl ScriptGenerator for MistralClient {
    const GENERATION_MODEL: &str = "mistral-large-latest";
    type Error = MistralError;

    async fn generate(
        &self,
        task: GenerationTask,
        paper_text: &str,
    ) -> Result<String, Self::Error> {
        let response = self
            .send_completion_request(Self::GENERATION_MODEL, task.instruction(), paper_text)
            .await
            .inspect_err(|e| tracing::error!(error = %e, ?task, "Failed to generate episode text"))?;

        response.first_content().ok_or_else(|| MistralError::Api {
            status: 0,
            message: "No content in response".into(),
        })
    }
}
