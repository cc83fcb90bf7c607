use reqwest::{Client, StatusCode};
use serde_json::json;
use std::env;
use thiserror::Error;

use super::endpoints::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenRouterAvailableModel,
    Provider, OPENROUTER_MODELS,
};
use super::MenuLlm;
use crate::config::SuggestConfig;

const OPENROUTER_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: StatusCode,
        error_body: String,
    },
    #[error("No response choices received from API")]
    EmptyReply,
}

impl Provider {
    pub fn openrouter(config: &SuggestConfig) -> Self {
        Self::OpenRouter {
            api_key_env_var: config.api_key_env_var.clone(),
            model: config.model.clone(),
            site_url: config.site_url.clone(),
            app_name: config.app_name.clone(),
            temperature: Some(config.temperature),
            max_tokens: Some(config.max_tokens),
            client: Client::new(),
        }
    }

    pub fn get_available_models(&self) -> Vec<OpenRouterAvailableModel> {
        match self {
            Provider::OpenRouter { .. } => OPENROUTER_MODELS.to_vec(),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::OpenRouter { model, .. } => model,
        }
    }

    pub async fn call_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        match self {
            Provider::OpenRouter {
                api_key_env_var,
                site_url,
                app_name,
                client,
                ..
            } => {
                let actual_api_key = env::var(api_key_env_var)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var.clone()))?;

                let mut request_payload = serde_json::to_value(&request)?;
                let pinned_source = self
                    .get_available_models()
                    .into_iter()
                    .find(|m| m.model_name == request.model)
                    .map(|m| m.model_source);
                if let (Some(source), Some(obj)) =
                    (pinned_source, request_payload.as_object_mut())
                {
                    obj.insert("provider".to_string(), json!({ "only": [source] }));
                }

                tracing::debug!(
                    model = %request.model,
                    messages = request.messages.len(),
                    "sending chat completion"
                );
                let response = client
                    .post(OPENROUTER_CHAT_URL)
                    .bearer_auth(actual_api_key)
                    .header("Content-Type", "application/json")
                    .header("HTTP-Referer", site_url.as_str())
                    .header("X-Title", app_name.as_str())
                    .json(&request_payload)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let chat_response = response.json::<ChatCompletionResponse>().await?;
                    Ok(chat_response)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    tracing::warn!(%status, "chat completion rejected");
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }
}

impl MenuLlm for Provider {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, ApiConnectionError> {
        let request = match self {
            Provider::OpenRouter {
                model,
                temperature,
                max_tokens,
                ..
            } => ChatCompletionRequest {
                model: model.clone(),
                messages,
                temperature: *temperature,
                max_tokens: *max_tokens,
            },
        };

        let response = self.call_chat_completion(request).await?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ApiConnectionError::EmptyReply)
    }
}
