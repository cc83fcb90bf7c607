use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpenRouterAvailableModel {
    pub model_name: &'static str,
    pub model_source: &'static str,
}

/// Models with a pinned upstream provider. Requests for these are routed
/// only to `model_source`.
pub const OPENROUTER_MODELS: &[OpenRouterAvailableModel] = &[
    OpenRouterAvailableModel {
        model_name: "qwen/qwen3-32b",
        model_source: "cerebras",
    },
    OpenRouterAvailableModel {
        model_name: "meta-llama/llama-3.3-70b-instruct",
        model_source: "cerebras",
    },
];

#[derive(Clone, Debug)]
pub enum Provider {
    OpenRouter {
        api_key_env_var: String,
        model: String,
        site_url: String,
        app_name: String,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
        client: Client,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponseMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionResponseMessage,
    pub finish_reason: Option<String>,
    pub index: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: Option<u32>,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: Option<String>,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    pub usage: Option<ChatCompletionUsage>,
}
