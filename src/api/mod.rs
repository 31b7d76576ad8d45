use serde::{Deserialize, Serialize};

pub mod chat;
pub mod client;
pub mod models;
pub mod transport;

pub use client::{ApiError, CompletionClient, ServerClient};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize, Debug)]
pub struct ChatCompletionMessage {
    pub content: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChatCompletionChoice {
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, if the server sent it.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ModelInfo {
    pub id: String,
}

#[derive(Deserialize, Debug)]
pub struct ModelsResponse {
    pub data: Vec<ModelInfo>,
}

/// Body of `POST /v1/audio/speech` on the TTS server.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub model: String,
    pub voice: String,
    pub input: String,
    pub response_format: String,
    pub speed: u32,
    pub stream: bool,
    pub params: SpeechRequestParams,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SpeechRequestParams {
    pub desired_length: u32,
    pub max_length: u32,
    pub halve_first_chunk: bool,
    pub exaggeration: f64,
    pub cfg_weight: f64,
    pub temperature: f64,
    pub device: String,
    pub dtype: String,
    pub cpu_offload: bool,
    pub chunked: bool,
    pub cache_voice: bool,
    pub tokens_per_slice: Option<u32>,
    pub remove_milliseconds: Option<u32>,
    pub remove_milliseconds_start: Option<u32>,
    pub chunk_overlap_method: String,
    pub seed: i64,
    pub use_compilation: bool,
    pub max_new_tokens: u32,
    pub max_cache_len: u32,
}
