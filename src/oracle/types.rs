use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    pub options: GenerateOptions,
}

#[derive(Debug, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub options: ChatOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatOptions {
    pub num_ctx: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}

/// Structured metadata the oracle returns for one record in a batch.
///
/// All fields are optional: the oracle is probabilistic and may omit any of
/// them, and a partially filled analysis is still worth persisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAnalysis {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub technical_depth: Option<i64>,
    /// Kept as raw JSON: models occasionally return a string instead of the
    /// requested array, and the store persists it verbatim either way.
    #[serde(default)]
    pub keywords: serde_json::Value,
    #[serde(default)]
    pub summary: Option<String>,
}
