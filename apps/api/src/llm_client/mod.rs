/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
///
/// Model: gemini-2.5-flash-preview-04-17 (hardcoded — do not make configurable
/// to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all fact-sheet generation calls.
pub const MODEL: &str = "gemini-2.5-flash-preview-04-17";

/// Substring the Gemini REST API puts in its error message when the key is
/// rejected. The error envelope carries no stable machine code for this case,
/// so detection stays a substring match — a known fragility.
const INVALID_KEY_MARKER: &str = "API key not valid";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("API key rejected: {message}")]
    InvalidApiKey { message: String },

    #[error("Model returned no text content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent REST API)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Tool declaration enabling provider-side web search grounding.
#[derive(Debug, Serialize)]
struct Tool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

/// One citation chunk from the provider's grounding metadata.
/// Chunks without a `web.uri` are kept here and filtered at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

/// Web citation attached to a grounding chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Generator trait + Gemini implementation
// ────────────────────────────────────────────────────────────────────────────

/// Result of one generation call: the model's raw text plus the citation
/// chunks the provider reports having grounded the answer on.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub text: String,
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// The text-generation seam. Implement this to swap providers (or inject a
/// scripted fake in tests) without touching handler or generator code.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, system: &str) -> Result<GenerationOutput, LlmError>;
}

/// The Gemini client used by all services.
/// Issues exactly one HTTP request per invocation — no retry, no backoff,
/// and no client-side timeout. Callers that need a deadline must impose one.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<GenerationOutput, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                parts: vec![Part { text: system }],
            },
            tools: vec![Tool {
                google_search: serde_json::Map::new(),
            }],
        };

        let url = format!("{GEMINI_API_BASE_URL}/{MODEL}:generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            if message.contains(INVALID_KEY_MARKER) {
                return Err(LlmError::InvalidApiKey { message });
            }

            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyContent)?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        let grounding_chunks = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default();

        debug!(
            "Gemini call succeeded: {} chars, {} grounding chunks",
            text.len(),
            grounding_chunks.len()
        );

        Ok(GenerationOutput {
            text,
            grounding_chunks,
        })
    }
}
