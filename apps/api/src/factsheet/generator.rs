//! Fact-sheet generation — composes the prompt, makes exactly one provider
//! call with web search enabled, and normalizes the result.
//!
//! There is deliberately no retry, timeout, or backoff here: one invocation
//! means one provider call. The provider may perform multiple retrieval steps
//! internally; that is opaque to this module. Resubmission is the caller's
//! decision.

use tracing::info;

use crate::errors::AppError;
use crate::factsheet::models::FactSheet;
use crate::factsheet::normalizer::normalize_fact_sheet;
use crate::factsheet::prompts::{FACT_SHEET_PROMPT_TEMPLATE, FACT_SHEET_SYSTEM};
use crate::llm_client::{GroundingChunk, LlmError, TextGenerator};

/// Generates a fact sheet for `person_name`, returning the validated sheet
/// plus the provider's grounding chunks in the order they were returned.
///
/// The chunk list is passed through unfiltered; chunks without a URI are
/// dropped only at render time.
pub async fn generate_fact_sheet(
    llm: &dyn TextGenerator,
    person_name: &str,
) -> Result<(FactSheet, Vec<GroundingChunk>), AppError> {
    let prompt = FACT_SHEET_PROMPT_TEMPLATE.replace("{person_name}", person_name);

    let output = llm
        .generate(&prompt, FACT_SHEET_SYSTEM)
        .await
        .map_err(|e| match e {
            LlmError::InvalidApiKey { message } => {
                tracing::error!("Provider rejected API key: {message}");
                AppError::InvalidCredential
            }
            other => AppError::Provider(other.to_string()),
        })?;

    let sheet = normalize_fact_sheet(&output.text)?;

    info!(
        "Generated fact sheet for '{}' with {} grounding chunks",
        sheet.person_name,
        output.grounding_chunks.len()
    );

    Ok((sheet, output.grounding_chunks))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{GenerationOutput, WebSource};

    /// Scripted provider: returns a fixed result and counts invocations.
    struct FakeGenerator {
        result: Result<GenerationOutput, fn() -> LlmError>,
        calls: AtomicU32,
    }

    impl FakeGenerator {
        fn returning_text(text: &str, chunks: Vec<GroundingChunk>) -> Self {
            Self {
                result: Ok(GenerationOutput {
                    text: text.to_string(),
                    grounding_chunks: chunks,
                }),
                calls: AtomicU32::new(0),
            }
        }

        fn failing_with(err: fn() -> LlmError) -> Self {
            Self {
                result: Err(err),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, _: &str, _: &str) -> Result<GenerationOutput, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(output) => Ok(output.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    const VALID_RESPONSE: &str = r#"{
        "person_name": "Grace Hopper",
        "primary_connections": ["Howard Aiken"],
        "education": ["Yale University, PhD Mathematics"],
        "key_memberships_awards": ["Presidential Medal of Freedom"],
        "ten_things_to_know": ["Coined the term 'debugging'"]
    }"#;

    fn web_chunk(uri: &str) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: Some(uri.to_string()),
                title: None,
            }),
        }
    }

    #[tokio::test]
    async fn test_successful_generation_returns_sheet_and_chunks() {
        let llm = FakeGenerator::returning_text(
            VALID_RESPONSE,
            vec![web_chunk("https://example.com/hopper")],
        );

        let (sheet, chunks) = generate_fact_sheet(&llm, "Grace Hopper").await.unwrap();
        assert_eq!(sheet.person_name, "Grace Hopper");
        assert_eq!(chunks.len(), 1);
    }

    #[tokio::test]
    async fn test_exactly_one_provider_call_per_invocation() {
        let llm = FakeGenerator::returning_text(VALID_RESPONSE, vec![]);
        generate_fact_sheet(&llm, "Grace Hopper").await.unwrap();
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_retry_on_provider_failure() {
        let llm = FakeGenerator::failing_with(|| LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });
        let err = generate_fact_sheet(&llm, "Grace Hopper").await.unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_api_key_maps_to_invalid_credential() {
        // The mapping holds regardless of the surrounding message content.
        let llm = FakeGenerator::failing_with(|| LlmError::InvalidApiKey {
            message: "something something API key not valid something".to_string(),
        });
        let err = generate_fact_sheet(&llm, "Grace Hopper").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredential));
    }

    #[tokio::test]
    async fn test_unparseable_response_surfaces_malformed() {
        let llm = FakeGenerator::returning_text("I could not find that person, sorry!", vec![]);
        let err = generate_fact_sheet(&llm, "Nobody").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_chunks_without_uri_pass_through_unfiltered() {
        let chunks = vec![
            web_chunk("https://example.com/a"),
            GroundingChunk { web: None },
            GroundingChunk {
                web: Some(WebSource {
                    uri: None,
                    title: Some("No link".to_string()),
                }),
            },
        ];
        let llm = FakeGenerator::returning_text(VALID_RESPONSE, chunks);
        let (_, returned) = generate_fact_sheet(&llm, "Grace Hopper").await.unwrap();
        assert_eq!(returned.len(), 3);
    }
}
