//! Axum route handlers for the fact-sheet API.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::{pdf_file_name, render_html};
use crate::factsheet::generator::generate_fact_sheet;
use crate::factsheet::models::FactSheet;
use crate::llm_client::GroundingChunk;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateFactSheetRequest {
    pub person_name: String,
}

#[derive(Debug, Serialize)]
pub struct FactSheetResponse {
    pub fact_sheet: FactSheet,
    pub sources: Vec<GroundingChunk>,
    pub pdf_file_name: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RenderFactSheetRequest {
    pub fact_sheet: FactSheet,
    #[serde(default)]
    pub sources: Vec<GroundingChunk>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/factsheets
///
/// Generates a fact sheet for the given person via one provider call and
/// returns the validated sheet, the unfiltered source list, and the
/// canonical export filename.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateFactSheetRequest>,
) -> Result<Json<FactSheetResponse>, AppError> {
    let person_name = request.person_name.trim();
    if person_name.is_empty() {
        return Err(AppError::Validation(
            "person_name cannot be empty".to_string(),
        ));
    }

    let (fact_sheet, sources) = generate_fact_sheet(state.llm.as_ref(), person_name).await?;

    let pdf_file_name = pdf_file_name(&fact_sheet.person_name);

    Ok(Json(FactSheetResponse {
        fact_sheet,
        sources,
        pdf_file_name,
        generated_at: Utc::now(),
    }))
}

/// POST /api/v1/factsheets/render
///
/// Renders a previously generated fact sheet as a standalone print-friendly
/// HTML document. The `Content-Disposition` filename is derived from the
/// person's name so a client capturing the page to PDF saves it under the
/// canonical name.
pub async fn handle_render(
    Json(request): Json<RenderFactSheetRequest>,
) -> Result<Response, AppError> {
    if request.fact_sheet.person_name.trim().is_empty() {
        return Err(AppError::Validation(
            "fact_sheet.person_name cannot be empty".to_string(),
        ));
    }

    let html = render_html(&request.fact_sheet, &request.sources);
    let file_name = pdf_file_name(&request.fact_sheet.person_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{file_name}\""),
            ),
        ],
        html,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_deserializes() {
        let json = r#"{"person_name": "Marie Curie"}"#;
        let request: GenerateFactSheetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.person_name, "Marie Curie");
    }

    #[test]
    fn test_render_request_sources_default_to_empty() {
        let json = r#"{
            "fact_sheet": {
                "person_name": "Marie Curie",
                "primary_connections": [],
                "education": [],
                "key_memberships_awards": [],
                "ten_things_to_know": []
            }
        }"#;
        let request: RenderFactSheetRequest = serde_json::from_str(json).unwrap();
        assert!(request.sources.is_empty());
    }

    #[test]
    fn test_response_serializes_sheet_sources_and_filename() {
        let response = FactSheetResponse {
            fact_sheet: FactSheet {
                person_name: "Marie Curie".to_string(),
                primary_connections: vec![],
                education: vec![],
                key_memberships_awards: vec![],
                ten_things_to_know: vec![],
            },
            sources: vec![],
            pdf_file_name: pdf_file_name("Marie Curie"),
            generated_at: Utc::now(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["fact_sheet"]["person_name"], "Marie Curie");
        assert_eq!(value["pdf_file_name"], "marie_curie_fact_sheet.pdf");
        assert!(value["sources"].as_array().unwrap().is_empty());
    }
}
