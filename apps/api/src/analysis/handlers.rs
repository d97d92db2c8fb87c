//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::narrative::{build_career_prompt, split_insights};
use crate::analysis::parser::{parse_career_tracks, parse_skills_breakdown, CareerTrack, SkillsBreakdown};
use crate::errors::AppError;
use crate::pgd::{self, Gender, PgdResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PgdCalculationRequest {
    pub name: String,
    pub date_of_birth: String,
    pub gender: Gender,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    /// Extracted resume text, supplied verbatim by the caller. This
    /// service does no extraction of its own.
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub pgd: PgdResult,
    pub narrative: String,
    pub insights: String,
    pub recommendations: String,
    pub career_tracks: Vec<CareerTrack>,
    pub skills_breakdown: SkillsBreakdown,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis/pgd
///
/// Computes the PGD matrix alone — no LLM call, nothing stored. Absent
/// slots are omitted from the JSON body, never rendered as zero.
pub async fn handle_calculate_pgd(
    Json(request): Json<PgdCalculationRequest>,
) -> Result<Json<PgdResult>, AppError> {
    if request.date_of_birth.trim().is_empty() {
        return Err(AppError::Validation(
            "date_of_birth cannot be empty".to_string(),
        ));
    }

    let pgd = pgd::compute(&request.date_of_birth, request.gender)?;
    Ok(Json(pgd))
}

/// POST /api/v1/analysis
///
/// Full flow: PGD matrix, career-analysis prompt, LLM narrative, then
/// structured-field extraction. The result is returned to the caller
/// and not persisted anywhere.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if request.date_of_birth.trim().is_empty() {
        return Err(AppError::Validation(
            "date_of_birth cannot be empty".to_string(),
        ));
    }

    let pgd = pgd::compute(&request.date_of_birth, request.gender)?;

    let prompt = build_career_prompt(
        &request.name,
        &request.date_of_birth,
        request.gender,
        &pgd,
        request.resume_text.as_deref(),
    );

    let narrative = state.narrative.generate(&prompt).await?;

    let (insights, recommendations) = split_insights(&narrative);
    let career_tracks = parse_career_tracks(&narrative);
    let skills_breakdown = parse_skills_breakdown(&narrative);

    let id = Uuid::new_v4();
    info!(
        "Analysis {id} generated: {} career tracks, balance {}",
        career_tracks.len(),
        skills_breakdown.balance_ratio
    );

    Ok(Json(AnalysisResponse {
        id,
        pgd,
        narrative,
        insights,
        recommendations,
        career_tracks,
        skills_breakdown,
        created_at: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::analysis::narrative::NarrativeGenerator;
    use crate::config::Config;

    struct CannedGenerator(&'static str);

    #[async_trait]
    impl NarrativeGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, AppError> {
            assert!(prompt.contains("PSYCHOGRAPHIC PROFILE"));
            Ok(self.0.to_string())
        }
    }

    fn test_state(narrative: &'static str) -> AppState {
        AppState {
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
            narrative: Arc::new(CannedGenerator(narrative)),
        }
    }

    const CANNED_NARRATIVE: &str = "### PERSONALITY ANALYSIS\n\
        Anna is persistent and organized.\n\
        ### TRACK 1: Operations Manager\n\
        **Match Score: 80%**\n\
        **Description:** Keeps complex processes on the rails.\n\
        **Key Strengths:** planning, follow-through\n\
        **Develop:** public speaking\n\
        ### SKILLS BALANCE:\n\
        soft skills: 65, hard skills: 35.\n\
        ### RECOMMENDATIONS\n\
        Take on a cross-team project.";

    #[tokio::test]
    async fn test_create_analysis_full_flow() {
        let request = AnalysisRequest {
            name: "Anna".to_string(),
            date_of_birth: "15.06.1990".to_string(),
            gender: Gender::Female,
            resume_text: None,
        };

        let Json(body) = handle_create_analysis(State(test_state(CANNED_NARRATIVE)), Json(request))
            .await
            .unwrap();

        assert_eq!(body.pgd.main_points.m, Some(19));
        assert_eq!(body.career_tracks.len(), 1);
        assert_eq!(body.career_tracks[0].title, "Operations Manager");
        assert_eq!(body.skills_breakdown.balance_ratio, "65/35");
        assert!(body.insights.contains("persistent"));
        assert!(body.recommendations.contains("cross-team project"));
    }

    #[tokio::test]
    async fn test_create_analysis_malformed_date_is_bad_request() {
        let request = AnalysisRequest {
            name: "Anna".to_string(),
            date_of_birth: "1990/06/15".to_string(),
            gender: Gender::Female,
            resume_text: None,
        };

        let err = handle_create_analysis(State(test_state(CANNED_NARRATIVE)), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Pgd(_)));
    }

    #[test]
    fn test_pgd_request_deserialization() {
        let json = serde_json::json!({
            "name": "Anna",
            "date_of_birth": "15.06.1990",
            "gender": "female"
        });
        let request: PgdCalculationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.gender, Gender::Female);
        assert_eq!(request.date_of_birth, "15.06.1990");
    }

    #[test]
    fn test_analysis_request_resume_text_optional() {
        let json = serde_json::json!({
            "name": "Ivan",
            "date_of_birth": "01.01.2000",
            "gender": "male"
        });
        let request: AnalysisRequest = serde_json::from_value(json).unwrap();
        assert!(request.resume_text.is_none());
    }

    #[test]
    fn test_analysis_request_unrecognized_gender_accepted() {
        // Unknown markers must deserialize, not 422 — the engine treats
        // them as "no gender-conditioned slots".
        let json = serde_json::json!({
            "name": "X",
            "date_of_birth": "01.01.2000",
            "gender": "unspecified"
        });
        let request: AnalysisRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.gender, Gender::Other);
    }
}
