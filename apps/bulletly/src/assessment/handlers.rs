//! Axum route handlers for the Bullet API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::assessment::pipeline::{assess_bullet, AssessOptions, DEFAULT_SUGGESTION_COUNT};
use crate::assessment::styles::{Style, Tone};
use crate::assessment::suggestions::{build_generator, SuggestionGenerator};
use crate::errors::AppError;
use crate::models::feedback::BulletFeedback;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Rewrite knobs shared by single and batch requests.
/// Style and tone are free text; unknown values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct RewriteParams {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub seniority: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub keep_metrics: bool,
    pub n: Option<usize>,
    #[serde(default)]
    pub dry_run: bool,
}

impl RewriteParams {
    fn options(&self) -> Result<AssessOptions, AppError> {
        let n = self.n.unwrap_or(DEFAULT_SUGGESTION_COUNT);
        if n == 0 {
            return Err(AppError::Validation("n must be at least 1".to_string()));
        }
        Ok(AssessOptions {
            role: self.role.clone(),
            seniority: self.seniority.clone(),
            style: Style::from_name(&self.style),
            tone: Tone::from_name(&self.tone),
            keep_metrics: self.keep_metrics,
            n,
        })
    }

    fn generator(&self, state: &AppState) -> Box<dyn SuggestionGenerator> {
        build_generator(self.dry_run, state.completion.clone(), state.model.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub bullet: String,
    #[serde(flatten)]
    pub params: RewriteParams,
}

#[derive(Debug, Deserialize)]
pub struct AssessBatchRequest {
    pub bullets: Vec<String>,
    #[serde(flatten)]
    pub params: RewriteParams,
}

#[derive(Debug, Serialize)]
pub struct BulletError {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AssessBatchResponse {
    pub results: Vec<BulletFeedback>,
    pub errors: Vec<BulletError>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/bullets/assess
///
/// Assesses one bullet. A feedback record that fails validation is a 422.
pub async fn handle_assess(
    State(state): State<AppState>,
    Json(request): Json<AssessRequest>,
) -> Result<Json<BulletFeedback>, AppError> {
    if request.bullet.trim().is_empty() {
        return Err(AppError::Validation("bullet cannot be empty".to_string()));
    }

    let options = request.params.options()?;
    let generator = request.params.generator(&state);
    let feedback = assess_bullet(&request.bullet, &options, generator.as_ref()).await?;

    Ok(Json(feedback))
}

/// POST /api/v1/bullets/assess-batch
///
/// Assesses bullets one after another. Blank bullets are skipped; a bullet that
/// fails validation is reported in `errors` and the rest still run.
pub async fn handle_assess_batch(
    State(state): State<AppState>,
    Json(request): Json<AssessBatchRequest>,
) -> Result<Json<AssessBatchResponse>, AppError> {
    let options = request.params.options()?;
    let generator = request.params.generator(&state);

    let mut results = Vec::new();
    let mut errors = Vec::new();
    for (index, bullet) in request.bullets.iter().enumerate() {
        if bullet.trim().is_empty() {
            continue;
        }
        match assess_bullet(bullet, &options, generator.as_ref()).await {
            Ok(feedback) => results.push(feedback),
            Err(e) => {
                warn!("Bullet {index} rejected: {e}");
                errors.push(BulletError {
                    index,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(Json(AssessBatchResponse { results, errors }))
}
