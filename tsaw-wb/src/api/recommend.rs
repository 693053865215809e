//! Recommendation proxy
//!
//! Forwards one row's fields to the Gemini API and reshapes the reply
//! into a stable `{ "recommendation": "<text>" }` contract. Every
//! outcome, including failure, carries a `recommendation` string so the
//! caller always has something to display.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tsaw_common::config::API_KEY_ENV;
use tsaw_common::model::TARGET_SCORE;

use crate::gemini::{GeminiClient, GeminiError, GeminiReply};
use crate::AppState;

/// Longest upstream error body echoed back to the caller.
const MAX_DIAGNOSTIC_LEN: usize = 500;

const SYSTEM_INSTRUCTION: &str = "You are a senior technical SEO engineer. Produce an \
implementation-ready Markdown recommendation for the inspection element under review. \
Tailor the depth of remediation to the severity implied by the score, include measurable \
acceptance criteria, and name the implementer roles responsible for each step.";

/// One row's fields, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecommendRequest {
    pub analysis: String,
    pub score: String,
    pub element: String,
    pub category: String,
    pub subcategory: String,
}

/// The response always carries `recommendation`, success or not.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendation: String,
}

/// POST /api/recommend
///
/// Request lifecycle: credential check, target-score short-circuit, one
/// upstream call, defensive reply decoding. No retries; a failed request
/// must be re-triggered by the user.
pub async fn generate_recommendation(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> (StatusCode, Json<RecommendResponse>) {
    let (status, recommendation) = match &state.gemini {
        None => {
            warn!("Recommendation requested but no upstream credential is configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "{} is not configured on the server, so no recommendation can be generated.",
                    API_KEY_ENV
                ),
            )
        }
        Some(client) => handle_request(client, &request).await,
    };

    (status, Json(RecommendResponse { recommendation }))
}

async fn handle_request(client: &GeminiClient, request: &RecommendRequest) -> (StatusCode, String) {
    // Rows already at the target score never consume a model call
    if request.score == TARGET_SCORE {
        info!(element = %request.element, "Score already at target, skipping upstream call");
        return (
            StatusCode::OK,
            format!(
                "No remediation needed for \"{}\": this element already meets the target score of {}.",
                request.element, TARGET_SCORE
            ),
        );
    }

    let prompt = build_prompt(request);

    match client.generate(&prompt).await {
        Ok(reply) => match reply {
            GeminiReply::Parts(text) | GeminiReply::Flat(text) => (StatusCode::OK, text),
            GeminiReply::Missing { reason } => {
                warn!(reason = %reason, "Upstream returned no usable text");
                (StatusCode::OK, missing_text_message(&reason))
            }
        },
        Err(GeminiError::Api(status, body)) => {
            warn!(status, "Upstream API returned an error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Upstream API error (status {}): {}",
                    status,
                    truncate(&body, MAX_DIAGNOSTIC_LEN)
                ),
            )
        }
        Err(e) => {
            warn!(error = %e, "Recommendation request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Recommendation request failed: {}", e),
            )
        }
    }
}

/// Build the single prompt sent upstream: the system instruction followed
/// by the row's fields and the required section layout.
fn build_prompt(request: &RecommendRequest) -> String {
    let score = if request.score.is_empty() {
        "unscored"
    } else {
        request.score.as_str()
    };

    format!(
        "{system}\n\n\
         Inspection element: {element}\n\
         Issue category: {category} / {subcategory}\n\
         Current score: {score} (target score is {target})\n\
         Auditor analysis:\n{analysis}\n\n\
         Write the recommendation with these six sections:\n\
         1. Summary and impact\n\
         2. Remediation steps (numbered)\n\
         3. Acceptance criteria (measurable)\n\
         4. Owner and estimated effort\n\
         5. Risks and dependencies\n\
         6. Optional nice-to-haves",
        system = SYSTEM_INSTRUCTION,
        element = request.element,
        category = request.category,
        subcategory = request.subcategory,
        score = score,
        target = TARGET_SCORE,
        analysis = request.analysis,
    )
}

/// Shown when the upstream request succeeded but yielded no extractable
/// text. Distinguished from a hard failure by its 200 status.
fn missing_text_message(reason: &str) -> String {
    format!("No text returned by the model (reason: {}).", reason)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}
