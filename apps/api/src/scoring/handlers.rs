//! Axum route handler for the scoring endpoint.

use axum::extract::{Multipart, State};

use crate::errors::AppError;
use crate::scoring::score_resume;
use crate::scoring::upload::parse_score_upload;
use crate::state::AppState;

/// POST /api/resume/score
///
/// Multipart parts `resume` and `jobDesc`. Responds with the model's answer
/// as plain text.
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<String, AppError> {
    let upload = parse_score_upload(multipart).await?;
    score_resume(state.extractor.as_ref(), &state.llm, upload).await
}
