// ATS scoring: extract both documents, render the rubric prompt, relay the
// model's answer. All LLM calls go through llm_client.

pub mod escape;
pub mod handlers;
pub mod prompts;
pub mod upload;

use tracing::info;

use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::llm_client::LlmClient;
use crate::scoring::prompts::build_scoring_prompt;
use crate::scoring::upload::ScoreUpload;

/// Full pipeline: extract(resume) → extract(jobDesc) → prompt → LLM → answer text.
pub async fn score_resume(
    extractor: &dyn TextExtractor,
    llm: &LlmClient,
    upload: ScoreUpload,
) -> Result<String, AppError> {
    let resume_text = extractor.extract_capped(upload.resume).await?;
    let jd_text = extractor.extract_capped(upload.job_description).await?;

    let prompt = build_scoring_prompt(&jd_text, &resume_text);
    info!(
        resume_chars = resume_text.chars().count(),
        jd_chars = jd_text.chars().count(),
        prompt_chars = prompt.chars().count(),
        "Requesting ATS score"
    );

    let answer = llm.generate(&prompt).await?;
    Ok(answer)
}
