use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::errors::AppError;
use crate::extraction::UploadedDocument;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDesc";

/// The two documents of a scoring request.
#[derive(Debug)]
pub struct ScoreUpload {
    pub resume: UploadedDocument,
    pub job_description: UploadedDocument,
}

/// Reads the multipart body, keeping the `resume` and `jobDesc` parts.
/// Other fields are drained and ignored.
pub async fn parse_score_upload(mut multipart: Multipart) -> Result<ScoreUpload, AppError> {
    let mut resume: Option<UploadedDocument> = None;
    let mut job_description: Option<UploadedDocument> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        if name != RESUME_FIELD && name != JOB_DESCRIPTION_FIELD {
            field.bytes().await.map_err(multipart_error)?;
            continue;
        }

        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await.map_err(multipart_error)?;

        let document = UploadedDocument {
            field: name.clone(),
            file_name,
            content_type,
            data,
        };
        if name == RESUME_FIELD {
            resume = Some(document);
        } else {
            job_description = Some(document);
        }
    }

    Ok(ScoreUpload {
        resume: resume.ok_or_else(|| missing_part(RESUME_FIELD))?,
        job_description: job_description.ok_or_else(|| missing_part(JOB_DESCRIPTION_FIELD))?,
    })
}

fn missing_part(name: &str) -> AppError {
    AppError::Validation(format!("Required part '{name}' is not present"))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Failed to read multipart body: {}", e.body_text()))
    }
}
