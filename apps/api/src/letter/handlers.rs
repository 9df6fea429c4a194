use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::letter::coverletter::fill_coverletter_template;
use crate::scrape::fetch::get_job_data;
use crate::scrape::parser::JobRecord;
use crate::state::AppState;
use crate::template::extract::{normalize_font_size, ExtractError, DEFAULT_FONT_SIZE};

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub job: JobRecord,
    pub letter_text: String,
    pub letter_html: String,
    pub font_size: String,
}

/// POST /api/v1/coverletter/:job_id
/// Multipart upload (field `template`) of a .txt/.docx/.pdf cover-letter
/// template. The job is refetched — the pipeline is stateless per request.
pub async fn handle_fill_coverletter(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let mut template: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("template") {
            let filename = field
                .file_name()
                .ok_or_else(|| AppError::Validation("No selected file".to_string()))?
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
            template = Some((filename, bytes.to_vec()));
        }
    }
    let (filename, bytes) =
        template.ok_or_else(|| AppError::Validation("No file part".to_string()))?;
    if filename.is_empty() || bytes.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }

    let job = get_job_data(state.fetcher.as_ref(), &job_id)
        .await
        .map_err(|e| AppError::Fetch(e.to_string()))?;

    let letter =
        fill_coverletter_template(&job, state.classifier.as_ref(), &filename, &bytes)
            .map_err(|e| match e {
                ExtractError::Unsupported(name) => AppError::UnsupportedTemplate(name),
                other => AppError::Validation(format!("Failed to process template: {other}")),
            })?;

    Ok(Json(CoverLetterResponse {
        job,
        letter_text: letter.text,
        letter_html: letter.html,
        font_size: letter.font_size,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub letter_html: String,
    #[serde(default)]
    pub font_size: Option<String>,
}

/// POST /api/v1/coverletter/download
/// Renders the edited letter HTML to a PDF attachment.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Json(req): Json<DownloadRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.letter_html.trim().is_empty() {
        return Err(AppError::Validation("No letter content provided".to_string()));
    }
    let font_size = normalize_font_size(req.font_size.as_deref().unwrap_or(DEFAULT_FONT_SIZE));

    let pdf = state
        .renderer
        .render(&req.letter_html, &font_size)
        .await
        .map_err(|e| AppError::Render(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"cover_letter.pdf\"".to_string(),
            ),
        ],
        pdf,
    ))
}
