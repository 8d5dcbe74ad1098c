use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::read_text;
use crate::models::resume::TailoredModel;
use crate::parsing::keywords::extract_keywords;
use crate::state::AppState;
use crate::tailoring::orchestrator::{build_tailored_model, TailorInput};

/// Seed skills and keywords taken from the JD, each.
const SEED_KEYWORDS_PER_LIST: usize = 25;

struct Upload {
    filename: String,
    data: Bytes,
}

/// Reads the `jd` and `resume` file fields. Other fields are ignored.
async fn read_uploads(mut multipart: Multipart) -> Result<(Upload, Upload), AppError> {
    let mut jd = None;
    let mut resume = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or_default().to_string();
        match name.as_str() {
            "jd" => {
                jd = Some(Upload {
                    filename,
                    data: field.bytes().await?,
                })
            }
            "resume" => {
                resume = Some(Upload {
                    filename,
                    data: field.bytes().await?,
                })
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    let jd = jd.ok_or_else(|| AppError::Validation("Missing 'jd' file".to_string()))?;
    let resume = resume.ok_or_else(|| AppError::Validation("Missing 'resume' file".to_string()))?;
    Ok((jd, resume))
}

/// Upload → extracted text → seed keywords → tailored model.
async fn tailor_from_uploads(
    state: &AppState,
    multipart: Multipart,
    request_id: Uuid,
) -> Result<TailoredModel, AppError> {
    let (jd, resume) = read_uploads(multipart).await?;
    info!(
        "Received jd='{}' ({} bytes), resume='{}' ({} bytes)",
        jd.filename,
        jd.data.len(),
        resume.filename,
        resume.data.len()
    );

    let (jd_text, resume_text) = tokio::task::spawn_blocking(move || {
        let (jd_kind, jd_text) = read_text(&jd.filename, &jd.data);
        let (resume_kind, resume_text) = read_text(&resume.filename, &resume.data);
        debug!("Extracted jd as {jd_kind}, resume as {resume_kind}");
        (jd_text, resume_text)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Text extraction task failed: {e}")))?;

    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("Could not parse JD text".to_string()));
    }
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("Could not parse resume text".to_string()));
    }

    let seeds = extract_keywords(
        &jd_text,
        &state.seed_skills,
        SEED_KEYWORDS_PER_LIST,
        &state.lexicon,
    );

    let model = build_tailored_model(
        TailorInput {
            resume_text: &resume_text,
            jd_text: &jd_text,
            jd_skills: &seeds.skills,
            jd_keywords: &seeds.keywords,
        },
        &state.lexicon,
        state.rewriter.as_ref(),
    )
    .instrument(info_span!("tailor", %request_id))
    .await;

    info!(
        "Request {request_id} tailored: {} experience, {} project entries",
        model.experience_entries.len(),
        model.project_entries.len()
    );
    Ok(model)
}

/// POST /api/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TailoredModel>, AppError> {
    let request_id = Uuid::new_v4();
    info!("Preview request {request_id}");
    let model = tailor_from_uploads(&state, multipart, request_id).await?;
    Ok(Json(model))
}

/// POST /api/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    info!("Tailor request {request_id}");
    let model = tailor_from_uploads(&state, multipart, request_id).await?;

    let renderer = state.renderer.as_ref();
    let document = renderer.render(&model)?;
    let disposition = format!("attachment; filename={}", renderer.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, renderer.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}
