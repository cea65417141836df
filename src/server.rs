use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ResponseMode;
use crate::summarize::Summarizer;
use crate::title::TitleResolver;
use crate::youtube::TranscriptResolver;

/// Shared, read-only per-request context. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub mode: ResponseMode,
    pub titles: Arc<TitleResolver>,
    pub transcripts: Arc<TranscriptResolver>,
    pub summarizer: Option<Arc<Summarizer>>,
}

/// Request outcomes that surface to the client. Display strings are the
/// exact wire-format error messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing youtube_url in request")]
    MissingUrl,

    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("Transcript not available")]
    TranscriptUnavailable,

    #[error("Failed to summarize transcript")]
    SummarizeFailed,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl | ApiError::InvalidUrl => StatusCode::BAD_REQUEST,
            ApiError::TranscriptUnavailable => StatusCode::NOT_FOUND,
            ApiError::SummarizeFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub youtube_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Liveness probe
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// The request pipeline: parse body, extract video ID, resolve title
/// (degrades to a placeholder), resolve transcript (gate), optionally
/// summarize (gate).
async fn summarize(
    State(state): State<AppState>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Ok(Json(request)) = body else {
        return Err(ApiError::MissingUrl);
    };
    let url = request.youtube_url.ok_or(ApiError::MissingUrl)?;

    let video_id = crate::extract_video_id(&url).ok_or(ApiError::InvalidUrl)?;

    let title = state.titles.resolve(&video_id).await;

    let transcript = state.transcripts.resolve(&video_id).await.map_err(|e| {
        // The variant message names which taxonomy case occurred
        error!("Transcript unavailable for {video_id}: {e}");
        ApiError::TranscriptUnavailable
    })?;
    let transcript_text = transcript.text();

    let (transcript_field, summary) = match state.mode {
        ResponseMode::Transcript => (Some(transcript_text), None),
        ResponseMode::Summary => {
            let summary = run_summarizer(&state, &title, &transcript_text, &video_id).await?;
            (None, Some(summary))
        }
        ResponseMode::Both => {
            let summary = run_summarizer(&state, &title, &transcript_text, &video_id).await?;
            (Some(transcript_text), Some(summary))
        }
    };

    info!("Handled {video_id} ({} fragments, mode: {})", transcript.fragments.len(), state.mode);

    Ok(Json(SummarizeResponse {
        title,
        transcript: transcript_field,
        summary,
    }))
}

async fn run_summarizer(
    state: &AppState,
    title: &str,
    transcript_text: &str,
    video_id: &str,
) -> Result<String, ApiError> {
    // Startup only builds a state without a summarizer in transcript mode
    let Some(summarizer) = &state.summarizer else {
        error!("Mode {} requires a summarizer but none is configured", state.mode);
        return Err(ApiError::SummarizeFailed);
    };

    summarizer.summarize(title, transcript_text).await.map_err(|e| {
        error!("Summarization failed for {video_id}: {e}");
        ApiError::SummarizeFailed
    })
}
