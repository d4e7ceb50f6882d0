use axum::{
    Json, Router,
    body::Bytes,
    extract::DefaultBodyLimit,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::lesson::{LessonError, LessonRecord};
use crate::lesson_export;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid JSON body")]
    InvalidJson,
    #[error(transparent)]
    Invalid(#[from] LessonError),
    #[error("Not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidJson | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Serialize)]
struct Status {
    status: &'static str,
}

async fn health() -> Json<Status> {
    Json(Status { status: "ok" })
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn generate(body: Bytes) -> Result<Response, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("rejected generate request: {e}");
        ApiError::InvalidJson
    })?;
    let lesson = LessonRecord::from_json(&payload)
        .inspect_err(|e| log::warn!("rejected generate request: {e}"))?;

    let pdf = lesson_export::generate_lesson_pdf(&lesson, OffsetDateTime::now_utc());
    log::info!("generated {} ({} bytes)", pdf.filename, pdf.bytes.len());

    let filename: String = pdf
        .filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect();
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, pdf.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf.bytes,
    )
        .into_response())
}

pub fn router(config: &Config) -> Router {
    Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/generate", post(generate).fallback(not_found))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CorsLayer::permissive())
}
