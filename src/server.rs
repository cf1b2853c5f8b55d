//! HTTP surface: caption lookup for the browser extension and other clients.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::captions::Transcript;
use crate::errors::CaptionError;
use crate::resolver::Resolution;
use crate::source::CaptionSource;
use crate::transcript::TranscriptService;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No video ID provided")]
    BadRequest,

    #[error("No captions found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CaptionError> for ApiError {
    fn from(err: CaptionError) -> Self {
        match err {
            CaptionError::MissingIdentifier => ApiError::BadRequest,
            CaptionError::NoCaptionsAvailable(e) => ApiError::NotFound(e.to_string()),
            CaptionError::Unexpected(msg) => ApiError::Internal(msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct CaptionQuery {
    video_id: Option<String>,
}

#[derive(Serialize)]
struct CaptionEnvelope {
    captions: Transcript,
}

pub fn create_router<S>(service: Arc<TranscriptService<S>>) -> Router
where
    S: CaptionSource + 'static,
{
    Router::new()
        .route("/api/captions", get(get_captions::<S>))
        .route("/fetch-captions", get(fetch_captions::<S>))
        .layer(cors_layer())
        .with_state(service)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
        .max_age(Duration::from_secs(600))
}

async fn get_captions<S>(
    State(service): State<Arc<TranscriptService<S>>>,
    Query(query): Query<CaptionQuery>,
) -> ApiResult<Json<Transcript>>
where
    S: CaptionSource + 'static,
{
    let resolution = resolve_query(service, query).await?;
    Ok(Json(resolution.transcript))
}

/// Same lookup wrapped as `{"captions": [...]}`, the shape the extension reads.
async fn fetch_captions<S>(
    State(service): State<Arc<TranscriptService<S>>>,
    Query(query): Query<CaptionQuery>,
) -> ApiResult<Json<CaptionEnvelope>>
where
    S: CaptionSource + 'static,
{
    let resolution = resolve_query(service, query).await?;
    Ok(Json(CaptionEnvelope {
        captions: resolution.transcript,
    }))
}

async fn resolve_query<S>(
    service: Arc<TranscriptService<S>>,
    query: CaptionQuery,
) -> Result<Resolution, CaptionError>
where
    S: CaptionSource + 'static,
{
    let input = query.video_id.unwrap_or_default();

    // A panicking caption source must not take the connection down with it.
    let task = tokio::spawn(async move { service.fetch(&input).await });
    match task.await {
        Ok(result) => result.map(|(_, resolution)| resolution),
        Err(e) => {
            log::error!("Caption lookup task failed: {}", e);
            Err(CaptionError::unexpected(format!("caption lookup failed: {}", e)))
        }
    }
}

/// Serves until `shutdown` resolves.
pub async fn serve<S, F>(
    listener: TcpListener,
    service: Arc<TranscriptService<S>>,
    shutdown: F,
) -> std::io::Result<()>
where
    S: CaptionSource + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        log::info!("Serving captions on http://{}/api/captions", addr);
    }
    axum::serve(listener, create_router(service))
        .with_graceful_shutdown(shutdown)
        .await
}
