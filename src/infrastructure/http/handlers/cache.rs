//! Cache HTTP Handlers
//!
//! 缓存统计 / 全量清理 / 缓存文件下载

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::ports::CacheStats;
use crate::domain::synthesis::AudioCodec;
use crate::infrastructure::http::dto::{ApiResponse, PurgeData};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取缓存统计信息
pub async fn cache_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CacheStats>>, ApiError> {
    let stats = state
        .orchestrator
        .cache_stats()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read cache stats: {}", e)))?;

    Ok(Json(ApiResponse::success(stats)))
}

/// 清空缓存
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PurgeData>>, ApiError> {
    let removed = state
        .orchestrator
        .purge_cache()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to purge cache: {}", e)))?;

    tracing::info!(removed = removed, "Cache cleared via API");

    Ok(Json(ApiResponse::success(PurgeData { removed })))
}

/// 下载缓存的音频文件（缓存命中时 JSON 响应里的 audio_url 指向这里）
pub async fn download_cache_entry(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .store
        .entry_path(&filename)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(format!("Cache entry not found: {}", filename)));
        }
        Err(e) => {
            return Err(ApiError::Internal(format!("Failed to open cache entry: {}", e)));
        }
    };

    let mime = filename
        .rsplit_once('.')
        .and_then(|(_, ext)| AudioCodec::from_extension(ext))
        .map(|codec| codec.mime_type())
        .unwrap_or("application/octet-stream");

    let stream = ReaderStream::new(file);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
