//! Voice HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::VoiceInfo;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// 获取支持的音色列表
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<VoiceInfo>>> {
    Json(ApiResponse::success(state.catalog.all().to_vec()))
}
