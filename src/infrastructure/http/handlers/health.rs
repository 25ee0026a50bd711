//! Health Handler
//!
//! 健康检查端点

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub upstream: bool,
    pub version: &'static str,
    pub timestamp: String,
}

/// 健康检查
///
/// 上游 TTS 不可达时返回 degraded，服务本身仍可响应缓存命中
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let upstream = state.gateway.health_check().await;
    Json(HealthResponse {
        status: if upstream { "healthy" } else { "degraded" },
        upstream,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })
}
