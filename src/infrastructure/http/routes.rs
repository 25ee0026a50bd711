//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/tts              POST    文本转语音（JSON 信封，推荐）
//! - /api/tts              GET     文本转语音（直接返回音频二进制）
//! - /api/voices           GET     获取支持的音色列表
//! - /api/cache/info       GET     获取缓存统计
//! - /api/cache            DELETE  清空缓存
//! - /api/cache/{filename} GET     下载缓存的音频文件
//! - /api/health           GET     健康检查

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tts",
            post(handlers::synthesize).get(handlers::synthesize_binary),
        )
        .route("/voices", get(handlers::list_voices))
        .nest("/cache", cache_routes())
}

/// Cache 路由
fn cache_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", delete(handlers::clear_cache))
        .route("/info", get(handlers::cache_info))
        .route("/:filename", get(handlers::download_cache_entry))
}
