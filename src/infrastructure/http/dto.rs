//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    #[allow(dead_code)]
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// TTS DTOs
// ============================================================================

/// POST /api/tts 请求体
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    pub voice_type: Option<i32>,
    pub sample_rate: Option<u32>,
    pub codec: Option<String>,
    pub emotion: Option<String>,
}

/// GET /api/tts 查询参数
#[derive(Debug, Deserialize)]
pub struct TtsQuery {
    pub text: String,
    pub voice_type: Option<i32>,
    pub sample_rate: Option<u32>,
    pub codec: Option<String>,
    pub emotion: Option<String>,
}

/// TTS 合成响应数据
///
/// 新鲜合成返回内联 base64，缓存命中返回引用 URL
#[derive(Debug, Serialize)]
pub struct TtsData {
    pub voice_type: i32,
    pub sample_rate: u32,
    pub codec: String,
    pub emotion: String,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

// ============================================================================
// Cache DTOs
// ============================================================================

/// DELETE /api/cache 响应数据
#[derive(Debug, Serialize)]
pub struct PurgeData {
    pub removed: u64,
}
