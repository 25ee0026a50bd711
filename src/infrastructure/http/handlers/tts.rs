//! TTS HTTP Handlers
//!
//! 两种响应形态：POST 返回 JSON 信封（新鲜合成内联 base64，命中返回
//! 缓存 URL），GET 直接返回音频二进制

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;

use crate::application::ports::CacheEntry;
use crate::application::SynthesisResult;
use crate::domain::synthesis::{AudioCodec, SynthesisParams, SynthesisText};
use crate::infrastructure::http::dto::{ApiResponse, TtsData, TtsQuery, TtsRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 组装并校验合成参数，缺省字段回落到配置默认值
fn build_params(
    state: &AppState,
    text: &str,
    voice_type: Option<i32>,
    sample_rate: Option<u32>,
    codec: Option<&str>,
    emotion: Option<&str>,
) -> Result<SynthesisParams, ApiError> {
    let text = SynthesisText::new(text)?;

    let voice_type = voice_type.unwrap_or(state.defaults.voice_type);
    state.catalog.validate(voice_type)?;

    let codec = AudioCodec::parse(codec.unwrap_or(&state.defaults.codec))?;
    let sample_rate = sample_rate.unwrap_or(state.defaults.sample_rate);
    let emotion = emotion.unwrap_or(&state.defaults.emotion).to_string();

    Ok(SynthesisParams::new(
        text,
        voice_type,
        sample_rate,
        codec,
        emotion,
    )?)
}

/// 文本转语音（JSON 响应）
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TtsRequest>,
) -> Result<Json<ApiResponse<TtsData>>, ApiError> {
    let params = build_params(
        &state,
        &req.text,
        req.voice_type,
        req.sample_rate,
        req.codec.as_deref(),
        req.emotion.as_deref(),
    )?;

    let result = state.orchestrator.resolve(params).await?;

    let audio_url = result
        .entry
        .as_ref()
        .map(|entry| cache_entry_url(&state, entry));
    let audio_base64 = result.audio.as_ref().map(|audio| BASE64.encode(audio));

    let data = TtsData {
        voice_type: result.params.voice_type(),
        sample_rate: result.params.sample_rate(),
        codec: result.params.codec().extension().to_string(),
        emotion: result.params.emotion().to_string(),
        cached: result.cached,
        audio_base64,
        audio_url,
    };

    Ok(Json(ApiResponse::success(data)))
}

/// 文本转语音（GET 方式，直接返回音频二进制）
pub async fn synthesize_binary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TtsQuery>,
) -> Result<Response, ApiError> {
    let params = build_params(
        &state,
        &query.text,
        query.voice_type,
        query.sample_rate,
        query.codec.as_deref(),
        query.emotion.as_deref(),
    )?;

    let result = state.orchestrator.resolve(params).await?;
    let audio = inline_audio_bytes(&result).await?;

    let codec = result.params.codec();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, codec.mime_type())
        .header(header::CONTENT_LENGTH, audio.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"tts_audio.{}\"", codec.extension()),
        )
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .header("X-Voice-Type", result.params.voice_type().to_string())
        .header("X-Sample-Rate", result.params.sample_rate().to_string())
        .header("X-Emotion", result.params.emotion())
        .header("X-Cached", if result.cached { "true" } else { "false" })
        .body(Body::from(audio))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// 生成缓存条目的下载 URL，配置了 server.base_url 时返回绝对地址
fn cache_entry_url(state: &AppState, entry: &CacheEntry) -> String {
    let path = format!("/api/cache/{}", entry.filename());
    match &state.base_url {
        Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
        None => path,
    }
}

/// 取得内联音频字节：新鲜结果自带，命中条目则从磁盘读回
async fn inline_audio_bytes(result: &SynthesisResult) -> Result<Vec<u8>, ApiError> {
    if let Some(audio) = &result.audio {
        return Ok(audio.clone());
    }

    let entry = result
        .entry
        .as_ref()
        .ok_or_else(|| ApiError::Internal("Synthesis result carries no audio".to_string()))?;

    tokio::fs::read(&entry.path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read cached audio: {}", e)))
}
