//! HTTP TTS Gateway - 调用云端 TTS 服务
//!
//! 实现 SynthesisGatewayPort trait，通过 HTTP 调用云端语音合成
//!
//! 云端 TTS API:
//! POST {base_url}/tts/v1/text_to_voice
//! Request: {"text": "...", "session_id": "...", "voice_type": 301030, ...}  (JSON)
//! Response: {"audio": "<base64>", "session_id": "..."}  (JSON)

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{SynthesisGatewayPort, UpstreamError};
use crate::domain::synthesis::SynthesisParams;

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TtsHttpRequest<'a> {
    text: &'a str,
    /// 每次上游调用一个新的会话 ID（用于上游侧追踪）
    session_id: String,
    voice_type: i32,
    sample_rate: u32,
    codec: &'static str,
    emotion: &'a str,
}

/// 合成响应体 (JSON)
#[derive(Debug, Deserialize)]
struct TtsHttpResponse {
    /// base64 编码的音频数据
    audio: Option<String>,
    #[allow(dead_code)]
    session_id: Option<String>,
}

/// HTTP TTS 网关配置
#[derive(Debug, Clone)]
pub struct HttpTtsGatewayConfig {
    /// 云端 TTS 服务基础 URL
    pub base_url: String,
    /// 服务凭证
    pub secret_id: String,
    pub secret_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTtsGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://tts.example-cloud.com".to_string(),
            secret_id: String::new(),
            secret_key: String::new(),
            timeout_secs: 30,
        }
    }
}

/// HTTP TTS 网关
///
/// 通过 HTTP 调用云端 TTS 服务
pub struct HttpTtsGateway {
    client: Client,
    config: HttpTtsGatewayConfig,
}

impl HttpTtsGateway {
    /// 创建新的 HTTP TTS 网关
    pub fn new(config: HttpTtsGatewayConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/tts/v1/text_to_voice", self.config.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }
}

#[async_trait]
impl SynthesisGatewayPort for HttpTtsGateway {
    async fn synthesize(&self, params: &SynthesisParams) -> Result<Vec<u8>, UpstreamError> {
        let request = TtsHttpRequest {
            text: params.text(),
            session_id: uuid::Uuid::new_v4().to_string(),
            voice_type: params.voice_type(),
            sample_rate: params.sample_rate(),
            codec: params.codec().extension(),
            emotion: params.emotion(),
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            session_id = %request.session_id,
            text_len = request.text.len(),
            voice_type = request.voice_type,
            "Sending upstream TTS request"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .header("X-Secret-Id", &self.config.secret_id)
            .header("X-Secret-Key", &self.config.secret_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout
                } else if e.is_connect() {
                    UpstreamError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    UpstreamError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: TtsHttpResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse body: {}", e)))?;

        // 成功状态但没有音频负载同样算上游失败
        let audio_b64 = match body.audio {
            Some(audio) if !audio.is_empty() => audio,
            _ => return Err(UpstreamError::EmptyAudio),
        };

        let audio = BASE64
            .decode(audio_b64.as_bytes())
            .map_err(|e| UpstreamError::InvalidResponse(format!("Invalid base64 audio: {}", e)))?;
        if audio.is_empty() {
            return Err(UpstreamError::EmptyAudio);
        }

        tracing::info!(
            session_id = %request.session_id,
            audio_size = audio.len(),
            "Upstream TTS synthesis completed"
        );

        Ok(audio)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
