//! Synthesis Gateway Port - 上游 TTS 服务抽象
//!
//! 定义云端语音合成的抽象接口，具体实现在 infrastructure/tts 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::synthesis::SynthesisParams;

/// 上游合成错误
///
/// 核心不做内部重试，错误原样上抛给调用方
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Upstream returned empty audio")]
    EmptyAudio,
}

/// Synthesis Gateway Port
///
/// 外部云端 TTS 服务的抽象接口
#[async_trait]
pub trait SynthesisGatewayPort: Send + Sync {
    /// 执行语音合成，返回音频字节
    async fn synthesize(&self, params: &SynthesisParams) -> Result<Vec<u8>, UpstreamError>;

    /// 检查上游服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
