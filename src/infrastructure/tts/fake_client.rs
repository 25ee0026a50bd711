//! Fake TTS Gateway - 用于测试的 TTS 网关
//!
//! 不调用云端服务，对每个请求返回由参数确定的合成字节

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::application::ports::{SynthesisGatewayPort, UpstreamError};
use crate::domain::synthesis::SynthesisParams;

/// Fake TTS Gateway 配置
#[derive(Debug, Clone)]
pub struct FakeTtsGatewayConfig {
    /// 模拟的合成延迟（毫秒）
    pub latency_ms: u64,
    /// 是否模拟上游失败
    pub fail: bool,
}

impl Default for FakeTtsGatewayConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            fail: false,
        }
    }
}

/// Fake TTS Gateway
///
/// 返回 "FAKE" 头 + 参数回显的确定性字节序列，并统计调用次数
pub struct FakeTtsGateway {
    config: FakeTtsGatewayConfig,
    call_count: AtomicU64,
}

impl FakeTtsGateway {
    pub fn new(config: FakeTtsGatewayConfig) -> Self {
        Self {
            config,
            call_count: AtomicU64::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeTtsGatewayConfig::default())
    }

    /// 已处理的合成请求数
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisGatewayPort for FakeTtsGateway {
    async fn synthesize(&self, params: &SynthesisParams) -> Result<Vec<u8>, UpstreamError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail {
            return Err(UpstreamError::ServiceError(
                "fake gateway configured to fail".to_string(),
            ));
        }

        tracing::debug!(
            text_len = params.text().len(),
            voice_type = params.voice_type(),
            "FakeTtsGateway: returning synthetic audio"
        );

        let mut audio = b"FAKE".to_vec();
        audio.extend_from_slice(
            format!(
                "{}|{}|{}|{}|{}",
                params.text(),
                params.voice_type(),
                params.sample_rate(),
                params.codec(),
                params.emotion()
            )
            .as_bytes(),
        );
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthesis::{AudioCodec, SynthesisText};

    fn params() -> SynthesisParams {
        SynthesisParams::new(
            SynthesisText::new("hello").unwrap(),
            301030,
            16000,
            AudioCodec::Wav,
            "neutral",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fake_gateway_deterministic_and_counted() {
        let gateway = FakeTtsGateway::with_defaults();
        let a = gateway.synthesize(&params()).await.unwrap();
        let b = gateway.synthesize(&params()).await.unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with(b"FAKE"));
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fake_gateway_failure_mode() {
        let gateway = FakeTtsGateway::new(FakeTtsGatewayConfig {
            fail: true,
            ..Default::default()
        });
        assert!(matches!(
            gateway.synthesize(&params()).await,
            Err(UpstreamError::ServiceError(_))
        ));
    }
}
