//! Application State

use std::sync::Arc;

use crate::application::{CacheOrchestrator, CacheStorePort, SynthesisGatewayPort};
use crate::config::TtsConfig;
use crate::domain::VoiceCatalog;

/// 请求未显式给出参数时使用的默认值（来自配置）
#[derive(Debug, Clone)]
pub struct SynthesisDefaults {
    pub voice_type: i32,
    pub sample_rate: u32,
    pub codec: String,
    pub emotion: String,
}

impl From<&TtsConfig> for SynthesisDefaults {
    fn from(config: &TtsConfig) -> Self {
        Self {
            voice_type: config.default_voice_type,
            sample_rate: config.default_sample_rate,
            codec: config.default_codec.clone(),
            emotion: config.default_emotion.clone(),
        }
    }
}

/// 应用状态
///
/// store 和 gateway 在进程启动时构造一次并注入，
/// 没有任何进程级全局可变状态
pub struct AppState {
    pub orchestrator: CacheOrchestrator,
    pub store: Arc<dyn CacheStorePort>,
    pub gateway: Arc<dyn SynthesisGatewayPort>,
    pub catalog: VoiceCatalog,
    pub defaults: SynthesisDefaults,
    /// 公开访问的 Base URL，生成缓存文件 URL 时作为前缀；
    /// 未配置则返回相对路径
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CacheStorePort>,
        gateway: Arc<dyn SynthesisGatewayPort>,
        catalog: VoiceCatalog,
        defaults: SynthesisDefaults,
        base_url: Option<String>,
    ) -> Self {
        Self {
            orchestrator: CacheOrchestrator::new(store.clone(), gateway.clone()),
            store,
            gateway,
            catalog,
            defaults,
            base_url,
        }
    }
}
