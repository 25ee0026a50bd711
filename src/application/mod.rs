//! Application Layer - 应用层
//!
//! - Ports: 端口定义（CacheStore, SynthesisGateway）
//! - Orchestrator: 合成请求编排（缓存命中/未命中/合流）

pub mod orchestrator;
pub mod ports;

pub use orchestrator::{CacheOrchestrator, SynthesisError, SynthesisResult};
pub use ports::{
    CacheEntry, CacheError, CacheStats, CacheStorePort, SynthesisGatewayPort, UpstreamError,
};
