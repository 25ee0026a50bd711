//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod cache_store;
mod synthesis_gateway;

pub use cache_store::{CacheEntry, CacheError, CacheStats, CacheStorePort};
pub use synthesis_gateway::{SynthesisGatewayPort, UpstreamError};
