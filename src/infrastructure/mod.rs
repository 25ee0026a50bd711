//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod cache;
pub mod http;
pub mod tts;

pub use cache::{FileCacheConfig, FileCacheStore};
pub use tts::{FakeTtsGateway, HttpTtsGateway};
