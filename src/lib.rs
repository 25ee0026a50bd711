//! Vocache - 云端 TTS 缓存代理
//!
//! 接收文本合成请求，代理到云端 TTS 服务，并把结果按参数指纹
//! 内容寻址地缓存在本地磁盘上。
//!
//! 架构设计: Ports & Adapters
//!
//! 领域层 (domain/):
//! - Synthesis Context: 合成参数、指纹推导
//! - Voice Context: 音色目录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（CacheStore, SynthesisGateway）
//! - Orchestrator: 缓存编排（命中/未命中/并发合流）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Cache: 文件系统内容寻址缓存
//! - TTS: 云端 HTTP 网关 / 测试用 Fake 网关

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
