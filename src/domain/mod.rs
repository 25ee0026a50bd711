//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Synthesis Context: 合成参数与缓存指纹
//! - Voice Context: 音色目录

pub mod synthesis;
pub mod voice;

pub use voice::{VoiceCatalog, VoiceInfo};
