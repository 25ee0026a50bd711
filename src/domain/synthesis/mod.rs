//! Synthesis Context - 合成限界上下文
//!
//! 职责:
//! - 合成参数校验（文本长度、采样率、编码格式）
//! - 缓存指纹推导

mod errors;
mod fingerprint;
mod params;
mod value_objects;

pub use errors::ValidationError;
pub use fingerprint::Fingerprint;
pub use params::SynthesisParams;
pub use value_objects::{AudioCodec, SynthesisText, DEFAULT_EMOTION, MAX_TEXT_CHARS};
