//! Synthesis Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("文本内容不能为空")]
    EmptyText,

    #[error("文本长度不能超过{max}个字符（当前{actual}）")]
    TextTooLong { max: usize, actual: usize },

    #[error("无效的音色类型: {0}")]
    UnknownVoice(i32),

    #[error("无效的编码格式: {0}")]
    UnknownCodec(String),

    #[error("采样率必须大于 0")]
    InvalidSampleRate,
}
