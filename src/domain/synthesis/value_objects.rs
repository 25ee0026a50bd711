//! Synthesis Context - Value Objects

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// 文本最大长度（字符数，上游服务限制）
pub const MAX_TEXT_CHARS: usize = 150;

/// 默认情感类别
pub const DEFAULT_EMOTION: &str = "neutral";

/// 合成文本
///
/// 不变量:
/// - 已去除首尾空白
/// - 非空且不超过 [`MAX_TEXT_CHARS`] 个字符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisText(String);

impl SynthesisText {
    pub fn new(text: impl AsRef<str>) -> Result<Self, ValidationError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(ValidationError::TextTooLong {
                max: MAX_TEXT_CHARS,
                actual: chars,
            });
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SynthesisText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音频编码格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Wav,
    Mp3,
    Pcm,
}

impl AudioCodec {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            "pcm" => Ok(Self::Pcm),
            other => Err(ValidationError::UnknownCodec(other.to_string())),
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::parse(ext).ok()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Pcm => "pcm",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Pcm => "audio/pcm",
        }
    }
}

impl std::fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
