//! Synthesis Context - 合成参数

use serde::{Deserialize, Serialize};

use super::{AudioCodec, SynthesisText, ValidationError};

/// 合成参数
///
/// 不变量:
/// - 构造后不可变
/// - 五个字段共同唯一确定缓存指纹（见 [`super::Fingerprint`]）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisParams {
    text: SynthesisText,
    voice_type: i32,
    sample_rate: u32,
    codec: AudioCodec,
    emotion: String,
}

impl SynthesisParams {
    /// 创建合成参数
    ///
    /// 音色是否在目录中由调用方（HTTP 层持有 VoiceCatalog）预先校验
    pub fn new(
        text: SynthesisText,
        voice_type: i32,
        sample_rate: u32,
        codec: AudioCodec,
        emotion: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if sample_rate == 0 {
            return Err(ValidationError::InvalidSampleRate);
        }
        Ok(Self {
            text,
            voice_type,
            sample_rate,
            codec,
            emotion: emotion.into(),
        })
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn voice_type(&self) -> i32 {
        self.voice_type
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn codec(&self) -> AudioCodec {
        self.codec
    }

    pub fn emotion(&self) -> &str {
        &self.emotion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample_rate_rejected() {
        let text = SynthesisText::new("hello").unwrap();
        assert!(matches!(
            SynthesisParams::new(text, 301030, 0, AudioCodec::Wav, "neutral"),
            Err(ValidationError::InvalidSampleRate)
        ));
    }

    #[test]
    fn test_params_accessors() {
        let text = SynthesisText::new("hello").unwrap();
        let params =
            SynthesisParams::new(text, 301030, 16000, AudioCodec::Wav, "neutral").unwrap();
        assert_eq!(params.text(), "hello");
        assert_eq!(params.voice_type(), 301030);
        assert_eq!(params.sample_rate(), 16000);
        assert_eq!(params.codec(), AudioCodec::Wav);
        assert_eq!(params.emotion(), "neutral");
    }
}
