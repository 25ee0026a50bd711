//! Voice Context - 音色目录
//!
//! 上游服务支持的音色是一个固定枚举集合，服务内置目录用于请求校验
//! 和 /api/voices 查询

use serde::Serialize;

use super::synthesis::ValidationError;

/// 音色信息
#[derive(Debug, Clone, Serialize)]
pub struct VoiceInfo {
    pub id: i32,
    pub name: &'static str,
    pub gender: &'static str,
    pub language: &'static str,
    pub remarks: &'static str,
}

/// 音色目录
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    voices: Vec<VoiceInfo>,
}

impl VoiceCatalog {
    /// 内置音色目录
    pub fn builtin() -> Self {
        Self {
            voices: vec![
                VoiceInfo {
                    id: 301030,
                    name: "爱小溪",
                    gender: "女",
                    language: "中文",
                    remarks: "标准女生",
                },
                VoiceInfo {
                    id: 101040,
                    name: "智川",
                    gender: "女",
                    language: "中文",
                    remarks: "四川女声",
                },
                VoiceInfo {
                    id: 101019,
                    name: "智彤",
                    gender: "女",
                    language: "中文",
                    remarks: "粤语女声",
                },
            ],
        }
    }

    pub fn contains(&self, voice_type: i32) -> bool {
        self.voices.iter().any(|v| v.id == voice_type)
    }

    /// 校验音色 ID 是否在目录中
    pub fn validate(&self, voice_type: i32) -> Result<(), ValidationError> {
        if self.contains(voice_type) {
            Ok(())
        } else {
            Err(ValidationError::UnknownVoice(voice_type))
        }
    }

    pub fn all(&self) -> &[VoiceInfo] {
        &self.voices
    }
}
