//! Synthesis Context - 缓存指纹
//!
//! 对合成参数做确定性哈希，作为内容寻址缓存的 key

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::SynthesisParams;

/// 指纹的十六进制长度（SHA-256）
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// 缓存指纹
///
/// 不变量:
/// - 由全部五个影响音频输出的参数字段推导（text, voice_type, sample_rate,
///   codec, emotion），缺一不可——漏掉任何字段都会让语义不同的请求
///   命中同一个缓存条目
/// - 相同参数永远得到相同指纹（跨进程重启亦然）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// 从合成参数推导指纹
    pub fn of(params: &SynthesisParams) -> Self {
        let input = format!(
            "{}_{}_{}_{}_{}",
            params.text(),
            params.voice_type(),
            params.sample_rate(),
            params.codec(),
            params.emotion(),
        );
        let digest = Sha256::digest(input.as_bytes());
        Self(format!("{:x}", digest))
    }

    /// 判断一个文件名主干是否形如指纹（纯十六进制、定长）
    pub fn is_valid_hex(stem: &str) -> bool {
        stem.len() == FINGERPRINT_HEX_LEN && stem.bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
