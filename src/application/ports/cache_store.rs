//! Cache Store Port - 音频缓存存储
//!
//! 定义内容寻址缓存的抽象接口，具体实现在 infrastructure/cache 层
//!
//! 缓存是尽力而为的：lookup 的 IO 错误按未命中处理，insert 的失败
//! 由调用方记日志后继续——缓存问题绝不升级为合成请求的失败

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::synthesis::{AudioCodec, Fingerprint};

/// Cache Store 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid entry name: {0}")]
    InvalidEntryName(String),
}

/// 缓存条目
///
/// 每个 (fingerprint, codec) 对应一个只写一次的文件:
/// `<fingerprint-hex>.<codec-extension>`，内容为裸音频字节
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fingerprint: Fingerprint,
    pub codec: AudioCodec,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl CacheEntry {
    /// 条目文件名（相对缓存目录，用于生成 URL）
    pub fn filename(&self) -> String {
        format!("{}.{}", self.fingerprint, self.codec.extension())
    }
}

/// 缓存统计信息
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CacheStats {
    pub count: u64,
    pub total_bytes: u64,
}

/// Cache Store Port
///
/// 基于指纹的内容寻址磁盘缓存
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    /// 查找缓存条目
    ///
    /// 仅当对应文件存在且非空时命中；未命中是正常结果而非错误，
    /// IO 错误记日志后同样按未命中返回
    async fn lookup(&self, fingerprint: &Fingerprint, codec: AudioCodec) -> Option<CacheEntry>;

    /// 写入缓存条目
    ///
    /// 写入对外原子（临时文件 + rename），部分写入的文件不会被
    /// lookup 观察为命中；缓存被禁用时为 no-op，返回 `Ok(None)`
    async fn insert(
        &self,
        fingerprint: &Fingerprint,
        codec: AudioCodec,
        audio: &[u8],
    ) -> Result<Option<CacheEntry>, CacheError>;

    /// 清空全部缓存条目，返回删除的条目数
    ///
    /// 只删除可识别的缓存文件（指纹形文件名 + 已知扩展名），
    /// 目录里的无关文件不受影响
    async fn purge(&self) -> Result<u64, CacheError>;

    /// 统计缓存条目（只统计可识别的条目）
    async fn stats(&self) -> Result<CacheStats, CacheError>;

    /// 将条目文件名解析为磁盘路径（用于对外提供缓存文件下载）
    ///
    /// 文件名必须形如 `<指纹>.<已知扩展名>`，其余一概拒绝
    fn entry_path(&self, filename: &str) -> Result<PathBuf, CacheError>;
}
