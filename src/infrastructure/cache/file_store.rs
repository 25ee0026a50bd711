//! File Cache Store - 文件系统内容寻址缓存实现
//!
//! 实现 CacheStorePort trait
//!
//! 磁盘布局: 每个 (fingerprint, codec) 一个文件 `<指纹>.<扩展名>`，
//! 内容为裸音频字节。文件只写一次，不原地修改，仅全量 purge 删除。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{CacheEntry, CacheError, CacheStats, CacheStorePort};
use crate::domain::synthesis::{AudioCodec, Fingerprint};

/// 文件缓存配置
#[derive(Debug, Clone)]
pub struct FileCacheConfig {
    /// 缓存目录
    pub dir: PathBuf,
    /// 是否启用缓存（禁用时 lookup 永不命中，insert 为 no-op）
    pub enabled: bool,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/cache"),
            enabled: true,
        }
    }
}

/// 文件系统音频缓存
pub struct FileCacheStore {
    dir: PathBuf,
    enabled: bool,
}

impl FileCacheStore {
    /// 创建缓存存储，确保缓存目录存在
    pub async fn new(config: FileCacheConfig) -> Result<Self, CacheError> {
        if config.enabled {
            fs::create_dir_all(&config.dir)
                .await
                .map_err(|e| CacheError::IoError(e.to_string()))?;
        }

        tracing::info!(
            dir = %config.dir.display(),
            enabled = config.enabled,
            "FileCacheStore initialized"
        );

        Ok(Self {
            dir: config.dir,
            enabled: config.enabled,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, fingerprint: &Fingerprint, codec: AudioCodec) -> PathBuf {
        self.dir
            .join(format!("{}.{}", fingerprint, codec.extension()))
    }

    /// 识别缓存条目文件名: `<定长十六进制指纹>.<已知扩展名>`
    ///
    /// purge/stats 只处理可识别的条目，目录中的无关文件不受影响
    fn recognize(filename: &str) -> Option<AudioCodec> {
        let (stem, ext) = filename.rsplit_once('.')?;
        if Fingerprint::is_valid_hex(stem) {
            AudioCodec::from_extension(ext)
        } else {
            None
        }
    }
}

#[async_trait]
impl CacheStorePort for FileCacheStore {
    async fn lookup(&self, fingerprint: &Fingerprint, codec: AudioCodec) -> Option<CacheEntry> {
        if !self.enabled {
            return None;
        }

        let path = self.file_path(fingerprint, codec);
        match fs::metadata(&path).await {
            // 空文件按未命中处理，避免把损坏的条目当命中返回
            Ok(meta) if meta.is_file() && meta.len() > 0 => Some(CacheEntry {
                fingerprint: fingerprint.clone(),
                codec,
                size_bytes: meta.len(),
                path,
            }),
            Ok(_) => None,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                // IO 错误降级为未命中，缓存问题不升级为请求失败
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Cache lookup failed, treating as miss"
                );
                None
            }
        }
    }

    async fn insert(
        &self,
        fingerprint: &Fingerprint,
        codec: AudioCodec,
        audio: &[u8],
    ) -> Result<Option<CacheEntry>, CacheError> {
        if !self.enabled {
            return Ok(None);
        }

        let path = self.file_path(fingerprint, codec);
        let tmp_path = self.dir.join(format!(
            ".{}.{}.tmp-{}",
            fingerprint,
            codec.extension(),
            uuid::Uuid::new_v4().simple()
        ));
        let size = audio.len() as u64;
        let data = audio.to_vec();

        // 写在独立任务上执行：调用方中途取消也不会留下半写的目标文件，
        // 临时文件 + rename 保证 lookup 永远看不到部分写入
        let write_path = path.clone();
        let write_tmp = tmp_path.clone();
        let result = tokio::spawn(async move {
            fs::write(&write_tmp, &data).await?;
            fs::rename(&write_tmp, &write_path).await
        })
        .await
        .map_err(|e| CacheError::IoError(format!("cache write task failed: {}", e)))?;

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(CacheError::IoError(e.to_string()));
        }

        tracing::debug!(
            fingerprint = %fingerprint,
            codec = %codec,
            size_bytes = size,
            "Audio cached"
        );

        Ok(Some(CacheEntry {
            fingerprint: fingerprint.clone(),
            codec,
            size_bytes: size,
            path,
        }))
    }

    async fn purge(&self) -> Result<u64, CacheError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CacheError::IoError(e.to_string())),
        };

        let mut removed = 0u64;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::IoError(e.to_string()))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if Self::recognize(name).is_none() {
                continue;
            }

            fs::remove_file(entry.path())
                .await
                .map_err(|e| CacheError::IoError(e.to_string()))?;
            removed += 1;
        }

        tracing::info!(removed = removed, "Cache purged");
        Ok(removed)
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CacheStats::default()),
            Err(e) => return Err(CacheError::IoError(e.to_string())),
        };

        let mut stats = CacheStats::default();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::IoError(e.to_string()))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if Self::recognize(name).is_none() {
                continue;
            }

            if let Ok(meta) = entry.metadata().await {
                stats.count += 1;
                stats.total_bytes += meta.len();
            }
        }

        Ok(stats)
    }

    fn entry_path(&self, filename: &str) -> Result<PathBuf, CacheError> {
        // 合法文件名是定长十六进制 + 已知扩展名，天然排除路径遍历
        if Self::recognize(filename).is_none() {
            return Err(CacheError::InvalidEntryName(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }
}
