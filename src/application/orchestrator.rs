//! Cache Orchestrator - 合成请求的唯一入口
//!
//! 组合指纹推导、缓存查找与上游调用:
//! 命中直接返回缓存条目引用；未命中调用上游合成，尽力写入缓存后
//! 返回新鲜音频。同一指纹的并发未命中合流到一次上游调用。

use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::application::ports::{CacheEntry, CacheStorePort, SynthesisGatewayPort, UpstreamError};
use crate::domain::synthesis::{Fingerprint, SynthesisParams};

/// 合成错误
///
/// 缓存的读写失败不在此列——缓存是尽力而为的优化，
/// 只有上游失败才会让整个请求失败
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Synthesis failed: {0}")]
    Upstream(#[from] UpstreamError),
}

/// 单次合成的结果
///
/// 命中时携带缓存条目引用（audio 为 None），未命中时携带新鲜音频
/// 字节（entry 仅在缓存写入成功时存在）。内联字节还是引用 URL 是
/// 表现层的选择，这里只有一种规范形态。
#[derive(Debug)]
pub struct SynthesisResult {
    pub params: SynthesisParams,
    pub audio: Option<Vec<u8>>,
    pub entry: Option<CacheEntry>,
    pub cached: bool,
}

impl SynthesisResult {
    fn hit(params: SynthesisParams, entry: CacheEntry) -> Self {
        Self {
            params,
            audio: None,
            entry: Some(entry),
            cached: true,
        }
    }

    fn fresh(params: SynthesisParams, audio: Vec<u8>, entry: Option<CacheEntry>) -> Self {
        Self {
            params,
            audio: Some(audio),
            entry,
            cached: false,
        }
    }
}

/// Cache Orchestrator
///
/// 依赖注入：store 和 gateway 在进程启动时构造一次并传入，
/// 不变量：同一指纹同时至多一次上游在途调用（per-fingerprint 锁）
pub struct CacheOrchestrator {
    store: Arc<dyn CacheStorePort>,
    gateway: Arc<dyn SynthesisGatewayPort>,
    inflight: DashMap<Fingerprint, Arc<Mutex<()>>>,
}

impl CacheOrchestrator {
    pub fn new(store: Arc<dyn CacheStorePort>, gateway: Arc<dyn SynthesisGatewayPort>) -> Self {
        Self {
            store,
            gateway,
            inflight: DashMap::new(),
        }
    }

    /// 解析一次合成请求
    ///
    /// 1. 计算指纹并查缓存，命中即返回
    /// 2. 未命中则获取该指纹的在途锁，持锁后复查缓存
    ///    （前一个持锁者可能刚写入）
    /// 3. 仍未命中才调用上游，成功后尽力写入缓存
    pub async fn resolve(&self, params: SynthesisParams) -> Result<SynthesisResult, SynthesisError> {
        let fingerprint = Fingerprint::of(&params);

        if let Some(entry) = self.store.lookup(&fingerprint, params.codec()).await {
            tracing::debug!(fingerprint = %fingerprint, "Audio cache hit");
            return Ok(SynthesisResult::hit(params, entry));
        }

        let guard = self
            .inflight
            .entry(fingerprint.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _permit = guard.lock().await;

        // 持锁后复查
        if let Some(entry) = self.store.lookup(&fingerprint, params.codec()).await {
            self.inflight.remove(&fingerprint);
            tracing::debug!(fingerprint = %fingerprint, "Audio cache hit after coalescing");
            return Ok(SynthesisResult::hit(params, entry));
        }

        let outcome = self.synthesize_and_store(&fingerprint, &params).await;
        // 等待者持有各自的 guard 克隆，提前移除不影响其锁语义
        self.inflight.remove(&fingerprint);

        let (audio, entry) = outcome?;
        Ok(SynthesisResult::fresh(params, audio, entry))
    }

    async fn synthesize_and_store(
        &self,
        fingerprint: &Fingerprint,
        params: &SynthesisParams,
    ) -> Result<(Vec<u8>, Option<CacheEntry>), SynthesisError> {
        tracing::info!(
            fingerprint = %fingerprint,
            voice_type = params.voice_type(),
            codec = %params.codec(),
            "Cache miss, calling upstream TTS"
        );

        let audio = self.gateway.synthesize(params).await?;

        let entry = match self.store.insert(fingerprint, params.codec(), &audio).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    fingerprint = %fingerprint,
                    error = %e,
                    "Failed to cache synthesized audio, returning uncached result"
                );
                None
            }
        };

        Ok((audio, entry))
    }

    /// 缓存统计（透传给 HTTP 层）
    pub async fn cache_stats(
        &self,
    ) -> Result<crate::application::ports::CacheStats, crate::application::ports::CacheError> {
        self.store.stats().await
    }

    /// 清空缓存（透传给 HTTP 层）
    pub async fn purge_cache(&self) -> Result<u64, crate::application::ports::CacheError> {
        self.store.purge().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CacheError, CacheStats};
    use crate::domain::synthesis::{AudioCodec, SynthesisText};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn params(text: &str) -> SynthesisParams {
        SynthesisParams::new(
            SynthesisText::new(text).unwrap(),
            301030,
            16000,
            AudioCodec::Wav,
            "neutral",
        )
        .unwrap()
    }

    /// 内存缓存存根
    struct MemoryStore {
        entries: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl CacheStorePort for MemoryStore {
        async fn lookup(
            &self,
            fingerprint: &Fingerprint,
            codec: AudioCodec,
        ) -> Option<CacheEntry> {
            let key = format!("{}.{}", fingerprint, codec.extension());
            let entries = self.entries.lock().await;
            entries.get(&key).map(|audio| CacheEntry {
                fingerprint: fingerprint.clone(),
                codec,
                size_bytes: audio.len() as u64,
                path: PathBuf::from(&key),
            })
        }

        async fn insert(
            &self,
            fingerprint: &Fingerprint,
            codec: AudioCodec,
            audio: &[u8],
        ) -> Result<Option<CacheEntry>, CacheError> {
            let key = format!("{}.{}", fingerprint, codec.extension());
            self.entries.lock().await.insert(key.clone(), audio.to_vec());
            Ok(Some(CacheEntry {
                fingerprint: fingerprint.clone(),
                codec,
                size_bytes: audio.len() as u64,
                path: PathBuf::from(key),
            }))
        }

        async fn purge(&self) -> Result<u64, CacheError> {
            let mut entries = self.entries.lock().await;
            let count = entries.len() as u64;
            entries.clear();
            Ok(count)
        }

        async fn stats(&self) -> Result<CacheStats, CacheError> {
            let entries = self.entries.lock().await;
            Ok(CacheStats {
                count: entries.len() as u64,
                total_bytes: entries.values().map(|v| v.len() as u64).sum(),
            })
        }

        fn entry_path(&self, filename: &str) -> Result<PathBuf, CacheError> {
            Ok(PathBuf::from(filename))
        }
    }

    /// 禁用态缓存存根：永不命中，insert 为 no-op
    struct DisabledStore;

    #[async_trait]
    impl CacheStorePort for DisabledStore {
        async fn lookup(&self, _: &Fingerprint, _: AudioCodec) -> Option<CacheEntry> {
            None
        }

        async fn insert(
            &self,
            _: &Fingerprint,
            _: AudioCodec,
            _: &[u8],
        ) -> Result<Option<CacheEntry>, CacheError> {
            Ok(None)
        }

        async fn purge(&self) -> Result<u64, CacheError> {
            Ok(0)
        }

        async fn stats(&self) -> Result<CacheStats, CacheError> {
            Ok(CacheStats::default())
        }

        fn entry_path(&self, filename: &str) -> Result<PathBuf, CacheError> {
            Err(CacheError::InvalidEntryName(filename.to_string()))
        }
    }

    /// 写入必败的缓存存根
    struct BrokenStore;

    #[async_trait]
    impl CacheStorePort for BrokenStore {
        async fn lookup(&self, _: &Fingerprint, _: AudioCodec) -> Option<CacheEntry> {
            None
        }

        async fn insert(
            &self,
            _: &Fingerprint,
            _: AudioCodec,
            _: &[u8],
        ) -> Result<Option<CacheEntry>, CacheError> {
            Err(CacheError::IoError("disk full".to_string()))
        }

        async fn purge(&self) -> Result<u64, CacheError> {
            Err(CacheError::IoError("disk full".to_string()))
        }

        async fn stats(&self) -> Result<CacheStats, CacheError> {
            Err(CacheError::IoError("disk full".to_string()))
        }

        fn entry_path(&self, filename: &str) -> Result<PathBuf, CacheError> {
            Err(CacheError::InvalidEntryName(filename.to_string()))
        }
    }

    /// 计数上游存根
    struct CountingGateway {
        calls: AtomicUsize,
        delay: Option<Duration>,
        fail: bool,
    }

    impl CountingGateway {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay: None,
                fail: false,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::new()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SynthesisGatewayPort for CountingGateway {
        async fn synthesize(&self, params: &SynthesisParams) -> Result<Vec<u8>, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(UpstreamError::ServiceError("quota exceeded".to_string()));
            }
            Ok(format!("audio:{}", params.text()).into_bytes())
        }
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let gateway = Arc::new(CountingGateway::new());
        let orchestrator =
            CacheOrchestrator::new(Arc::new(MemoryStore::new()), gateway.clone());

        let first = orchestrator.resolve(params("hello")).await.unwrap();
        assert!(!first.cached);
        let audio = first.audio.as_ref().unwrap();
        assert_eq!(audio, b"audio:hello");
        assert_eq!(gateway.call_count(), 1);

        let second = orchestrator.resolve(params("hello")).await.unwrap();
        assert!(second.cached);
        assert!(second.audio.is_none());
        let entry = second.entry.unwrap();
        assert_eq!(entry.size_bytes, audio.len() as u64);
        assert_eq!(gateway.call_count(), 1, "命中后不应再调上游");
    }

    #[tokio::test]
    async fn test_distinct_params_distinct_calls() {
        let gateway = Arc::new(CountingGateway::new());
        let orchestrator =
            CacheOrchestrator::new(Arc::new(MemoryStore::new()), gateway.clone());

        orchestrator.resolve(params("hello")).await.unwrap();
        orchestrator.resolve(params("world")).await.unwrap();
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_calls_upstream() {
        let gateway = Arc::new(CountingGateway::new());
        let orchestrator = CacheOrchestrator::new(Arc::new(DisabledStore), gateway.clone());

        for _ in 0..3 {
            let result = orchestrator.resolve(params("hello")).await.unwrap();
            assert!(!result.cached);
            assert!(result.audio.is_some());
            assert!(result.entry.is_none());
        }
        assert_eq!(gateway.call_count(), 3);
    }

    #[tokio::test]
    async fn test_insert_failure_does_not_fail_request() {
        let gateway = Arc::new(CountingGateway::new());
        let orchestrator = CacheOrchestrator::new(Arc::new(BrokenStore), gateway.clone());

        let result = orchestrator.resolve(params("hello")).await.unwrap();
        assert!(!result.cached);
        assert_eq!(result.audio.unwrap(), b"audio:hello");
        assert!(result.entry.is_none());
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let gateway = Arc::new(CountingGateway::failing());
        let orchestrator = CacheOrchestrator::new(Arc::new(MemoryStore::new()), gateway);

        let err = orchestrator.resolve(params("hello")).await.unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::Upstream(UpstreamError::ServiceError(_))
        ));
    }

    #[tokio::test]
    async fn test_upstream_error_does_not_poison_inflight() {
        let gateway = Arc::new(CountingGateway::failing());
        let orchestrator = CacheOrchestrator::new(Arc::new(MemoryStore::new()), gateway.clone());

        assert!(orchestrator.resolve(params("hello")).await.is_err());
        // 失败后在途标记已清理，后续请求照常走上游
        assert!(orchestrator.resolve(params("hello")).await.is_err());
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_identical_requests_coalesce() {
        let gateway = Arc::new(CountingGateway::slow(Duration::from_millis(100)));
        let orchestrator = Arc::new(CacheOrchestrator::new(
            Arc::new(MemoryStore::new()),
            gateway.clone(),
        ));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let orchestrator = orchestrator.clone();
            handles.push(tokio::spawn(async move {
                orchestrator.resolve(params("hello")).await
            }));
        }

        let mut fresh = 0;
        let mut hits = 0;
        for handle in handles {
            let result = handle.await.unwrap().unwrap();
            if result.cached {
                hits += 1;
            } else {
                fresh += 1;
            }
        }

        assert_eq!(gateway.call_count(), 1, "并发同参请求应合流到一次上游调用");
        assert_eq!(fresh, 1);
        assert_eq!(hits, 3);
    }
}
