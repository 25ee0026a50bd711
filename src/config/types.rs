//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 上游 TTS 配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（生成缓存文件 URL 时使用）
    /// 如果未设置，则使用相对路径
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 上游 TTS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 云端 TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 服务凭证
    #[serde(default)]
    pub secret_id: String,

    #[serde(default)]
    pub secret_key: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 请求未指定时的默认音色
    #[serde(default = "default_voice_type")]
    pub default_voice_type: i32,

    /// 请求未指定时的默认采样率
    #[serde(default = "default_sample_rate")]
    pub default_sample_rate: u32,

    /// 请求未指定时的默认编码格式
    #[serde(default = "default_codec")]
    pub default_codec: String,

    /// 请求未指定时的默认情感类别
    #[serde(default = "default_emotion")]
    pub default_emotion: String,
}

fn default_tts_url() -> String {
    "https://tts.example-cloud.com".to_string()
}

fn default_tts_timeout() -> u64 {
    30
}

fn default_voice_type() -> i32 {
    301030
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_codec() -> String {
    "wav".to_string()
}

fn default_emotion() -> String {
    crate::domain::synthesis::DEFAULT_EMOTION.to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            secret_id: String::new(),
            secret_key: String::new(),
            timeout_secs: default_tts_timeout(),
            default_voice_type: default_voice_type(),
            default_sample_rate: default_sample_rate(),
            default_codec: default_codec(),
            default_emotion: default_emotion(),
        }
    }
}

/// 缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 是否启用缓存
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// 缓存目录
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("data/cache")
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            dir: default_cache_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
