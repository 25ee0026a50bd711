//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use crate::domain::synthesis::AudioCodec;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOCACHE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOCACHE_SERVER__PORT=8080`
/// - `VOCACHE_TTS__URL=https://tts.example-cloud.com`
/// - `VOCACHE_TTS__SECRET_ID=xxx`
/// - `VOCACHE_CACHE__ENABLED=false`
/// - `VOCACHE_CACHE__DIR=/data/cache`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("tts.url", "https://tts.example-cloud.com")?
        .set_default("tts.secret_id", "")?
        .set_default("tts.secret_key", "")?
        .set_default("tts.timeout_secs", 30)?
        .set_default("tts.default_voice_type", 301030)?
        .set_default("tts.default_sample_rate", 16000)?
        .set_default("tts.default_codec", "wav")?
        .set_default("tts.default_emotion", "neutral")?
        .set_default("cache.enabled", true)?
        .set_default("cache.dir", "data/cache")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: VOCACHE_，层级分隔符: __ (双下划线)
    // 例如: VOCACHE_CACHE__DIR=/data/cache
    builder = builder.add_source(
        Environment::with_prefix("VOCACHE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.default_sample_rate == 0 {
        return Err(ConfigError::ValidationError(
            "Default sample rate cannot be 0".to_string(),
        ));
    }

    if AudioCodec::parse(&config.tts.default_codec).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "Unknown default codec: {}",
            config.tts.default_codec
        )));
    }

    if config.cache.enabled && config.cache.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Cache directory cannot be empty when cache is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    if let Some(base_url) = &config.server.base_url {
        tracing::info!("Base URL: {}", base_url);
    }
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Default Voice: {}", config.tts.default_voice_type);
    tracing::info!("Default Sample Rate: {}", config.tts.default_sample_rate);
    tracing::info!("Default Codec: {}", config.tts.default_codec);
    tracing::info!("Cache Enabled: {}", config.cache.enabled);
    if config.cache.enabled {
        tracing::info!("Cache Directory: {:?}", config.cache.dir);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
