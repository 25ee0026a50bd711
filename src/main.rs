//! Vocache - 云端 TTS 缓存代理
//!
//! 启动流程: 配置 -> 日志 -> 适配器装配 -> HTTP 服务器（优雅关闭）

use std::sync::Arc;

use vocache::config::{load_config, print_config};
use vocache::domain::VoiceCatalog;
use vocache::infrastructure::cache::{FileCacheConfig, FileCacheStore};
use vocache::infrastructure::http::{AppState, HttpServer, ServerConfig, SynthesisDefaults};
use vocache::infrastructure::tts::{HttpTtsGateway, HttpTtsGatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},vocache={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Vocache - TTS 缓存代理");
    print_config(&config);

    // 创建文件缓存
    let store = Arc::new(
        FileCacheStore::new(FileCacheConfig {
            dir: config.cache.dir.clone(),
            enabled: config.cache.enabled,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize cache store: {}", e))?,
    );

    // 创建云端 TTS 网关
    let gateway = Arc::new(
        HttpTtsGateway::new(HttpTtsGatewayConfig {
            base_url: config.tts.url.clone(),
            secret_id: config.tts.secret_id.clone(),
            secret_key: config.tts.secret_key.clone(),
            timeout_secs: config.tts.timeout_secs,
        })
        .map_err(|e| anyhow::anyhow!("Failed to initialize TTS gateway: {}", e))?,
    );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        store,
        gateway,
        VoiceCatalog::builtin(),
        SynthesisDefaults::from(&config.tts),
        config.server.base_url.clone(),
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
