//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 约定的 Speechify 环境变量
//! 2. 环境变量（STORYVOICE_ 前缀）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

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

/// 约定的 API Key 环境变量
const API_KEY_ENV: &str = "SPEECHIFY_API_KEY";

/// 约定的默认音色环境变量
const VOICE_ID_ENV: &str = "SPEECHIFY_VOICE_ID";

/// 加载应用配置
///
/// # 环境变量示例
/// - `SPEECHIFY_API_KEY=sk-...`
/// - `SPEECHIFY_VOICE_ID=scott`
/// - `STORYVOICE_SPEECHIFY__BASE_URL=http://localhost:9000`
/// - `STORYVOICE_STORY__OUTPUT_DIR=/data/output`
/// - `STORYVOICE_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    builder = builder
        .set_default("speechify.base_url", crate::infrastructure::adapters::DEFAULT_BASE_URL)?
        .set_default("speechify.default_voice", crate::domain::speech::DEFAULT_VOICE_ID)?
        .set_default("story.output_dir", "output")?
        .set_default("story.language", "en")?
        .set_default("story.format", "mp3")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: STORYVOICE_SPEECHIFY__BASE_URL=http://localhost:9000
    builder = builder.add_source(
        Environment::with_prefix("STORYVOICE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    builder = builder
        .set_override_option("speechify.api_key", non_empty_env(API_KEY_ENV))?
        .set_override_option("speechify.default_voice", non_empty_env(VOICE_ID_ENV))?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.speechify.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Speechify base URL cannot be empty".to_string(),
        ));
    }

    if config.speechify.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "Speechify timeout cannot be 0".to_string(),
        ));
    }

    if config.story.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Story output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出凭证
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Speechify URL: {}", config.speechify.base_url);
    tracing::info!(
        "Speechify API Key: {}",
        if config.speechify.api_key.is_some() { "set" } else { "missing" }
    );
    if let Some(secs) = config.speechify.timeout_secs {
        tracing::info!("Speechify Timeout: {}s", secs);
    }
    tracing::info!("Default Voice: {}", config.speechify.default_voice);
    tracing::info!("Story Directory: {:?}", config.story.output_dir);
    tracing::info!("Story Language: {}", config.story.language);
    tracing::info!("Audio Format: {}", config.story.format);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
