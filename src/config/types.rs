//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::speech::{AudioFormat, DEFAULT_VOICE_ID};
use crate::infrastructure::adapters::{SpeechifyClientConfig, DEFAULT_BASE_URL};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Speechify 配置
    #[serde(default)]
    pub speechify: SpeechifyConfig,

    /// 故事文件配置
    #[serde(default)]
    pub story: StoryConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// Speechify 配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechifyConfig {
    /// API Key，库本身不校验，缺失时由命令行入口报错
    #[serde(default)]
    pub api_key: Option<String>,

    /// API 基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 传输层超时（秒）
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// 默认音色
    #[serde(default = "default_voice")]
    pub default_voice: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_voice() -> String {
    DEFAULT_VOICE_ID.to_string()
}

impl Default for SpeechifyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: None,
            default_voice: default_voice(),
        }
    }
}

impl SpeechifyConfig {
    /// 构造客户端配置
    pub fn client_config(&self, api_key: impl Into<String>) -> SpeechifyClientConfig {
        let config = SpeechifyClientConfig::new(api_key).with_base_url(&self.base_url);
        match self.timeout_secs {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }
}

/// 故事文件配置
#[derive(Debug, Clone, Deserialize)]
pub struct StoryConfig {
    /// 故事文本与生成音频所在目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 故事语言
    #[serde(default = "default_language")]
    pub language: String,

    /// 输出音频格式
    #[serde(default)]
    pub format: AudioFormat,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            language: default_language(),
            format: AudioFormat::Mp3,
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
