//! Configuration Module
//!
//! 提供应用配置管理功能，支持多层级配置来源：
//! - 约定的 Speechify 环境变量（SPEECHIFY_API_KEY、SPEECHIFY_VOICE_ID）
//! - 环境变量（前缀 STORYVOICE_）
//! - 配置文件（TOML 格式）
//! - 默认值（最低优先级）

mod loader;
mod types;

pub use loader::{load_config, load_config_from_path, print_config, ConfigError};
pub use types::{AppConfig, LogConfig, SpeechifyConfig, StoryConfig};
