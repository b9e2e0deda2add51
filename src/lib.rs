//! Storyvoice - 睡前故事 TTS 生成
//!
//! 架构设计: Hexagonal Architecture + CQRS
//!
//! 领域层 (domain/):
//! - Speech Context: 供应商无关的合成请求/结果，按语言选择模型
//! - Voice Context: 音色目录的稳定表示
//!
//! 应用层 (application/):
//! - Ports: TtsProviderPort, StoryStorePort
//! - Commands: 生成剧集音频、冒烟检查
//! - Queries: 音色列表
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Speechify 客户端、旧供应商兼容门面、故事文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{TtsError, TtsProviderPort};
pub use config::{load_config, AppConfig};
pub use domain::speech::{AudioFormat, LegacyVoiceSettings, SpeechModel, SynthesisRequest, SynthesisResult};
pub use domain::voice::{Gender, Voice};
pub use infrastructure::{LegacyCompatibleTtsProvider, SpeechifyTtsClient};
