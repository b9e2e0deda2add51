//! Audio Commands

use std::path::PathBuf;

use crate::domain::speech::{AudioFormat, LegacyVoiceSettings};

/// 为剧集故事生成音频
#[derive(Debug, Clone, Default)]
pub struct GenerateEpisodeAudio {
    /// 指定故事文件，None 时取最新故事
    pub story_path: Option<PathBuf>,
    pub voice: Option<String>,
    pub language: Option<String>,
    pub format: AudioFormat,
    /// 旧调用方沿用的参数，会被透传给兼容门面并被忽略
    pub legacy: LegacyVoiceSettings,
}

/// 对供应商做一轮冒烟检查
#[derive(Debug, Clone)]
pub struct RunSmokeCheck {
    pub voice: String,
}

impl Default for RunSmokeCheck {
    fn default() -> Self {
        Self {
            voice: crate::domain::speech::DEFAULT_VOICE_ID.to_string(),
        }
    }
}
