//! Story Store Port - 故事文本与音频输出的存取
//!
//! 故事按文件名约定组织: `{episode_id}-story.txt` → `{episode_id}-audio.{ext}`

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::speech::AudioFormat;

/// 故事存取错误
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("No story files found in {0}")]
    NoStories(String),

    #[error("Invalid story file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 故事文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryText {
    /// 剧集 ID（文件名去掉 `-story.txt` 后缀）
    pub episode_id: String,
    /// 来源文件
    pub path: PathBuf,
    /// 文本内容
    pub text: String,
}

/// Story Store Port
#[async_trait]
pub trait StoryStorePort: Send + Sync {
    /// 读取最新的故事（文件名字典序最大者）
    async fn latest_story(&self) -> Result<StoryText, StoryError>;

    /// 读取指定故事文件
    async fn read_story(&self, path: PathBuf) -> Result<StoryText, StoryError>;

    /// 保存剧集音频，返回写入路径
    async fn save_audio(
        &self,
        episode_id: &str,
        format: AudioFormat,
        data: &[u8],
    ) -> Result<PathBuf, StoryError>;
}
