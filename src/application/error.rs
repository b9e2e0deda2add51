//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{StoryError, TtsError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 供应商错误，保留原始种类
    #[error(transparent)]
    Tts(#[from] TtsError),

    /// 故事存取错误
    #[error(transparent)]
    Story(#[from] StoryError),

    /// 供应商返回的音频无法使用
    #[error("Invalid audio payload: {0}")]
    InvalidAudio(String),
}

impl ApplicationError {
    pub fn invalid_audio(message: impl Into<String>) -> Self {
        Self::InvalidAudio(message.into())
    }
}
