//! TTS Provider Port - 语音合成供应商抽象
//!
//! 定义与供应商无关的能力接口，具体供应商实现在 infrastructure/adapters 层。
//! 更换供应商时只需新增一个实现，调用方不感知。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::{SynthesisRequest, SynthesisResult};
use crate::domain::voice::Voice;

/// TTS 错误
///
/// 两个调用期错误种类都保留底层原因描述，不做本地恢复
#[derive(Debug, Error)]
pub enum TtsError {
    /// 合成失败（凭证错误、空文本、传输错误、供应商拒绝）
    #[error("Speechify TTS error: {0}")]
    Synthesis(String),

    /// 音色目录获取失败
    #[error("Speechify voices error: {0}")]
    Catalog(String),

    /// 客户端构建失败（仅构造期）
    #[error("TTS client configuration error: {0}")]
    Config(String),
}

impl TtsError {
    pub fn synthesis(cause: impl std::fmt::Display) -> Self {
        Self::Synthesis(cause.to_string())
    }

    pub fn catalog(cause: impl std::fmt::Display) -> Self {
        Self::Catalog(cause.to_string())
    }

    pub fn is_synthesis(&self) -> bool {
        matches!(self, Self::Synthesis(_))
    }

    pub fn is_catalog(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }
}

/// TTS Provider Port
///
/// 每次调用恰好发起一次远端请求，无重试、无缓存
#[async_trait]
pub trait TtsProviderPort: Send + Sync {
    /// 合成语音
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResult, TtsError>;

    /// 列出音色目录，保持供应商返回的顺序
    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_wrap_cause() {
        let err = TtsError::synthesis("HTTP 401 Unauthorized: invalid token");
        assert!(err.is_synthesis());
        assert_eq!(
            err.to_string(),
            "Speechify TTS error: HTTP 401 Unauthorized: invalid token"
        );

        let err = TtsError::catalog("connection refused");
        assert!(err.is_catalog());
        assert!(err.to_string().contains("connection refused"));
    }
}
