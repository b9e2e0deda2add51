//! Legacy Compatible Provider - 旧供应商调用形态的兼容门面
//!
//! 为原 ElevenLabs 接入编写的调用方无需改动即可使用当前供应商:
//! 请求形态保持超集，不支持的参数由底层适配器静默丢弃。
//! 门面本身不含任何逻辑，错误原样透传。

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{TtsError, TtsProviderPort};
use crate::domain::speech::{SynthesisRequest, SynthesisResult};
use crate::domain::voice::Voice;

use super::SpeechifyTtsClient;

/// 兼容门面
#[derive(Clone)]
pub struct LegacyCompatibleTtsProvider {
    inner: Arc<dyn TtsProviderPort>,
}

impl LegacyCompatibleTtsProvider {
    /// 使用 API Key 创建，内部包装 Speechify 客户端
    pub fn new(api_key: impl Into<String>) -> Result<Self, TtsError> {
        Ok(Self::with_provider(Arc::new(SpeechifyTtsClient::new(api_key)?)))
    }

    /// 包装任意供应商实现
    pub fn with_provider(inner: Arc<dyn TtsProviderPort>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TtsProviderPort for LegacyCompatibleTtsProvider {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResult, TtsError> {
        self.inner.synthesize(request).await
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        self.inner.list_voices().await
    }
}
