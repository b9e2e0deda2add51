//! Fake TTS Provider - 用于测试的 TTS 供应商
//!
//! 始终返回固定的音频和音色目录，不实际调用远端服务

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Mutex;

use crate::application::ports::{TtsError, TtsProviderPort};
use crate::domain::speech::{SpeechModel, SynthesisRequest, SynthesisResult};
use crate::domain::voice::{Gender, Voice};

/// Fake TTS Provider 配置
#[derive(Debug, Clone)]
pub struct FakeTtsProviderConfig {
    /// 固定返回的音频字节
    pub audio: Vec<u8>,
    /// 固定返回的音色目录
    pub voices: Vec<Voice>,
    /// 设置后所有调用都以该原因失败
    pub failure: Option<String>,
}

impl Default for FakeTtsProviderConfig {
    fn default() -> Self {
        Self {
            audio: b"ID3\x04\x00fake-mp3-frames".to_vec(),
            voices: vec![
                Voice {
                    id: "scott".to_string(),
                    name: "Scott".to_string(),
                    language: "en-US".to_string(),
                    gender: Gender::Male,
                },
                Voice {
                    id: "lucia".to_string(),
                    name: "Lucia".to_string(),
                    language: "es-ES".to_string(),
                    gender: Gender::Female,
                },
            ],
            failure: None,
        }
    }
}

/// 一次合成调用的记录
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSynthesis {
    pub request: SynthesisRequest,
    pub model: SpeechModel,
}

/// Fake TTS Provider
pub struct FakeTtsProvider {
    config: FakeTtsProviderConfig,
    calls: Mutex<Vec<RecordedSynthesis>>,
}

impl FakeTtsProvider {
    pub fn new(config: FakeTtsProviderConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeTtsProviderConfig::default())
    }

    /// 所有调用都失败
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(FakeTtsProviderConfig {
            failure: Some(reason.into()),
            ..Default::default()
        })
    }

    /// 已记录的合成调用
    pub fn recorded(&self) -> Vec<RecordedSynthesis> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl TtsProviderPort for FakeTtsProvider {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResult, TtsError> {
        request.validate().map_err(TtsError::synthesis)?;
        if let Some(reason) = &self.config.failure {
            return Err(TtsError::synthesis(reason));
        }

        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.resolved_voice(),
            "FakeTtsProvider: returning fixed audio"
        );

        let format = request.resolved_format();
        let billable = request.text.chars().count() as u64;
        self.calls
            .lock()
            .expect("calls lock")
            .push(RecordedSynthesis {
                model: request.model(),
                request,
            });

        Ok(SynthesisResult {
            audio_data: BASE64.encode(&self.config.audio),
            format,
            speech_marks: None,
            billable_characters_count: Some(billable),
        })
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        if let Some(reason) = &self.config.failure {
            return Err(TtsError::catalog(reason));
        }
        Ok(self.config.voices.clone())
    }
}
