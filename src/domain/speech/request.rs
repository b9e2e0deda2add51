//! Speech Context - 合成请求与结果

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{AudioFormat, LegacyVoiceSettings, SpeechModel, DEFAULT_VOICE_ID};

/// 语音合成请求（与供应商无关）
///
/// 不变量:
/// - text 不能为空
/// - legacy 字段只被接受，不影响合成结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 音色 ID，未指定时使用默认音色
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// 语言标签（如 "en"、"fr-FR"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 输出格式，未指定时为 mp3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,
    /// 旧供应商参数
    #[serde(flatten)]
    pub legacy: LegacyVoiceSettings,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_legacy(mut self, legacy: LegacyVoiceSettings) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.text.is_empty() {
            return Err("text must not be empty");
        }
        Ok(())
    }

    pub fn resolved_format(&self) -> AudioFormat {
        self.format.unwrap_or_default()
    }

    pub fn resolved_voice(&self) -> &str {
        self.voice.as_deref().unwrap_or(DEFAULT_VOICE_ID)
    }

    pub fn model(&self) -> SpeechModel {
        SpeechModel::for_language(self.language.as_deref())
    }
}

/// 语音合成结果
///
/// 每次调用新建，不缓存、不修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
    /// base64 编码的音频
    pub audio_data: String,
    /// 输出格式（等于请求解析后的格式）
    pub format: AudioFormat,
    /// 时间对齐信息，结构由供应商定义，原样透传
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_marks: Option<serde_json::Value>,
    /// 计费字符数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable_characters_count: Option<u64>,
}

impl SynthesisResult {
    /// 解码 base64 音频
    pub fn decode_audio(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(self.audio_data.as_bytes())
    }
}
