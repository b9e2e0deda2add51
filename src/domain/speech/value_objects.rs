//! Speech Context - Value Objects

use serde::{Deserialize, Serialize};

/// 默认音色（Speechify 内置音色）
pub const DEFAULT_VOICE_ID: &str = "scott";

/// 输出音频格式
///
/// 固定枚举，序列化为小写字符串，默认 mp3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Ogg,
    Aac,
}

impl AudioFormat {
    /// 所有支持的格式
    pub const ALL: [AudioFormat; 4] = [Self::Mp3, Self::Wav, Self::Ogg, Self::Aac];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "ogg" => Some(Self::Ogg),
            "aac" => Some(Self::Aac),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Aac => "aac",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Aac => "audio/aac",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("unsupported audio format: {}", s))
    }
}

/// 合成模型
///
/// 由语言标签唯一决定，只有两种结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeechModel {
    #[serde(rename = "simba-english")]
    SimbaEnglish,
    #[serde(rename = "simba-multilingual")]
    SimbaMultilingual,
}

impl SpeechModel {
    /// 根据语言标签选择模型
    ///
    /// "en" 或以 "en" 开头 → simba-english，其余（包括未指定）→ simba-multilingual
    pub fn for_language(language: Option<&str>) -> Self {
        match language {
            Some(tag) if tag == "en" || tag.starts_with("en") => Self::SimbaEnglish,
            _ => Self::SimbaMultilingual,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimbaEnglish => "simba-english",
            Self::SimbaMultilingual => "simba-multilingual",
        }
    }
}

impl std::fmt::Display for SpeechModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 旧供应商（ElevenLabs）的音色调节参数
///
/// 仅为兼容旧调用方保留，当前供应商不支持，合成时读取后丢弃
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyVoiceSettings {
    /// 稳定性 (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<f32>,
    /// 相似度增强 (0.0 - 1.0)
    #[serde(
        default,
        alias = "similarityBoost",
        skip_serializing_if = "Option::is_none"
    )]
    pub similarity_boost: Option<f32>,
}

impl LegacyVoiceSettings {
    pub fn new(stability: f32, similarity_boost: f32) -> Self {
        Self {
            stability: Some(stability),
            similarity_boost: Some(similarity_boost),
        }
    }

    /// 是否携带了任何旧参数
    pub fn is_empty(&self) -> bool {
        self.stability.is_none() && self.similarity_boost.is_none()
    }
}
