//! Speech Context - 语音合成限界上下文
//!
//! 职责:
//! - 合成请求/结果的供应商无关表示
//! - 按语言选择合成模型
//! - 旧供应商参数的兼容承载

mod request;
mod value_objects;

pub use request::{SynthesisRequest, SynthesisResult};
pub use value_objects::{AudioFormat, LegacyVoiceSettings, SpeechModel, DEFAULT_VOICE_ID};
