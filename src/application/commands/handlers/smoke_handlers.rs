//! Smoke Check Handler
//!
//! 依次执行: 基础合成 → 音色列表 → wav 格式 → 旧参数兼容，任一步失败即中止

use std::sync::Arc;

use crate::application::commands::RunSmokeCheck;
use crate::application::error::ApplicationError;
use crate::application::ports::TtsProviderPort;
use crate::domain::speech::{AudioFormat, LegacyVoiceSettings, SynthesisRequest};
use crate::domain::voice::filter_by_language;

/// 单步检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeStep {
    pub name: &'static str,
    pub detail: String,
}

/// 冒烟检查报告
#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    pub steps: Vec<SmokeStep>,
    /// 基础合成步骤得到的音频，供调用方落盘试听
    pub sample_audio: Vec<u8>,
}

/// RunSmokeCheck Handler
pub struct RunSmokeCheckHandler {
    tts: Arc<dyn TtsProviderPort>,
}

impl RunSmokeCheckHandler {
    pub fn new(tts: Arc<dyn TtsProviderPort>) -> Self {
        Self { tts }
    }

    pub async fn handle(&self, command: RunSmokeCheck) -> Result<SmokeReport, ApplicationError> {
        let mut report = SmokeReport::default();

        let basic = self
            .tts
            .synthesize(
                SynthesisRequest::new(
                    "This is a test of the Speechify TTS integration for the sleep story generator.",
                )
                .with_format(AudioFormat::Mp3)
                .with_voice(&command.voice)
                .with_language("en"),
            )
            .await?;
        report.sample_audio = basic
            .decode_audio()
            .map_err(|e| ApplicationError::invalid_audio(e.to_string()))?;
        report.steps.push(SmokeStep {
            name: "basic synthesis",
            detail: format!(
                "format={}, billable={:?}, audio={} bytes",
                basic.format,
                basic.billable_characters_count,
                report.sample_audio.len()
            ),
        });

        let voices = self.tts.list_voices().await?;
        let total = voices.len();
        let english = filter_by_language(voices, "en");
        let sample = english
            .first()
            .map(|v| format!(", sample: {} ({})", v.name, v.id))
            .unwrap_or_default();
        report.steps.push(SmokeStep {
            name: "voice listing",
            detail: format!("{} voices, {} english{}", total, english.len(), sample),
        });

        let wav = self
            .tts
            .synthesize(
                SynthesisRequest::new("Testing WAV format.")
                    .with_format(AudioFormat::Wav)
                    .with_voice(&command.voice),
            )
            .await?;
        report.steps.push(SmokeStep {
            name: "wav format",
            detail: format!("format={}", wav.format),
        });

        let legacy = self
            .tts
            .synthesize(
                SynthesisRequest::new("Testing legacy parameters.")
                    .with_format(AudioFormat::Mp3)
                    .with_voice(&command.voice)
                    .with_language("en")
                    .with_legacy(LegacyVoiceSettings::new(0.5, 0.8)),
            )
            .await?;
        report.steps.push(SmokeStep {
            name: "legacy parameters",
            detail: format!("format={}", legacy.format),
        });

        for step in &report.steps {
            tracing::info!(step = step.name, detail = %step.detail, "Smoke step passed");
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FakeTtsProvider;

    #[tokio::test]
    async fn test_all_steps_pass_against_healthy_provider() {
        let fake = Arc::new(FakeTtsProvider::with_defaults());
        let handler = RunSmokeCheckHandler::new(fake.clone());

        let report = handler.handle(RunSmokeCheck::default()).await.unwrap();

        let names: Vec<_> = report.steps.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["basic synthesis", "voice listing", "wav format", "legacy parameters"]
        );
        assert!(report.steps[1].detail.contains("2 voices, 1 english"));
        assert_eq!(report.steps[2].detail, "format=wav");
        assert!(!report.sample_audio.is_empty());
        assert_eq!(fake.recorded().len(), 3);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let handler = RunSmokeCheckHandler::new(Arc::new(FakeTtsProvider::failing("bad key")));
        let err = handler.handle(RunSmokeCheck::default()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Tts(ref e) if e.is_synthesis()));
    }
}
