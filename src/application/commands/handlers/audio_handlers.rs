//! Audio Command Handlers

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::GenerateEpisodeAudio;
use crate::application::error::ApplicationError;
use crate::application::ports::{StoryStorePort, TtsProviderPort};
use crate::domain::speech::{AudioFormat, SynthesisRequest};

/// 生成剧集音频响应
#[derive(Debug, Clone)]
pub struct GenerateEpisodeAudioResponse {
    pub episode_id: String,
    pub audio_path: PathBuf,
    pub format: AudioFormat,
    pub audio_bytes: usize,
    pub billable_characters_count: Option<u64>,
}

/// GenerateEpisodeAudio Handler
pub struct GenerateEpisodeAudioHandler {
    tts: Arc<dyn TtsProviderPort>,
    stories: Arc<dyn StoryStorePort>,
}

impl GenerateEpisodeAudioHandler {
    pub fn new(tts: Arc<dyn TtsProviderPort>, stories: Arc<dyn StoryStorePort>) -> Self {
        Self { tts, stories }
    }

    pub async fn handle(
        &self,
        command: GenerateEpisodeAudio,
    ) -> Result<GenerateEpisodeAudioResponse, ApplicationError> {
        let story = match command.story_path {
            Some(path) => self.stories.read_story(path).await?,
            None => self.stories.latest_story().await?,
        };

        tracing::info!(
            episode_id = %story.episode_id,
            path = %story.path.display(),
            text_len = story.text.len(),
            "Generating episode audio"
        );

        let request = SynthesisRequest {
            text: story.text,
            voice: command.voice,
            language: command.language,
            format: Some(command.format),
            legacy: command.legacy,
        };
        let result = self.tts.synthesize(request).await?;

        let audio = result
            .decode_audio()
            .map_err(|e| ApplicationError::invalid_audio(e.to_string()))?;
        if audio.is_empty() {
            return Err(ApplicationError::invalid_audio("provider returned no audio"));
        }

        let audio_path = self
            .stories
            .save_audio(&story.episode_id, result.format, &audio)
            .await?;

        tracing::info!(
            episode_id = %story.episode_id,
            path = %audio_path.display(),
            size = audio.len(),
            billable_characters = ?result.billable_characters_count,
            "Episode audio saved"
        );

        Ok(GenerateEpisodeAudioResponse {
            episode_id: story.episode_id,
            audio_path,
            format: result.format,
            audio_bytes: audio.len(),
            billable_characters_count: result.billable_characters_count,
        })
    }
}
