//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::TtsProviderPort;
use crate::application::queries::ListVoices;
use crate::domain::voice::{filter_by_language, Voice};

/// ListVoices Handler
pub struct ListVoicesHandler {
    tts: Arc<dyn TtsProviderPort>,
}

impl ListVoicesHandler {
    pub fn new(tts: Arc<dyn TtsProviderPort>) -> Self {
        Self { tts }
    }

    pub async fn handle(&self, query: ListVoices) -> Result<Vec<Voice>, ApplicationError> {
        let voices = self.tts.list_voices().await?;
        Ok(match query.language.as_deref() {
            Some(prefix) => filter_by_language(voices, prefix),
            None => voices,
        })
    }
}
