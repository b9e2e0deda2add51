//! TTS Adapter - 供应商适配器实现

mod fake_tts_client;
mod legacy_compat;
mod speechify_client;

pub use fake_tts_client::{FakeTtsProvider, FakeTtsProviderConfig, RecordedSynthesis};
pub use legacy_compat::LegacyCompatibleTtsProvider;
pub use speechify_client::*;
