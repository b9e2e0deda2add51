//! Speechify TTS Client - 调用 Speechify REST API
//!
//! 实现 TtsProviderPort trait，供应商相关的请求/响应形态只存在于本文件
//!
//! Speechify API:
//! POST {base_url}/v1/audio/speech
//! Request: {"input": "...", "voice_id": "scott", "audio_format": "mp3", "model": "simba-english", ...}
//! Response: {"audio_data": "<base64>", "audio_format": "mp3", "billable_characters_count": 42, "speech_marks": {...}}
//!
//! GET {base_url}/v1/voices
//! Response: [{"id": "...", "display_name": "...", "locale": "en-US", "gender": "male", "models": [...]}]

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{TtsError, TtsProviderPort};
use crate::domain::speech::{AudioFormat, SpeechModel, SynthesisRequest, SynthesisResult};
use crate::domain::voice::{resolve_language, Gender, Voice};

/// Speechify 默认 API 地址
pub const DEFAULT_BASE_URL: &str = "https://api.sws.speechify.com";

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    input: &'a str,
    voice_id: &'a str,
    audio_format: AudioFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    model: SpeechModel,
    options: SpeechHttpOptions,
}

/// 固定的合成选项，不对调用方开放
#[derive(Debug, Serialize)]
struct SpeechHttpOptions {
    loudness_normalization: bool,
    text_normalization: bool,
}

impl Default for SpeechHttpOptions {
    fn default() -> Self {
        Self {
            loudness_normalization: true,
            text_normalization: true,
        }
    }
}

/// 合成响应体
#[derive(Debug, Deserialize)]
struct SpeechHttpResponse {
    audio_data: String,
    #[serde(default)]
    audio_format: Option<String>,
    #[serde(default)]
    billable_characters_count: Option<u64>,
    #[serde(default)]
    speech_marks: Option<serde_json::Value>,
}

/// 音色目录记录
#[derive(Debug, Deserialize)]
struct VoiceHttpRecord {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    gender: Option<serde_json::Value>,
    #[serde(default)]
    models: Option<Vec<VoiceModelRecord>>,
}

#[derive(Debug, Deserialize)]
struct VoiceModelRecord {
    #[serde(default)]
    languages: Option<Vec<VoiceLanguageRecord>>,
}

#[derive(Debug, Deserialize)]
struct VoiceLanguageRecord {
    #[serde(default)]
    locale: Option<String>,
}

impl VoiceHttpRecord {
    /// 首个模型的首个语言
    fn first_model_locale(&self) -> Option<&str> {
        self.models
            .as_deref()?
            .first()?
            .languages
            .as_deref()?
            .first()?
            .locale
            .as_deref()
    }

    fn into_voice(self) -> Voice {
        let language = resolve_language(self.locale.as_deref(), self.first_model_locale());
        Voice {
            gender: Gender::from_vendor(self.gender.as_ref()),
            language,
            name: self.display_name.unwrap_or_default(),
            id: self.id,
        }
    }
}

/// Speechify 客户端配置
#[derive(Debug, Clone)]
pub struct SpeechifyClientConfig {
    /// API Key（构造时不校验，首次调用时才会暴露错误）
    pub api_key: String,
    /// API 基础 URL
    pub base_url: String,
    /// 传输层超时（秒），None 表示不限制
    pub timeout_secs: Option<u64>,
}

impl SpeechifyClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Speechify TTS 客户端
///
/// 只持有不可变配置，可在多个任务间共享
pub struct SpeechifyTtsClient {
    client: Client,
    config: SpeechifyClientConfig,
}

impl SpeechifyTtsClient {
    /// 使用 API Key 和默认配置创建客户端
    pub fn new(api_key: impl Into<String>) -> Result<Self, TtsError> {
        Self::with_config(SpeechifyClientConfig::new(api_key))
    }

    pub fn with_config(config: SpeechifyClientConfig) -> Result<Self, TtsError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TtsError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn speech_url(&self) -> String {
        format!("{}/v1/audio/speech", self.config.base_url.trim_end_matches('/'))
    }

    fn voices_url(&self) -> String {
        format!("{}/v1/voices", self.config.base_url.trim_end_matches('/'))
    }
}

/// 将非 2xx 响应转换为错误描述
async fn check_status(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response.text().await.unwrap_or_default();
    Err(format!("HTTP {}: {}", status, error_text))
}

fn describe_transport_error(e: reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else if e.is_connect() {
        format!("Cannot connect to Speechify: {}", e)
    } else {
        e.to_string()
    }
}

#[async_trait]
impl TtsProviderPort for SpeechifyTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResult, TtsError> {
        request.validate().map_err(TtsError::synthesis)?;

        if !request.legacy.is_empty() {
            tracing::debug!(
                stability = ?request.legacy.stability,
                similarity_boost = ?request.legacy.similarity_boost,
                "Ignoring legacy voice settings not supported by Speechify"
            );
        }

        let format = request.resolved_format();
        let model = request.model();
        let body = SpeechHttpRequest {
            input: &request.text,
            voice_id: request.resolved_voice(),
            audio_format: format,
            language: request.language.as_deref(),
            model,
            options: SpeechHttpOptions::default(),
        };

        tracing::debug!(
            url = %self.speech_url(),
            text_len = body.input.len(),
            voice_id = %body.voice_id,
            model = %model,
            format = %format,
            "Sending Speechify synthesis request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TtsError::Synthesis(describe_transport_error(e)))?;

        let response = match check_status(response).await {
            Ok(response) => response,
            Err(message) => {
                tracing::warn!(error = %message, "Speechify synthesis rejected");
                return Err(TtsError::Synthesis(message));
            }
        };

        let payload: SpeechHttpResponse = response
            .json()
            .await
            .map_err(|e| TtsError::Synthesis(format!("Invalid response: {}", e)))?;

        tracing::info!(
            model = %model,
            format = %format,
            vendor_format = ?payload.audio_format,
            audio_b64_len = payload.audio_data.len(),
            billable_characters = ?payload.billable_characters_count,
            "Speechify synthesis completed"
        );

        Ok(SynthesisResult {
            audio_data: payload.audio_data,
            format,
            speech_marks: payload.speech_marks,
            billable_characters_count: payload.billable_characters_count,
        })
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, TtsError> {
        tracing::debug!(url = %self.voices_url(), "Fetching Speechify voice catalog");

        let response = self
            .client
            .get(self.voices_url())
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| TtsError::Catalog(describe_transport_error(e)))?;

        let response = match check_status(response).await {
            Ok(response) => response,
            Err(message) => {
                tracing::warn!(error = %message, "Speechify voice listing rejected");
                return Err(TtsError::Catalog(message));
            }
        };

        let records: Vec<VoiceHttpRecord> = response
            .json()
            .await
            .map_err(|e| TtsError::Catalog(format!("Invalid response: {}", e)))?;

        let voices: Vec<Voice> = records.into_iter().map(VoiceHttpRecord::into_voice).collect();

        tracing::info!(count = voices.len(), "Speechify voice catalog fetched");

        Ok(voices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::LegacyVoiceSettings;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn client_for(server: &ServerGuard, api_key: &str) -> SpeechifyTtsClient {
        let config = SpeechifyClientConfig::new(api_key).with_base_url(server.url());
        SpeechifyTtsClient::with_config(config).unwrap()
    }

    fn speech_body(format: &str) -> String {
        json!({
            "audio_data": BASE64.encode(vec![0xFFu8; 2048]),
            "audio_format": format,
            "billable_characters_count": 11,
            "speech_marks": {"type": "sentence", "chunks": []}
        })
        .to_string()
    }

    #[test]
    fn test_config_default() {
        let config = SpeechifyClientConfig::new("key");
        assert_eq!(config.base_url, "https://api.sws.speechify.com");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_builder() {
        let config = SpeechifyClientConfig::new("key")
            .with_base_url("http://localhost:9000/")
            .with_timeout(30);
        assert_eq!(config.timeout_secs, Some(30));

        let client = SpeechifyTtsClient::with_config(config).unwrap();
        assert_eq!(client.speech_url(), "http://localhost:9000/v1/audio/speech");
        assert_eq!(client.voices_url(), "http://localhost:9000/v1/voices");
    }

    #[tokio::test]
    async fn test_synthesize_english_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "input": "Hello world",
                "voice_id": "scott",
                "audio_format": "mp3",
                "language": "en",
                "model": "simba-english",
                "options": {"loudness_normalization": true, "text_normalization": true}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(speech_body("mp3"))
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let result = client
            .synthesize(
                SynthesisRequest::new("Hello world")
                    .with_format(AudioFormat::Mp3)
                    .with_language("en"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.format, AudioFormat::Mp3);
        assert_eq!(result.billable_characters_count, Some(11));
        assert!(result.speech_marks.as_ref().unwrap().is_object());
        assert_eq!(result.decode_audio().unwrap().len(), 2048);
    }

    #[tokio::test]
    async fn test_synthesize_spanish_uses_multilingual_model() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .match_body(Matcher::PartialJson(json!({
                "input": "Hola mundo",
                "language": "es-ES",
                "model": "simba-multilingual"
            })))
            .with_status(200)
            .with_body(speech_body("mp3"))
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let result = client
            .synthesize(
                SynthesisRequest::new("Hola mundo")
                    .with_format(AudioFormat::Mp3)
                    .with_language("es-ES"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.format, AudioFormat::Mp3);
    }

    #[tokio::test]
    async fn test_missing_language_is_omitted_and_multilingual() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .match_body(Matcher::Json(json!({
                "input": "No language given",
                "voice_id": "scott",
                "audio_format": "mp3",
                "model": "simba-multilingual",
                "options": {"loudness_normalization": true, "text_normalization": true}
            })))
            .with_status(200)
            .with_body(speech_body("mp3"))
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        client
            .synthesize(SynthesisRequest::new("No language given"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_format_is_echoed_from_request() {
        let mut server = Server::new_async().await;
        // 供应商始终回报 mp3，结果格式仍取自请求
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .with_status(200)
            .with_body(speech_body("mp3"))
            .expect(4)
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        for format in AudioFormat::ALL {
            let result = client
                .synthesize(
                    SynthesisRequest::new("Testing different audio formats.")
                        .with_voice("scott")
                        .with_format(format),
                )
                .await
                .unwrap();
            assert_eq!(result.format, format);
            assert!(!result.decode_audio().unwrap().is_empty());
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_legacy_settings_are_not_forwarded() {
        let mut server = Server::new_async().await;
        let expected_body = json!({
            "input": "Testing backward compatibility with legacy parameters.",
            "voice_id": "scott",
            "audio_format": "mp3",
            "language": "en",
            "model": "simba-english",
            "options": {"loudness_normalization": true, "text_normalization": true}
        });
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .match_body(Matcher::Json(expected_body))
            .with_status(200)
            .with_body(speech_body("mp3"))
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let plain = SynthesisRequest::new("Testing backward compatibility with legacy parameters.")
            .with_voice("scott")
            .with_language("en")
            .with_format(AudioFormat::Mp3);
        let legacy = plain.clone().with_legacy(LegacyVoiceSettings::new(0.5, 0.8));

        let plain_result = client.synthesize(plain).await.unwrap();
        let legacy_result = client.synthesize(legacy).await.unwrap();

        mock.assert_async().await;
        assert_eq!(plain_result, legacy_result);
    }

    #[tokio::test]
    async fn test_optional_response_fields_may_be_absent() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/audio/speech")
            .with_status(200)
            .with_body(json!({"audio_data": "SUQz", "audio_format": "wav", "speech_marks": null}).to_string())
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let result = client
            .synthesize(SynthesisRequest::new("Short").with_format(AudioFormat::Wav))
            .await
            .unwrap();

        assert_eq!(result.format, AudioFormat::Wav);
        assert_eq!(result.speech_marks, None);
        assert_eq!(result.billable_characters_count, None);
    }

    #[tokio::test]
    async fn test_empty_text_fails_without_network_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let err = client
            .synthesize(SynthesisRequest::new("").with_format(AudioFormat::Mp3))
            .await
            .unwrap_err();

        assert!(err.is_synthesis());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_whitespace_text_is_sent_to_vendor() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .match_body(Matcher::PartialJson(json!({"input": " ", "audio_format": "mp3"})))
            .with_status(200)
            .with_body(speech_body("mp3"))
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let result = client
            .synthesize(SynthesisRequest::new(" ").with_format(AudioFormat::Mp3))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.format, AudioFormat::Mp3);
    }

    #[tokio::test]
    async fn test_invalid_credential_is_synthesis_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/audio/speech")
            .match_header("authorization", "Bearer invalid-key")
            .with_status(401)
            .with_body(r#"{"message":"Invalid API key"}"#)
            .create_async()
            .await;

        let client = client_for(&server, "invalid-key");
        let err = client
            .synthesize(SynthesisRequest::new("This should fail.").with_format(AudioFormat::Mp3))
            .await
            .unwrap_err();

        assert!(err.is_synthesis());
        let message = err.to_string();
        assert!(message.starts_with("Speechify TTS error:"));
        assert!(message.contains("401"));
        assert!(message.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_synthesis_failure() {
        let config = SpeechifyClientConfig::new("key").with_base_url("http://127.0.0.1:1");
        let client = SpeechifyTtsClient::with_config(config).unwrap();

        let err = client
            .synthesize(SynthesisRequest::new("Unreachable"))
            .await
            .unwrap_err();
        assert!(err.is_synthesis());
    }

    #[tokio::test]
    async fn test_malformed_response_is_synthesis_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/audio/speech")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let err = client
            .synthesize(SynthesisRequest::new("Hello"))
            .await
            .unwrap_err();
        assert!(err.is_synthesis());
    }

    #[tokio::test]
    async fn test_list_voices_normalizes_records() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/voices")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(
                json!([
                    {"id": "scott", "display_name": "Scott", "locale": "en-US", "gender": "male", "type": "shared"},
                    {"id": "lucia", "display_name": "Lucia", "gender": "female",
                     "models": [{"name": "simba-multilingual", "languages": [{"locale": "es-ES"}, {"locale": "es-MX"}]}]},
                    {"id": "robot", "display_name": "Robot", "locale": "", "gender": "notSpecified",
                     "models": [{"name": "simba-english", "languages": []}]},
                    {"id": "ghost", "display_name": "Ghost", "gender": null, "models": null}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let voices = client.list_voices().await.unwrap();
        mock.assert_async().await;

        let summary: Vec<_> = voices
            .iter()
            .map(|v| (v.id.as_str(), v.name.as_str(), v.language.as_str(), v.gender))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("scott", "Scott", "en-US", Gender::Male),
                ("lucia", "Lucia", "es-ES", Gender::Female),
                ("robot", "Robot", "unknown", Gender::Other),
                ("ghost", "Ghost", "unknown", Gender::Other),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_voices_tolerates_null_display_name() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/voices")
            .with_status(200)
            .with_body(
                json!([
                    {"id": "scott", "display_name": "Scott", "locale": "en-US", "gender": "male"},
                    {"id": "nameless", "display_name": null, "locale": "fr-FR", "gender": "female"}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let voices = client.list_voices().await.unwrap();

        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1].id, "nameless");
        assert_eq!(voices[1].name, "");
        assert_eq!(voices[1].language, "fr-FR");
        assert_eq!(voices[1].gender, Gender::Female);
    }

    #[tokio::test]
    async fn test_list_voices_failure_is_catalog_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/voices")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = client_for(&server, "test-key");
        let err = client.list_voices().await.unwrap_err();

        assert!(err.is_catalog());
        assert!(err.to_string().contains("upstream exploded"));
    }
}
