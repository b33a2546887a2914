//! OpenAI-compatible speech endpoint client.
//!
//! `POST {base_url}/v1/audio/speech` with `model`, `voice`, `input` and
//! `response_format`; the response body is the encoded audio.

use async_trait::async_trait;

use crate::config::SpeechConfig;
use crate::speech::{SpeechError, SpeechSynthesizer};

/// Synthesizes speech through an OpenAI-compatible audio endpoint.
pub struct ApiSynthesizer {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl ApiSynthesizer {
    pub fn from_config(config: &SpeechConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ApiSynthesizer {
    /// The OpenAI request schema has no language argument; the voice model
    /// infers it from `input`.
    async fn synthesize(&self, text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
        let url = format!(
            "{}/v1/audio/speech",
            self.config.base_url.trim_end_matches('/')
        );
        let body = serde_json::json!({
            "model":           self.config.model,
            "voice":           self.config.voice,
            "input":           text,
            "response_format": self.config.format
        });

        let mut req = self.client.post(&url).json(&body);
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(bytes.to_vec())
    }

    fn file_extension(&self) -> &str {
        &self.config.format
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn synth(base_url: &str, api_key: Option<&str>) -> ApiSynthesizer {
        ApiSynthesizer::from_config(&SpeechConfig {
            base_url: base_url.into(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 5,
            ..SpeechConfig::default()
        })
    }

    #[tokio::test]
    async fn returns_audio_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/speech"))
            .and(header("authorization", "Bearer sk-tts"))
            .and(body_json(json!({
                "model": "tts-1",
                "voice": "alloy",
                "input": "வணக்கம்",
                "response_format": "mp3"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFB, 0x90]))
            .expect(1)
            .mount(&server)
            .await;

        let audio = synth(&server.uri(), Some("sk-tts"))
            .synthesize("வணக்கம்", "ta")
            .await
            .unwrap();
        assert_eq!(audio, vec![0xFF, 0xFB, 0x90]);
    }

    #[tokio::test]
    async fn empty_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = synth(&server.uri(), None).synthesize("x", "ta").await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyAudio));
    }

    #[tokio::test]
    async fn http_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = synth(&server.uri(), None).synthesize("x", "ta").await.unwrap_err();
        assert!(matches!(err, SpeechError::Status(401)));
    }

    #[test]
    fn extension_follows_format() {
        let mut cfg = SpeechConfig::default();
        cfg.format = "wav".into();
        assert_eq!(ApiSynthesizer::from_config(&cfg).file_extension(), "wav");
    }
}
