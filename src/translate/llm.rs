//! LLM rewrite backend.
//!
//! `LlmTranslator` calls any OpenAI-compatible `/v1/chat/completions`
//! endpoint, such as Ollama in OpenAI mode, Groq, LM Studio or vLLM.
//! All connection details come from [`LlmConfig`]; nothing is hardcoded.

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::text::detect::UNDETERMINED;
use crate::translate::prompt::PromptBuilder;
use crate::translate::{check_status, TranslateError, Translator};

/// Translates by asking a chat model to rewrite the text in Tamil.
pub struct LlmTranslator {
    client: reqwest::Client,
    config: LlmConfig,
    prompt_builder: PromptBuilder,
}

impl LlmTranslator {
    /// Build an `LlmTranslator` from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is used if the builder fails.
    pub fn from_config(config: &LlmConfig, target_language: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            prompt_builder: PromptBuilder::new(target_language),
        }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    /// Send `text` to the configured endpoint.
    ///
    /// The `Authorization: Bearer …` header is attached only when
    /// `config.api_key` is a non-empty string.
    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError> {
        let source = (source_lang != UNDETERMINED).then_some(source_lang);
        let (system_msg, user_msg) = self.prompt_builder.build_chat(text, source);

        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "stream":      false,
            "temperature": self.config.temperature,
            "max_tokens":  self.config.max_tokens
        });

        let mut req = self.client.post(&url).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = check_status(req.send().await?).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        let translated = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(TranslateError::EmptyResponse)?
            .trim()
            .trim_matches('"')
            .trim()
            .to_string();

        if translated.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }

        Ok(translated)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_config(base_url: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            base_url: base_url.into(),
            api_key: api_key.map(|s| s.to_string()),
            model: "qwen2.5:7b".into(),
            temperature: 0.2,
            max_tokens: 512,
            timeout_secs: 5,
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
    }

    #[tokio::test]
    async fn returns_trimmed_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("  \"வணக்கம்\"\n")))
            .expect(1)
            .mount(&server)
            .await;

        let t = LlmTranslator::from_config(&make_config(&server.uri(), None), "ta");
        assert_eq!(t.translate("Hello", "en").await.unwrap(), "வணக்கம்");
    }

    #[tokio::test]
    async fn sends_bearer_token_when_key_present() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("நன்றி")))
            .expect(1)
            .mount(&server)
            .await;

        let t = LlmTranslator::from_config(&make_config(&server.uri(), Some("sk-test")), "ta");
        assert_eq!(t.translate("Thanks", "en").await.unwrap(), "நன்றி");
    }

    #[tokio::test]
    async fn omits_auth_header_for_empty_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("சரி")))
            .mount(&server)
            .await;

        let t = LlmTranslator::from_config(&make_config(&server.uri(), Some("")), "ta");
        assert_eq!(t.translate("Okay", "en").await.unwrap(), "சரி");
    }

    #[tokio::test]
    async fn http_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let t = LlmTranslator::from_config(&make_config(&server.uri(), None), "ta");
        match t.translate("Hello", "en").await.unwrap_err() {
            TranslateError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_content_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let t = LlmTranslator::from_config(&make_config(&server.uri(), None), "ta");
        assert!(matches!(
            t.translate("Hello", "en").await.unwrap_err(),
            TranslateError::EmptyResponse
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_request_error() {
        // Port 9 (discard) is almost never listening.
        let t = LlmTranslator::from_config(&make_config("http://127.0.0.1:9", None), "ta");
        assert!(t.translate("Hello", "en").await.is_err());
    }

    #[test]
    fn translator_is_object_safe() {
        let t: Box<dyn Translator> =
            Box::new(LlmTranslator::from_config(&LlmConfig::default(), "ta"));
        assert_eq!(t.name(), "llm");
    }
}
