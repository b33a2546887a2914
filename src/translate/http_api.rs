//! Public HTTP translation API backend.
//!
//! Speaks the `translate_a/single?client=gtx` format: a GET with the text in
//! the query string, answered by nested JSON arrays whose first element lists
//! `[translated, original, …]` segments.

use async_trait::async_trait;

use crate::config::HttpApiConfig;
use crate::text::detect::UNDETERMINED;
use crate::translate::{check_status, TranslateError, Translator};

/// Translates through a public HTTP translation endpoint.
pub struct HttpApiTranslator {
    client: reqwest::Client,
    config: HttpApiConfig,
    target_language: String,
}

impl HttpApiTranslator {
    pub fn from_config(config: &HttpApiConfig, target_language: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            target_language: target_language.to_string(),
        }
    }
}

/// Concatenate the translated segments of a `gtx` response.
pub fn parse_gtx_response(json: &serde_json::Value) -> Result<String, TranslateError> {
    let segments = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslateError::Parse("missing segment list".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(|s| s.as_str()))
        .collect();

    let translated = translated.trim();
    if translated.is_empty() {
        return Err(TranslateError::EmptyResponse);
    }
    Ok(translated.to_string())
}

#[async_trait]
impl Translator for HttpApiTranslator {
    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError> {
        let url = format!(
            "{}/translate_a/single",
            self.config.base_url.trim_end_matches('/')
        );
        let source = if source_lang.is_empty() || source_lang == UNDETERMINED {
            "auto"
        } else {
            source_lang
        };

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", self.target_language.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;
        let response = check_status(response).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        parse_gtx_response(&json)
    }

    fn name(&self) -> &str {
        "translation-api"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
