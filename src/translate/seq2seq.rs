//! Sequence-to-sequence model backend (NLLB-200 / IndicTrans2).
//!
//! The model runs in a separate inference server; this backend only speaks
//! its JSON interface:
//!
//! ```text
//! POST {base_url}/translate
//! { "text": "...", "src_lang": "eng_Latn", "tgt_lang": "tam_Taml",
//!   "model": "...", "max_length": 400, "num_beams": 4 }
//! → { "translation": "..." }
//! ```
//!
//! Both model families use FLORES-200 language codes, produced by
//! [`nllb_code`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Seq2SeqConfig;
use crate::text::detect::UNDETERMINED;
use crate::translate::{check_status, TranslateError, Translator};

/// Source code assumed when detection failed.
const DEFAULT_SOURCE: &str = "eng_Latn";

/// Map an ISO-639-1 code to its FLORES-200 code.
///
/// ```
/// use tamil_translator::translate::nllb_code;
///
/// assert_eq!(nllb_code("ta"), Some("tam_Taml"));
/// assert_eq!(nllb_code("xx"), None);
/// ```
pub fn nllb_code(iso: &str) -> Option<&'static str> {
    let code = match iso {
        "en" => "eng_Latn",
        "ta" => "tam_Taml",
        "hi" => "hin_Deva",
        "te" => "tel_Telu",
        "kn" => "kan_Knda",
        "ml" => "mal_Mlym",
        "bn" => "ben_Beng",
        "mr" => "mar_Deva",
        "gu" => "guj_Gujr",
        "pa" => "pan_Guru",
        "ur" => "urd_Arab",
        "or" => "ory_Orya",
        "si" => "sin_Sinh",
        "ne" => "npi_Deva",
        "fr" => "fra_Latn",
        "de" => "deu_Latn",
        "es" => "spa_Latn",
        "it" => "ita_Latn",
        "pt" => "por_Latn",
        "nl" => "nld_Latn",
        "ru" => "rus_Cyrl",
        "uk" => "ukr_Cyrl",
        "pl" => "pol_Latn",
        "tr" => "tur_Latn",
        "ar" => "arb_Arab",
        "fa" => "pes_Arab",
        "he" => "heb_Hebr",
        "el" => "ell_Grek",
        "sv" => "swe_Latn",
        "zh" => "zho_Hans",
        "ja" => "jpn_Jpan",
        "ko" => "kor_Hang",
        "vi" => "vie_Latn",
        "th" => "tha_Thai",
        "id" => "ind_Latn",
        _ => return None,
    };
    Some(code)
}

#[derive(Debug, Serialize)]
struct Seq2SeqRequest<'a> {
    text: &'a str,
    src_lang: &'a str,
    tgt_lang: &'a str,
    model: &'a str,
    max_length: u32,
    num_beams: u32,
}

#[derive(Debug, Deserialize)]
struct Seq2SeqResponse {
    translation: String,
}

/// Translates through a locally served NLLB / IndicTrans2 model.
pub struct Seq2SeqTranslator {
    client: reqwest::Client,
    config: Seq2SeqConfig,
    target_language: String,
}

impl Seq2SeqTranslator {
    pub fn from_config(config: &Seq2SeqConfig, target_language: &str) -> Self {
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

    fn source_code(source_lang: &str) -> Result<&'static str, TranslateError> {
        if source_lang.is_empty() || source_lang == UNDETERMINED {
            log::warn!("seq2seq: source language undetermined, assuming {DEFAULT_SOURCE}");
            return Ok(DEFAULT_SOURCE);
        }
        nllb_code(source_lang).ok_or_else(|| TranslateError::Unsupported(source_lang.to_string()))
    }
}

#[async_trait]
impl Translator for Seq2SeqTranslator {
    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError> {
        let src_lang = Self::source_code(source_lang)?;
        let tgt_lang = nllb_code(&self.target_language)
            .ok_or_else(|| TranslateError::Unsupported(self.target_language.clone()))?;

        let url = format!("{}/translate", self.config.base_url.trim_end_matches('/'));
        let body = Seq2SeqRequest {
            text,
            src_lang,
            tgt_lang,
            model: &self.config.model,
            max_length: self.config.max_length,
            num_beams: self.config.num_beams,
        };

        let response = check_status(self.client.post(&url).json(&body).send().await?).await?;
        let parsed: Seq2SeqResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        let translated = parsed.translation.trim();
        if translated.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }
        Ok(translated.to_string())
    }

    fn name(&self) -> &str {
        "seq2seq"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator(base_url: &str) -> Seq2SeqTranslator {
        let config = Seq2SeqConfig {
            base_url: base_url.into(),
            timeout_secs: 5,
            ..Seq2SeqConfig::default()
        };
        Seq2SeqTranslator::from_config(&config, "ta")
    }

    #[test]
    fn maps_indic_codes() {
        assert_eq!(nllb_code("hi"), Some("hin_Deva"));
        assert_eq!(nllb_code("ml"), Some("mal_Mlym"));
        assert_eq!(nllb_code("en"), Some("eng_Latn"));
    }

    #[tokio::test]
    async fn posts_flores_codes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_partial_json(json!({
                "src_lang": "hin_Deva",
                "tgt_lang": "tam_Taml",
                "num_beams": 4
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "translation": " நான் வீட்டுக்குப் போகிறேன் " })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let out = translator(&server.uri())
            .translate("मैं घर जा रहा हूँ", "hi")
            .await
            .unwrap();
        assert_eq!(out, "நான் வீட்டுக்குப் போகிறேன்");
    }

    #[tokio::test]
    async fn undetermined_source_defaults_to_english() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "src_lang": "eng_Latn" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translation": "சரி" })))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(translator(&server.uri()).translate("ok", "und").await.unwrap(), "சரி");
    }

    #[tokio::test]
    async fn unknown_source_is_unsupported_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = translator(&server.uri()).translate("...", "xx").await.unwrap_err();
        assert!(matches!(err, TranslateError::Unsupported(code) if code == "xx"));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "x" })))
            .mount(&server)
            .await;

        let err = translator(&server.uri()).translate("hello", "en").await.unwrap_err();
        assert!(matches!(err, TranslateError::Parse(_)));
    }
}
