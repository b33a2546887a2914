//! Source-language detection.
//!
//! Wraps `whatlang`, which reports ISO-639-3 codes; the rest of the crate
//! (translation APIs, NLLB code mapping) works with ISO-639-1, so the common
//! languages are mapped down here.

use serde::{Deserialize, Serialize};

/// Code reported when no language could be detected.
pub const UNDETERMINED: &str = "und";

/// Result of language detection on the input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    /// ISO-639-1 code when one exists, otherwise the ISO-639-3 code, or
    /// `"und"`.
    pub code: String,
    /// English name of the language (`"Unknown"` when undetermined).
    pub name: String,
    /// Detector confidence, 0.0 – 1.0.
    pub confidence: f64,
    /// Whether the detector considers the guess reliable.
    pub reliable: bool,
}

impl DetectedLanguage {
    pub fn undetermined() -> Self {
        Self {
            code: UNDETERMINED.into(),
            name: "Unknown".into(),
            confidence: 0.0,
            reliable: false,
        }
    }

    pub fn is_undetermined(&self) -> bool {
        self.code == UNDETERMINED
    }
}

/// Detect the dominant language of `text`.
///
/// Never fails: empty or undetectable input yields
/// [`DetectedLanguage::undetermined`].
pub fn detect_language(text: &str) -> DetectedLanguage {
    match whatlang::detect(text) {
        Some(info) => {
            let lang = info.lang();
            let code = iso639_1(lang.code()).unwrap_or(lang.code());
            DetectedLanguage {
                code: code.to_string(),
                name: lang.eng_name().to_string(),
                confidence: info.confidence(),
                reliable: info.is_reliable(),
            }
        }
        None => DetectedLanguage::undetermined(),
    }
}

/// Map an ISO-639-3 code to ISO-639-1 for the languages we expect to see.
fn iso639_1(code3: &str) -> Option<&'static str> {
    let code = match code3 {
        "eng" => "en",
        "tam" => "ta",
        "hin" => "hi",
        "tel" => "te",
        "kan" => "kn",
        "mal" => "ml",
        "ben" => "bn",
        "mar" => "mr",
        "guj" => "gu",
        "pan" => "pa",
        "urd" => "ur",
        "ori" => "or",
        "sin" => "si",
        "nep" => "ne",
        "spa" => "es",
        "fra" => "fr",
        "deu" => "de",
        "ita" => "it",
        "por" => "pt",
        "nld" => "nl",
        "rus" => "ru",
        "ukr" => "uk",
        "pol" => "pl",
        "tur" => "tr",
        "ara" => "ar",
        "pes" => "fa",
        "heb" => "he",
        "ell" => "el",
        "swe" => "sv",
        "cmn" => "zh",
        "jpn" => "ja",
        "kor" => "ko",
        "vie" => "vi",
        "tha" => "th",
        "ind" => "id",
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english() {
        let d = detect_language(
            "The weather is lovely today and we are planning to walk along the river \
             before dinner with all of our friends.",
        );
        assert_eq!(d.code, "en");
        assert_eq!(d.name, "English");
        assert!(d.confidence > 0.0);
    }

    #[test]
    fn detects_tamil_script() {
        let d = detect_language("நான் இன்று காலை பள்ளிக்கு சென்றேன், அங்கே என் நண்பர்களை சந்தித்தேன்.");
        assert_eq!(d.code, "ta");
    }

    #[test]
    fn empty_is_undetermined() {
        let d = detect_language("");
        assert!(d.is_undetermined());
        assert_eq!(d.confidence, 0.0);
    }

    #[test]
    fn unmapped_code_passes_through() {
        assert_eq!(iso639_1("xyz"), None);
        assert_eq!(iso639_1("cmn"), Some("zh"));
    }
}
