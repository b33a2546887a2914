//! Prompt builder for LLM-based translation into Tamil.
//!
//! [`PromptBuilder`] produces a `(system_msg, user_msg)` pair for any
//! OpenAI-compatible `/v1/chat/completions` endpoint.  The system message
//! fixes the target language and register; the user message carries
//! few-shot examples, the detected source language (when known) and the
//! chunk to translate.

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION: &str = "\
You are a professional translator into {target}.
Task: Translate the user's text into natural, everyday spoken {target}.

Rules:
1. Preserve the full meaning; do not summarise or add information.
2. Prefer common spoken vocabulary over literary or archaic forms.
3. Keep names, numbers, URLs and technical terms as they are.
4. Keep the sentence order and paragraph breaks of the input.
5. Reply with ONLY the translation, no explanation, no transliteration.";

// ---------------------------------------------------------------------------
// Few-shot examples
// ---------------------------------------------------------------------------

const FEW_SHOT_EXAMPLES_TA: &str = "
Examples:
Input: \"Good morning! How are you?\"
Output: \"காலை வணக்கம்! எப்படி இருக்கீங்க?\"

Input: \"The meeting has been moved to 4 PM tomorrow.\"
Output: \"மீட்டிங் நாளை மாலை 4 மணிக்கு மாற்றப்பட்டுள்ளது.\"

Input: \"मैं कल चेन्नई जा रहा हूँ।\"
Output: \"நான் நாளைக்கு சென்னைக்குப் போகிறேன்.\"
";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds translation prompts in chat-message format.
///
/// # Example
/// ```rust
/// use tamil_translator::translate::PromptBuilder;
///
/// let builder = PromptBuilder::new("ta");
/// let (system, user) = builder.build_chat("Good night", Some("en"));
/// assert!(system.contains("Tamil"));
/// assert!(user.contains("Good night"));
/// ```
pub struct PromptBuilder {
    target_language: String,
}

impl PromptBuilder {
    /// Create a builder for the given ISO-639-1 target language.
    ///
    /// Tamil (`"ta"`) gets dedicated few-shot examples; other targets get
    /// the bare instruction.
    pub fn new(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
        }
    }

    /// Build a **(system_msg, user_msg)** pair.
    ///
    /// * `source_lang`: ISO code of the detected source language, or
    ///   `None` to let the model work it out.
    pub fn build_chat(&self, text: &str, source_lang: Option<&str>) -> (String, String) {
        let system_msg = SYSTEM_INSTRUCTION.replace("{target}", self.target_name());

        let mut user_msg = String::with_capacity(text.len() + 512);
        if self.target_language == "ta" {
            user_msg.push_str(FEW_SHOT_EXAMPLES_TA);
        }
        if let Some(source) = source_lang {
            user_msg.push_str(&format!("\nSource language: {source}\n"));
        }
        user_msg.push_str(&format!(
            "\nText to translate:\n{}\n\nTranslation:\n",
            text
        ));

        (system_msg, user_msg)
    }

    fn target_name(&self) -> &str {
        match self.target_language.as_str() {
            "ta" => "Tamil",
            "hi" => "Hindi",
            "te" => "Telugu",
            "ml" => "Malayalam",
            "kn" => "Kannada",
            "en" => "English",
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
