//! Fallback translator: tries a primary backend, then a secondary one.
//!
//! Network backends fail for mundane reasons (no connectivity, rate limits,
//! a model server that is not running).  Wrapping one in a
//! [`FallbackTranslator`] with the offline dictionary as secondary keeps the
//! form usable; the chunk that failed is retried on the secondary and the
//! primary error is logged.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::translate::{TranslateError, Translator};

/// Primary translator with a secondary used when the primary errors.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use tamil_translator::config::HttpApiConfig;
/// use tamil_translator::translate::{DictionaryTranslator, FallbackTranslator, HttpApiTranslator};
///
/// let primary = Arc::new(HttpApiTranslator::from_config(&HttpApiConfig::default(), "ta"));
/// let translator = FallbackTranslator::new(primary, Arc::new(DictionaryTranslator::new()));
/// ```
pub struct FallbackTranslator {
    primary: Arc<dyn Translator>,
    fallback: Arc<dyn Translator>,
    label: String,
    /// Set when the most recent chunk was served by `fallback`.
    used_fallback: AtomicBool,
}

impl FallbackTranslator {
    pub fn new(primary: Arc<dyn Translator>, fallback: Arc<dyn Translator>) -> Self {
        let label = format!("{} (fallback: {})", primary.name(), fallback.name());
        Self {
            primary,
            fallback,
            label,
            used_fallback: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Translator for FallbackTranslator {
    async fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError> {
        match self.primary.translate(text, source_lang).await {
            Ok(translated) => {
                self.used_fallback.store(false, Ordering::Relaxed);
                Ok(translated)
            }
            Err(err) => {
                log::warn!(
                    "translate: {} failed ({err}); retrying chunk with {}",
                    self.primary.name(),
                    self.fallback.name()
                );
                self.used_fallback.store(true, Ordering::Relaxed);
                self.fallback.translate(text, source_lang).await
            }
        }
    }

    fn name(&self) -> &str {
        &self.label
    }

    /// Separator of whichever backend produced the last chunk.
    fn chunk_separator(&self) -> &str {
        if self.used_fallback.load(Ordering::Relaxed) {
            self.fallback.chunk_separator()
        } else {
            self.primary.chunk_separator()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::DictionaryTranslator;

    /// Always succeeds with a fixed string.
    struct AlwaysOk(String);

    #[async_trait]
    impl Translator for AlwaysOk {
        async fn translate(&self, _text: &str, _src: &str) -> Result<String, TranslateError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "ok"
        }
    }

    /// Always returns the given error.
    struct AlwaysFails(ErrorKind);

    enum ErrorKind {
        Request,
        Timeout,
        Status,
        Parse,
        Empty,
    }

    #[async_trait]
    impl Translator for AlwaysFails {
        async fn translate(&self, _text: &str, _src: &str) -> Result<String, TranslateError> {
            let err = match self.0 {
                ErrorKind::Request => TranslateError::Request("connection refused".into()),
                ErrorKind::Timeout => TranslateError::Timeout,
                ErrorKind::Status => TranslateError::Status {
                    status: 503,
                    body: String::new(),
                },
                ErrorKind::Parse => TranslateError::Parse("bad json".into()),
                ErrorKind::Empty => TranslateError::EmptyResponse,
            };
            Err(err)
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[tokio::test]
    async fn primary_success_passes_through() {
        let t = FallbackTranslator::new(
            Arc::new(AlwaysOk("முதன்மை".into())),
            Arc::new(AlwaysOk("மாற்று".into())),
        );
        assert_eq!(t.translate("x", "en").await.unwrap(), "முதன்மை");
    }

    #[tokio::test]
    async fn every_primary_error_uses_fallback() {
        for kind in [
            ErrorKind::Request,
            ErrorKind::Timeout,
            ErrorKind::Status,
            ErrorKind::Parse,
            ErrorKind::Empty,
        ] {
            let t = FallbackTranslator::new(
                Arc::new(AlwaysFails(kind)),
                Arc::new(DictionaryTranslator::new()),
            );
            assert_eq!(t.translate("thank you", "en").await.unwrap(), "நன்றி நீங்கள்");
        }
    }

    #[tokio::test]
    async fn both_failing_returns_fallback_error() {
        let t = FallbackTranslator::new(
            Arc::new(AlwaysFails(ErrorKind::Request)),
            Arc::new(AlwaysFails(ErrorKind::Timeout)),
        );
        assert!(matches!(
            t.translate("x", "en").await.unwrap_err(),
            TranslateError::Timeout
        ));
    }

    #[test]
    fn name_mentions_both_backends() {
        let t = FallbackTranslator::new(
            Arc::new(AlwaysOk(String::new())),
            Arc::new(DictionaryTranslator::new()),
        );
        assert_eq!(t.name(), "ok (fallback: dictionary)");
    }

    #[tokio::test]
    async fn separator_follows_the_backend_that_answered() {
        let t = FallbackTranslator::new(
            Arc::new(AlwaysOk("சரி".into())),
            Arc::new(DictionaryTranslator::new()),
        );
        assert_eq!(t.chunk_separator(), " ");

        let t = FallbackTranslator::new(
            Arc::new(AlwaysFails(ErrorKind::Timeout)),
            Arc::new(DictionaryTranslator::new()),
        );
        t.translate("thank you", "en").await.unwrap();
        assert_eq!(t.chunk_separator(), "। ");
    }
}
