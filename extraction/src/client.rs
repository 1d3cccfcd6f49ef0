//! The document extraction client: validation, deadline, cleanup, parsing.

use crate::engine::OcrEngine;
use crate::error::ExtractionError;
use crate::parser::parse_document_text;
use crate::progress::{MonotonicProgress, NoProgress, ProgressObserver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use veridoc_types::{EngineParams, ExtractedDocumentData, ImageBlob};

/// Extracts structured identity data from a document image.
///
/// Wraps an [`OcrEngine`] with the behavior the engine itself does not
/// provide: media-type validation, a hard deadline, session release on every
/// exit path, and parsing of the recognized text.
pub struct ExtractionClient {
    engine: Arc<dyn OcrEngine>,
    timeout_ms: u64,
    language: String,
}

impl ExtractionClient {
    pub fn new(engine: Arc<dyn OcrEngine>, params: &EngineParams) -> Self {
        Self {
            engine,
            timeout_ms: params.extraction_timeout_ms,
            language: params.extraction_language.clone(),
        }
    }

    /// Extract without progress reporting.
    pub async fn extract(
        &self,
        image: &ImageBlob,
    ) -> Result<ExtractedDocumentData, ExtractionError> {
        self.extract_with_observer(image, &NoProgress).await
    }

    /// Extract, relaying fractional progress to `observer`.
    ///
    /// The deadline race and the recognition are mutually exclusive: whichever
    /// resolves first wins, the loser is dropped, and the engine session is
    /// closed either way.
    pub async fn extract_with_observer(
        &self,
        image: &ImageBlob,
        observer: &dyn ProgressObserver,
    ) -> Result<ExtractedDocumentData, ExtractionError> {
        if !image.is_image() {
            return Err(ExtractionError::InvalidInput(image.media_type().to_string()));
        }

        let mut session = self.engine.start_session(&self.language).await?;
        debug!(language = %self.language, bytes = image.len(), "extraction started");

        let relay = MonotonicProgress::new(observer);
        let outcome = tokio::time::timeout(
            Duration::from_millis(self.timeout_ms),
            session.recognize(image, &relay),
        )
        .await;

        // The session is released on every exit path, winner or loser.
        session.close().await;

        let text = match outcome {
            Err(_) => {
                warn!(timeout_ms = self.timeout_ms, "extraction deadline elapsed");
                return Err(ExtractionError::Timeout(self.timeout_ms));
            }
            Ok(Err(e)) => {
                warn!(error = %e, "extraction engine failed");
                return Err(e);
            }
            Ok(Ok(text)) => text,
        };

        let data = parse_document_text(&text);
        debug!(fields = data.len(), "extraction finished");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OcrSession;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Engine double that records whether its session was closed.
    struct ScriptedEngine {
        text: Option<String>,
        hang: bool,
        closed: Arc<AtomicBool>,
    }

    struct ScriptedSession {
        text: Option<String>,
        hang: bool,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl OcrEngine for ScriptedEngine {
        async fn start_session(
            &self,
            _language: &str,
        ) -> Result<Box<dyn OcrSession>, ExtractionError> {
            Ok(Box::new(ScriptedSession {
                text: self.text.clone(),
                hang: self.hang,
                closed: self.closed.clone(),
            }))
        }
    }

    #[async_trait]
    impl OcrSession for ScriptedSession {
        async fn recognize(
            &mut self,
            _image: &ImageBlob,
            observer: &dyn ProgressObserver,
        ) -> Result<String, ExtractionError> {
            if self.hang {
                std::future::pending::<()>().await;
            }
            observer.on_progress(1.0);
            self.text
                .clone()
                .ok_or_else(|| ExtractionError::Engine("decode error".into()))
        }

        async fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn client(engine: ScriptedEngine, timeout_ms: u64) -> ExtractionClient {
        let params = EngineParams {
            extraction_timeout_ms: timeout_ms,
            ..EngineParams::default()
        };
        ExtractionClient::new(Arc::new(engine), &params)
    }

    fn image() -> ImageBlob {
        ImageBlob::new("image/jpeg", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn successful_extraction_parses_fields() {
        let closed = Arc::new(AtomicBool::new(false));
        let engine = ScriptedEngine {
            text: Some("KING\nDARRYL\nGHA-719879658-0\n".into()),
            hang: false,
            closed: closed.clone(),
        };
        let data = client(engine, 1_000).extract(&image()).await.unwrap();
        assert_eq!(
            data.get(veridoc_types::IdentityField::IdNumber),
            Some("GHA-719879658-0")
        );
        assert!(closed.load(Ordering::SeqCst), "session must be released");
    }

    #[tokio::test]
    async fn non_image_input_rejected_before_engine_runs() {
        let closed = Arc::new(AtomicBool::new(false));
        let engine = ScriptedEngine {
            text: Some("irrelevant".into()),
            hang: false,
            closed: closed.clone(),
        };
        let err = client(engine, 1_000)
            .extract(&ImageBlob::new("application/pdf", vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidInput(_)));
        assert!(!closed.load(Ordering::SeqCst), "no session was started");
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_fires_and_session_still_released() {
        let closed = Arc::new(AtomicBool::new(false));
        let engine = ScriptedEngine {
            text: Some("never returned".into()),
            hang: true,
            closed: closed.clone(),
        };
        let err = client(engine, 50).extract(&image()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Timeout(50)));
        assert!(closed.load(Ordering::SeqCst), "session must be released on timeout");
    }

    #[tokio::test]
    async fn engine_fault_surfaces_and_session_released() {
        let closed = Arc::new(AtomicBool::new(false));
        let engine = ScriptedEngine {
            text: None,
            hang: false,
            closed: closed.clone(),
        };
        let err = client(engine, 1_000).extract(&image()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Engine(_)));
        assert!(closed.load(Ordering::SeqCst));
    }
}
