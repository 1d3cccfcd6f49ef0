//! Nullable OCR engine — scripted recognition for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use veridoc_extraction::{ExtractionError, OcrEngine, OcrSession, ProgressObserver};
use veridoc_types::ImageBlob;

#[derive(Clone)]
enum Script {
    Text(String),
    Fail(String),
    Hang,
}

/// A deterministic OCR engine.
///
/// Recognition returns the scripted text (or failure) immediately; the
/// hanging variant never resolves, which lets timeout paths be tested with
/// a paused clock. Sessions count their releases so tests can assert the
/// cleanup discipline.
pub struct NullOcrEngine {
    script: Script,
    progress_steps: Vec<f64>,
    closed_sessions: Arc<AtomicUsize>,
}

impl NullOcrEngine {
    /// Engine that recognizes the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(Script::Text(text.into()))
    }

    /// Engine whose recognition fails with the given diagnostic.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Script::Fail(message.into()))
    }

    /// Engine whose recognition never resolves.
    pub fn hanging() -> Self {
        Self::new(Script::Hang)
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            progress_steps: vec![0.25, 0.5, 1.0],
            closed_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many sessions have been released so far.
    pub fn closed_sessions(&self) -> usize {
        self.closed_sessions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for NullOcrEngine {
    async fn start_session(
        &self,
        _language: &str,
    ) -> Result<Box<dyn OcrSession>, ExtractionError> {
        Ok(Box::new(NullOcrSession {
            script: self.script.clone(),
            progress_steps: self.progress_steps.clone(),
            closed_sessions: self.closed_sessions.clone(),
        }))
    }
}

struct NullOcrSession {
    script: Script,
    progress_steps: Vec<f64>,
    closed_sessions: Arc<AtomicUsize>,
}

#[async_trait]
impl OcrSession for NullOcrSession {
    async fn recognize(
        &mut self,
        _image: &ImageBlob,
        observer: &dyn ProgressObserver,
    ) -> Result<String, ExtractionError> {
        match &self.script {
            Script::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
            Script::Fail(message) => Err(ExtractionError::Engine(message.clone())),
            Script::Text(text) => {
                for step in &self.progress_steps {
                    observer.on_progress(*step);
                }
                Ok(text.clone())
            }
        }
    }

    async fn close(&mut self) {
        self.closed_sessions.fetch_add(1, Ordering::SeqCst);
    }
}
