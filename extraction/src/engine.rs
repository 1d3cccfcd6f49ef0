//! The opaque OCR capability seam.

use crate::error::ExtractionError;
use crate::progress::ProgressObserver;
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use veridoc_types::ImageBlob;

/// An external OCR capability.
///
/// Implementations might wrap a local recognition library, a sidecar
/// process, or a remote service; the client does not care. Engines hand out
/// sessions so that whatever per-recognition resource exists (worker,
/// process, connection) has an explicit release point.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Acquire a recognition session primed for the given language.
    async fn start_session(
        &self,
        language: &str,
    ) -> Result<Box<dyn OcrSession>, ExtractionError>;
}

/// One recognition session. Must be closed on every exit path; the client
/// guarantees `close` runs whether recognition succeeded, faulted, or lost
/// the deadline race.
#[async_trait]
pub trait OcrSession: Send {
    /// Run recognition, reporting fractional progress to `observer`.
    async fn recognize(
        &mut self,
        image: &ImageBlob,
        observer: &dyn ProgressObserver,
    ) -> Result<String, ExtractionError>;

    /// Release the underlying engine resource.
    async fn close(&mut self);
}

// ── HTTP adapter ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    language: &'a str,
    media_type: &'a str,
    image: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    success: bool,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OCR over HTTP: posts the image (base64) to a recognition service.
pub struct HttpOcrEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOcrEngine {
    /// `endpoint` is the full URL of the service's recognize route.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl OcrEngine for HttpOcrEngine {
    async fn start_session(
        &self,
        language: &str,
    ) -> Result<Box<dyn OcrSession>, ExtractionError> {
        Ok(Box::new(HttpOcrSession {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            language: language.to_string(),
        }))
    }
}

struct HttpOcrSession {
    client: reqwest::Client,
    endpoint: String,
    language: String,
}

#[async_trait]
impl OcrSession for HttpOcrSession {
    async fn recognize(
        &mut self,
        image: &ImageBlob,
        observer: &dyn ProgressObserver,
    ) -> Result<String, ExtractionError> {
        observer.on_progress(0.0);

        let body = RecognizeRequest {
            language: &self.language,
            media_type: image.media_type(),
            image: base64::engine::general_purpose::STANDARD.encode(image.bytes()),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::Engine(format!("recognize request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Engine(format!(
                "recognize service returned {status}"
            )));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Engine(format!("malformed recognize response: {e}")))?;

        if !parsed.success {
            return Err(ExtractionError::Engine(
                parsed.error.unwrap_or_else(|| "unspecified engine error".into()),
            ));
        }

        observer.on_progress(1.0);
        parsed
            .text
            .ok_or_else(|| ExtractionError::Engine("recognize response carried no text".into()))
    }

    async fn close(&mut self) {
        // HTTP sessions hold no engine-side resource.
    }
}
