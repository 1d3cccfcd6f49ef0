//! The opaque face-similarity capability seam.

use crate::error::FaceMatchError;
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use veridoc_types::{FaceMatchResult, ImageBlob};

/// An external facial-similarity capability.
///
/// Compares a live selfie against the document's portrait and reports a
/// similarity in [0, 1] plus whether its liveness check passed.
#[async_trait]
pub trait FaceEngine: Send + Sync {
    async fn compare(
        &self,
        selfie: &ImageBlob,
        reference: &ImageBlob,
    ) -> Result<FaceMatchResult, FaceMatchError>;
}

// ── HTTP adapter ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct CompareRequest<'a> {
    selfie_media_type: &'a str,
    selfie: String,
    reference_media_type: &'a str,
    reference: String,
}

#[derive(Deserialize)]
struct CompareResponse {
    success: bool,
    #[serde(default)]
    similarity: Option<f64>,
    #[serde(default)]
    liveness_passed: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

/// Face comparison over HTTP: posts both images (base64) to a similarity
/// service.
pub struct HttpFaceEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFaceEngine {
    /// `endpoint` is the full URL of the service's compare route.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FaceEngine for HttpFaceEngine {
    async fn compare(
        &self,
        selfie: &ImageBlob,
        reference: &ImageBlob,
    ) -> Result<FaceMatchResult, FaceMatchError> {
        let encoder = &base64::engine::general_purpose::STANDARD;
        let body = CompareRequest {
            selfie_media_type: selfie.media_type(),
            selfie: encoder.encode(selfie.bytes()),
            reference_media_type: reference.media_type(),
            reference: encoder.encode(reference.bytes()),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| FaceMatchError::Engine(format!("compare request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FaceMatchError::Engine(format!(
                "compare service returned {status}"
            )));
        }

        let parsed: CompareResponse = response
            .json()
            .await
            .map_err(|e| FaceMatchError::Engine(format!("malformed compare response: {e}")))?;

        if !parsed.success {
            return Err(FaceMatchError::Engine(
                parsed.error.unwrap_or_else(|| "unspecified engine error".into()),
            ));
        }

        let similarity = parsed.similarity.ok_or_else(|| {
            FaceMatchError::Engine("compare response carried no similarity".into())
        })?;
        Ok(FaceMatchResult::new(
            similarity,
            parsed.liveness_passed.unwrap_or(false),
        ))
    }
}
