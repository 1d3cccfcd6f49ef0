//! The face match client: validation and deadline around the capability.

use crate::engine::FaceEngine;
use crate::error::FaceMatchError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use veridoc_types::{EngineParams, FaceMatchResult, ImageBlob};

/// Scores facial similarity between a selfie and a document portrait.
pub struct FaceMatchClient {
    engine: Arc<dyn FaceEngine>,
    timeout_ms: u64,
}

impl FaceMatchClient {
    pub fn new(engine: Arc<dyn FaceEngine>, params: &EngineParams) -> Self {
        Self {
            engine,
            timeout_ms: params.face_timeout_ms,
        }
    }

    /// Compare the selfie against the document portrait.
    ///
    /// Both inputs must declare an image media type. The deadline mirrors
    /// the extraction deadline and only bounds a hung capability.
    pub async fn compare_faces(
        &self,
        selfie: &ImageBlob,
        reference: &ImageBlob,
    ) -> Result<FaceMatchResult, FaceMatchError> {
        for blob in [selfie, reference] {
            if !blob.is_image() {
                return Err(FaceMatchError::InvalidInput(blob.media_type().to_string()));
            }
        }

        debug!(
            selfie_bytes = selfie.len(),
            reference_bytes = reference.len(),
            "face comparison started"
        );

        let outcome = tokio::time::timeout(
            Duration::from_millis(self.timeout_ms),
            self.engine.compare(selfie, reference),
        )
        .await;

        match outcome {
            Err(_) => {
                warn!(timeout_ms = self.timeout_ms, "face comparison deadline elapsed");
                Err(FaceMatchError::Timeout(self.timeout_ms))
            }
            Ok(Err(e)) => {
                warn!(error = %e, "face engine failed");
                Err(e)
            }
            Ok(Ok(result)) => {
                debug!(similarity = result.similarity(), "face comparison finished");
                Ok(result)
            }
        }
    }
}
