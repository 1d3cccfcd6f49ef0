//! Nullable face engine — scripted similarity for testing.

use async_trait::async_trait;
use veridoc_facematch::{FaceEngine, FaceMatchError};
use veridoc_types::{FaceMatchResult, ImageBlob};

#[derive(Clone)]
enum Script {
    Result(FaceMatchResult),
    Fail(String),
    Hang,
}

/// A deterministic face engine.
pub struct NullFaceEngine {
    script: Script,
}

impl NullFaceEngine {
    /// Engine that reports the given similarity with liveness passed.
    pub fn with_similarity(similarity: f64) -> Self {
        Self {
            script: Script::Result(FaceMatchResult::new(similarity, true)),
        }
    }

    /// Engine that reports a full scripted result.
    pub fn with_result(result: FaceMatchResult) -> Self {
        Self {
            script: Script::Result(result),
        }
    }

    /// Engine whose comparison fails with the given diagnostic.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
        }
    }

    /// Engine whose comparison never resolves.
    pub fn hanging() -> Self {
        Self { script: Script::Hang }
    }
}

#[async_trait]
impl FaceEngine for NullFaceEngine {
    async fn compare(
        &self,
        _selfie: &ImageBlob,
        _reference: &ImageBlob,
    ) -> Result<FaceMatchResult, FaceMatchError> {
        match &self.script {
            Script::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
            Script::Fail(message) => Err(FaceMatchError::Engine(message.clone())),
            Script::Result(result) => Ok(*result),
        }
    }
}
