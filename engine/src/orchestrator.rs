//! The verification orchestrator.

use crate::narrative;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{info, warn};
use veridoc_extraction::{ExtractionClient, ExtractionError};
use veridoc_facematch::{FaceMatchClient, FaceMatchError};
use veridoc_matching::FieldMatcher;
use veridoc_types::{
    EngineParams, ExtractedDocumentData, FaceMatchResult, FailureKind, FieldMatch, IdentityField,
    ParamsError, VerificationRequest, VerificationResult,
};

/// Runs one verification attempt end to end.
///
/// Holds no state across calls: one request's outcome depends only on that
/// request's inputs and the configured parameters.
pub struct VerificationOrchestrator {
    extraction: Arc<ExtractionClient>,
    faces: Arc<FaceMatchClient>,
    matcher: FieldMatcher,
    params: EngineParams,
}

impl VerificationOrchestrator {
    /// Build an orchestrator with the strict exact-match policy.
    ///
    /// Fails fast on misconfigured parameters (programmer error, not an
    /// expected failure mode).
    pub fn new(
        extraction: ExtractionClient,
        faces: FaceMatchClient,
        params: EngineParams,
    ) -> Result<Self, ParamsError> {
        Self::with_matcher(extraction, faces, FieldMatcher::exact(), params)
    }

    pub fn with_matcher(
        extraction: ExtractionClient,
        faces: FaceMatchClient,
        matcher: FieldMatcher,
        params: EngineParams,
    ) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            extraction: Arc::new(extraction),
            faces: Arc::new(faces),
            matcher,
            params,
        })
    }

    /// Verify one request.
    ///
    /// Never raises for expected failure modes: channel failures come back
    /// as a rejected [`VerificationResult`] with a populated failure reason.
    pub async fn verify(&self, request: VerificationRequest) -> VerificationResult {
        // Fork: the two channels run as independent tasks against their own
        // image handles. No shared mutable state, no ordering between them.
        let extraction = Arc::clone(&self.extraction);
        let document = request.document_image.clone();
        let extract_task = tokio::spawn(async move { extraction.extract(&document).await });

        let faces = Arc::clone(&self.faces);
        let selfie = request.selfie_image.clone();
        let reference = request.document_image.clone();
        let face_task =
            tokio::spawn(async move { faces.compare_faces(&selfie, &reference).await });

        let extract_abort = extract_task.abort_handle();
        let face_abort = face_task.abort_handle();

        // Join both under the request-level deadline.
        let joined = tokio::time::timeout(
            Duration::from_millis(self.params.request_timeout_ms),
            async { tokio::join!(extract_task, face_task) },
        )
        .await;

        let (extract_outcome, face_outcome) = match joined {
            Ok(pair) => pair,
            Err(_) => {
                // Still-running tasks are cancelled; their clients release
                // engine resources as the futures drop.
                extract_abort.abort();
                face_abort.abort();
                warn!(
                    timeout_ms = self.params.request_timeout_ms,
                    "request deadline elapsed"
                );
                return self.failure(FailureKind::VerificationTimeout);
            }
        };

        // Short-circuit on channel failure. Extraction is checked first so
        // the reported reason does not depend on settlement order; the
        // surviving channel's partial output is discarded rather than
        // aggregated into a misleading score.
        let extracted = match flatten_extraction(extract_outcome) {
            Ok(data) => data,
            Err(kind) => return self.failure(kind),
        };
        let face = match flatten_face(face_outcome) {
            Ok(result) => result,
            Err(kind) => return self.failure(kind),
        };

        self.aggregate(&request, &extracted, face)
    }

    fn aggregate(
        &self,
        request: &VerificationRequest,
        extracted: &ExtractedDocumentData,
        face: FaceMatchResult,
    ) -> VerificationResult {
        let mut matches: Vec<FieldMatch> = Vec::new();
        for field in IdentityField::ALL {
            let Some(submitted) = request.form_value(field) else {
                continue;
            };
            matches.push(
                self.matcher
                    .match_field(field, submitted, extracted.get(field)),
            );
        }

        // A field the document failed to surface counts 0.0 in the mean:
        // evidence against a match, not neutral.
        let field_score = if matches.is_empty() {
            0.0
        } else {
            matches.iter().map(FieldMatch::confidence).sum::<f64>() / matches.len() as f64
        };
        let overall = (field_score + face.similarity()) / 2.0;
        let accepted = overall >= self.params.acceptance_threshold;

        let mut details: Vec<String> = matches.iter().map(narrative::field_detail).collect();
        details.extend(narrative::face_details(&face));
        details.push(narrative::overall_detail(accepted, overall));

        info!(
            policy = self.matcher.policy_name(),
            field_score,
            similarity = face.similarity(),
            overall,
            accepted,
            "verification decided"
        );

        VerificationResult::decided(
            overall,
            self.params.acceptance_threshold,
            matches,
            face,
            details,
        )
    }

    fn failure(&self, kind: FailureKind) -> VerificationResult {
        VerificationResult::failed(kind, narrative::failure_details(kind))
    }
}

fn flatten_extraction(
    outcome: Result<Result<ExtractedDocumentData, ExtractionError>, JoinError>,
) -> Result<ExtractedDocumentData, FailureKind> {
    match outcome {
        Ok(Ok(data)) => Ok(data),
        Ok(Err(ExtractionError::InvalidInput(_))) => Err(FailureKind::InvalidInput),
        Ok(Err(ExtractionError::Timeout(_))) => Err(FailureKind::ExtractionTimeout),
        Ok(Err(ExtractionError::Engine(_))) => Err(FailureKind::ExtractionEngineFailure),
        Err(join_error) => {
            warn!(error = %join_error, "extraction task did not complete");
            Err(FailureKind::ExtractionEngineFailure)
        }
    }
}

fn flatten_face(
    outcome: Result<Result<FaceMatchResult, FaceMatchError>, JoinError>,
) -> Result<FaceMatchResult, FailureKind> {
    match outcome {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(FaceMatchError::InvalidInput(_))) => Err(FailureKind::InvalidInput),
        Ok(Err(FaceMatchError::Timeout(_) | FaceMatchError::Engine(_))) => {
            Err(FailureKind::FaceMatchEngineFailure)
        }
        Err(join_error) => {
            warn!(error = %join_error, "face task did not complete");
            Err(FailureKind::FaceMatchEngineFailure)
        }
    }
}
