//! Axum-based verification service.

use crate::error::RpcError;
use crate::handlers::{HealthResponse, VerifyRequestBody, VerifyResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use veridoc_engine::VerificationOrchestrator;

/// The HTTP server, configured with a port and the orchestrator it fronts.
pub struct RpcServer {
    pub port: u16,
    orchestrator: Arc<VerificationOrchestrator>,
}

impl RpcServer {
    pub fn new(port: u16, orchestrator: VerificationOrchestrator) -> Self {
        Self {
            port,
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Build the router. Split out from [`RpcServer::start`] so tests can
    /// drive it without binding a socket.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/verify", post(verify_handler))
            .route("/health", get(health_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.orchestrator.clone())
    }

    /// Bind and serve until the process is shut down.
    pub async fn start(&self) -> Result<(), RpcError> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| RpcError::Bind {
                addr: addr.clone(),
                source,
            })?;
        info!("verification service listening on {}", addr);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn verify_handler(
    State(orchestrator): State<Arc<VerificationOrchestrator>>,
    Json(body): Json<VerifyRequestBody>,
) -> Response {
    let request = match body.into_request() {
        Ok(request) => request,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response();
        }
    };

    let result = orchestrator.verify(request).await;
    (StatusCode::OK, Json(VerifyResponse::from(result))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use base64::Engine as _;
    use tower::ServiceExt;
    use veridoc_extraction::ExtractionClient;
    use veridoc_facematch::FaceMatchClient;
    use veridoc_nullables::{NullFaceEngine, NullOcrEngine};
    use veridoc_types::EngineParams;

    fn server(ocr_text: &str, similarity: f64) -> RpcServer {
        let params = EngineParams::default();
        let extraction =
            ExtractionClient::new(Arc::new(NullOcrEngine::with_text(ocr_text)), &params);
        let faces = FaceMatchClient::new(
            Arc::new(NullFaceEngine::with_similarity(similarity)),
            &params,
        );
        let orchestrator = VerificationOrchestrator::new(extraction, faces, params).unwrap();
        RpcServer::new(0, orchestrator)
    }

    fn verify_body() -> serde_json::Value {
        let encode = |bytes: &[u8]| base64::engine::general_purpose::STANDARD.encode(bytes);
        serde_json::json!({
            "first_name": "DARRYL",
            "last_name": "KING",
            "date_of_birth": "1990-04-02",
            "gender": "MALE",
            "phone_number": "+233201234567",
            "id_type": "Ghana Card",
            "id_number": "GHA-719879658-0",
            "id_expiry": "",
            "document_image": { "media_type": "image/jpeg", "data": encode(&[1, 2, 3]) },
            "selfie_image": { "media_type": "image/jpeg", "data": encode(&[4, 5, 6]) },
        })
    }

    async fn json_response(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let router = server("", 0.0).router();
        let (status, json) = json_response(
            router,
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn verify_returns_a_decided_result() {
        let router = server("KING\nDARRYL\nGHA-719879658-0\nSex: MALE\n", 0.95).router();
        let request = Request::post("/verify")
            .header("content-type", "application/json")
            .body(Body::from(verify_body().to_string()))
            .unwrap();
        let (status, json) = json_response(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["accepted"], true);
        assert_eq!(json["overall_percent"], "97.5");
        assert!(json["details"].as_array().unwrap().len() > 4);
    }

    #[tokio::test]
    async fn bad_base64_is_a_client_error() {
        let router = server("", 0.0).router();
        let mut body = verify_body();
        body["document_image"]["data"] = serde_json::json!("!!! not base64 !!!");
        let request = Request::post("/verify")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, json) = json_response(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("document_image:"));
    }

    #[tokio::test]
    async fn non_image_media_type_yields_failed_result_not_error() {
        let router = server("irrelevant", 0.9).router();
        let mut body = verify_body();
        body["document_image"]["media_type"] = serde_json::json!("application/pdf");
        let request = Request::post("/verify")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, json) = json_response(router, request).await;

        // The engine converts the invalid input into a rejected result; the
        // HTTP layer still answers 200 with a rendered result.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["accepted"], false);
        assert_eq!(json["failure_reason"], "invalid_input");
    }
}
