//! Request and response bodies for the verification endpoint.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use veridoc_types::{ImageBlob, VerificationRequest, VerificationResult};

/// An image in a JSON body: declared media type plus base64 payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImagePayload {
    pub media_type: String,
    /// Standard base64 (RFC 4648) of the raw bytes.
    pub data: String,
}

impl ImagePayload {
    fn decode(&self, field: &str) -> Result<ImageBlob, String> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| format!("{field}: invalid base64 image data: {e}"))?;
        Ok(ImageBlob::new(self.media_type.clone(), bytes))
    }
}

/// `POST /verify` request body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyRequestBody {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub landmark: String,
    #[serde(default)]
    pub digital_address: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub area: String,
    pub id_type: String,
    pub id_number: String,
    pub id_expiry: String,
    #[serde(default)]
    pub nationality: Option<String>,
    pub document_image: ImagePayload,
    pub selfie_image: ImagePayload,
}

impl VerifyRequestBody {
    /// Decode the image payloads and assemble the engine request.
    pub fn into_request(self) -> Result<VerificationRequest, String> {
        let document_image = self.document_image.decode("document_image")?;
        let selfie_image = self.selfie_image.decode("selfie_image")?;
        Ok(VerificationRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            phone_number: self.phone_number,
            address: self.address,
            landmark: self.landmark,
            digital_address: self.digital_address,
            region: self.region,
            city: self.city,
            area: self.area,
            id_type: self.id_type,
            id_number: self.id_number,
            id_expiry: self.id_expiry,
            nationality: self.nationality,
            document_image,
            selfie_image,
        })
    }
}

/// `POST /verify` response body: the result plus its display percentage.
#[derive(Serialize)]
pub struct VerifyResponse {
    #[serde(flatten)]
    pub result: VerificationResult,
    /// `overall_confidence * 100` rendered with one decimal place.
    pub overall_percent: String,
}

impl From<VerificationResult> for VerifyResponse {
    fn from(result: VerificationResult) -> Self {
        let overall_percent = result.overall_percent();
        Self {
            result,
            overall_percent,
        }
    }
}

/// `GET /health` response body.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> VerifyRequestBody {
        let encode =
            |bytes: &[u8]| base64::engine::general_purpose::STANDARD.encode(bytes);
        VerifyRequestBody {
            first_name: "DARRYL".into(),
            last_name: "KING".into(),
            date_of_birth: "1990-04-02".into(),
            gender: "MALE".into(),
            phone_number: "+233201234567".into(),
            address: String::new(),
            landmark: String::new(),
            digital_address: String::new(),
            region: String::new(),
            city: String::new(),
            area: String::new(),
            id_type: "Ghana Card".into(),
            id_number: "GHA-719879658-0".into(),
            id_expiry: "2030-01-15".into(),
            nationality: None,
            document_image: ImagePayload {
                media_type: "image/jpeg".into(),
                data: encode(&[1, 2, 3]),
            },
            selfie_image: ImagePayload {
                media_type: "image/png".into(),
                data: encode(&[4, 5, 6]),
            },
        }
    }

    #[test]
    fn images_decode_into_the_request() {
        let request = body().into_request().unwrap();
        assert_eq!(request.document_image.bytes(), &[1, 2, 3]);
        assert_eq!(request.document_image.media_type(), "image/jpeg");
        assert_eq!(request.selfie_image.bytes(), &[4, 5, 6]);
    }

    #[test]
    fn bad_base64_names_the_offending_field() {
        let mut b = body();
        b.selfie_image.data = "not base64!!!".into();
        let err = b.into_request().unwrap_err();
        assert!(err.starts_with("selfie_image:"), "{err}");
    }

    #[test]
    fn response_carries_percent_and_flattened_result() {
        let result = VerificationResult::failed(
            veridoc_types::FailureKind::ExtractionTimeout,
            vec!["Reading the document took too long".into()],
        );
        let response = VerifyResponse::from(result);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accepted"], false);
        assert_eq!(json["overall_percent"], "0.0");
        assert_eq!(json["failure_reason"], "extraction_timeout");
    }
}
