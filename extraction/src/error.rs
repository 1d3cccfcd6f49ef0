use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid input: expected an image, got \"{0}\"")]
    InvalidInput(String),

    #[error("document extraction timed out after {0} ms")]
    Timeout(u64),

    /// The OCR capability itself faulted. The message is diagnostic detail
    /// for logs, not for end users.
    #[error("extraction engine failure: {0}")]
    Engine(String),
}
