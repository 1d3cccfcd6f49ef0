use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceMatchError {
    #[error("invalid input: expected an image, got \"{0}\"")]
    InvalidInput(String),

    #[error("face matching timed out after {0} ms")]
    Timeout(u64),

    /// The face capability itself faulted. The message is diagnostic detail
    /// for logs, not for end users.
    #[error("face engine failure: {0}")]
    Engine(String),
}
