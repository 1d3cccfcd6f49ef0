use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("acceptance threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}
