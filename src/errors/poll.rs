use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("poll timed out after {0:?}")]
    Timeout(Duration),

    #[error("device unreachable: {0}")]
    Unreachable(String),

    #[error("transport failure: {0}")]
    Transport(String),
}
