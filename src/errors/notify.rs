#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification endpoint rejected message: {0}")]
    Rejected(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
