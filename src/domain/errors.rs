use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("text required")]
    MissingText,
    #[error("no recipients")]
    NoRecipients,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
