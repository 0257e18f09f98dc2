use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String)
}

impl From<std::io::Error> for SourceError {
    fn from(error: std::io::Error) -> Self {
        SourceError::Unavailable(format!("IO error: {error}"))
    }
}

impl From<JoinError> for SourceError {
    fn from(error: JoinError) -> Self {
        SourceError::Unavailable(format!("Loader task failed: {error}"))
    }
}
