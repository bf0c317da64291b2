use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpaceError>;

#[derive(Debug, Error)]
pub enum SpaceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid key sequence: {0:?}")]
    InvalidKeySequence(String),
    #[error("Invalid screen edge: {0:?}")]
    InvalidEdge(String),
    #[error("Config store error: {0}")]
    Store(String),
}
