use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoverError {
    #[error("backend call failed: {0}")]
    Service(String),

    #[error("config error: {0}")]
    Config(String),
}
