use thiserror::Error;

#[derive(Error, Debug)]
pub enum BbprError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote fault, carrying the Bitbucket-provided message when the
    /// response body had one and the transport error text otherwise.
    #[error("{0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BbprError>;
