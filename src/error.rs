use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsoError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Property list error: {0}")]
    Plist(#[from] plist::Error),
    #[error("Invalid country code: {0}")]
    InvalidCountry(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AsoError>;
