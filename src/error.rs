use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Could not read config file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in config file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything that can go wrong between the first portal request and the
/// decoded usage body. Login rejection is reported here alongside transport
/// failures so callers only ever see one error channel.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Login failed")]
    LoginRejected { ret_code: Option<String> },

    #[error("{0}")]
    Transport(#[from] ureq::Error),

    #[error("{0}")]
    Protocol(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Protocol(err.to_string())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("usage record is missing '{0}'")]
    MissingField(&'static str),
}
