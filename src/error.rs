use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Download failed: {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid archive {path}: {message}")]
    Archive { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl FetchError {
    pub fn network<U: Into<String>, M: ToString>(url: U, message: M) -> Self {
        FetchError::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn archive<P: Into<PathBuf>, M: ToString>(path: P, message: M) -> Self {
        FetchError::Archive {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn config_error<S: Into<String>>(message: S) -> Self {
        FetchError::Config {
            message: message.into(),
        }
    }

    /// Network failures are the only ones worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Network { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        let url = error
            .url()
            .map(|url| url.to_string())
            .unwrap_or_default();
        FetchError::network(url, error)
    }
}
