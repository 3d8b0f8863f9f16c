use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    StatusError { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },

    #[error("Pagination error: {message}")]
    PaginationError { message: String },
}

pub type Result<T> = std::result::Result<T, LoaderError>;
