use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The method or URL of a request descriptor cannot be turned into a request.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),
    #[error("Cannot marshal generated testcase: {0}")]
    SerializationError(#[source] serde_yaml::Error),
    #[error("{0}")]
    InvalidTagOrVersionLabel(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[source] serde_yaml::Error),
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
}

impl From<InvalidHeaderName> for Error {
    fn from(e: InvalidHeaderName) -> Self {
        Error::MalformedRequest(format!("invalid header name: {}", e))
    }
}

impl From<InvalidHeaderValue> for Error {
    fn from(e: InvalidHeaderValue) -> Self {
        Error::MalformedRequest(format!("invalid header value: {}", e))
    }
}
