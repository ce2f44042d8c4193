use fleetwire::frame::{FrameDecodeError, FrameEncodeError};
use fleetwire::payload::PayloadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The client could not be constructed from its configuration.
    #[error("invalid transport configuration: {0}")]
    Config(String),

    /// Connection failure, timeout, or any other error below HTTP.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The server answered with a non-2xx status.
    #[error("server responded with status {0}")]
    Status(u16),

    #[error("could not encode request frame: {0}")]
    Encode(#[from] FrameEncodeError),

    #[error("could not decode response frame: {0}")]
    Frame(#[from] FrameDecodeError),

    #[error("unexpected payload: {0}")]
    Payload(#[from] PayloadError),

    /// The server acknowledged the request but refused it.
    #[error("server rejected request: {0}")]
    Rejected(String),

    #[error("invalid JSON response: {0}")]
    Json(String),

    /// Neither protocol delivered. Carries both underlying failures.
    #[error("binary path failed ({binary}); JSON fallback failed ({json})")]
    BothPathsFailed {
        binary: Box<TransportError>,
        json: Box<TransportError>,
    },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::Status(status.as_u16()),
            None if err.is_decode() => TransportError::Json(err.to_string()),
            None => TransportError::Http(err.to_string()),
        }
    }
}
