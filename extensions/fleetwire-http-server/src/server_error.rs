use crate::BackendError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fleetwire::frame::{FrameDecodeError, FrameEncodeError};
use fleetwire::payload::PayloadError;
use thiserror::Error;

/// Failure while serving one request. Rendered as a non-2xx status, which is
/// what makes an agent fall back to JSON.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("rejected frame: {0}")]
    Frame(#[from] FrameDecodeError),

    #[error("rejected payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("could not encode reply: {0}")]
    Encode(#[from] FrameEncodeError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Frame(_) | ServerError::Payload(_) => StatusCode::BAD_REQUEST,
            ServerError::Backend(BackendError::UnknownAgent(_))
            | ServerError::Backend(BackendError::UnknownCommand(_)) => StatusCode::NOT_FOUND,
            ServerError::Encode(_) | ServerError::Backend(BackendError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}
