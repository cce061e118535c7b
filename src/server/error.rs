use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Failures that abort a connector request.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("malformed saveItems body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("failed to write bibliography: {0:#}")]
    Write(anyhow::Error),
}

impl IntoResponse for ConnectorError {
    fn into_response(self) -> Response {
        let status = match self {
            ConnectorError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ConnectorError::Write(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(error = %self, "request failed");
        (status, self.to_string()).into_response()
    }
}
