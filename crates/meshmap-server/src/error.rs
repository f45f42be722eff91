use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors surfaced to the browser. Everything else degrades to a smaller map.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("missing required query parameter 'host', e.g. /?host=192.168.1.10")]
    MissingHost,

    #[error("failed to render map: {0}")]
    Render(#[from] serde_json::Error),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::MissingHost => StatusCode::BAD_REQUEST,
            RequestError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        if let RequestError::Render(e) = &self {
            tracing::error!(error=%e, "map rendering failed");
        }
        (self.status(), self.to_string()).into_response()
    }
}
