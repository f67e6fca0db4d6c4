use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use coinfolio_core::{PortfolioError, PortfolioErrorKind};

/// Errors returned by dashboard routes.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Portfolio(error) => match error.kind() {
                PortfolioErrorKind::Auth
                | PortfolioErrorKind::Network
                | PortfolioErrorKind::Upstream
                | PortfolioErrorKind::UnexpectedSchema => StatusCode::BAD_GATEWAY,
                PortfolioErrorKind::MissingData => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Portfolio(error) => error.kind().as_str(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = status.as_u16(), error = %self, "dashboard request failed");

        let body = json!({ "error": format!("{}: {self}", self.code()) });
        (status, axum::Json(body)).into_response()
    }
}
