//! Errors returned by HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::navigation::NavigationError;
use crate::ui::mobile_menu::{InvalidMenuEvent, InvalidMenuState};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    InvalidMenuEvent(#[from] InvalidMenuEvent),

    #[error(transparent)]
    InvalidMenuState(#[from] InvalidMenuState),

    #[error("unknown sign-in provider `{0}`")]
    UnknownProvider(String),

    #[error("sign-in provider `{0}` is not configured")]
    AuthNotConfigured(String),

    #[error("failed to build sign-in URL: {0}")]
    SignInUrl(#[from] url::ParseError),
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Navigation(_) | Self::InvalidMenuEvent(_) | Self::InvalidMenuState(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UnknownProvider(_) => StatusCode::NOT_FOUND,
            Self::AuthNotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SignInUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(name: "request.failed", status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(name: "request.rejected", status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
