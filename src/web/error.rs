//! HTTP error mapping for dashboard routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use crate::charts::{ChartError, RenderError};
use crate::data::ProcessorError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unknown subject: {0}")]
    UnknownSubject(String),
    #[error("unknown chart: {0}")]
    UnknownChart(String),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Stats(#[from] ProcessorError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to render page: {0}")]
    Page(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownSubject(_) | ApiError::UnknownChart(_) => StatusCode::NOT_FOUND,
            ApiError::Chart(_)
            | ApiError::Stats(_)
            | ApiError::Render(_)
            | ApiError::Page(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
