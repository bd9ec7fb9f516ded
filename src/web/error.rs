//! Mapping failures onto HTTP responses.

use crate::error::{ErrorCode, StructuredError, TrackingError};
use crate::format;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};

/// Anything a handler can fail with.
#[derive(Debug)]
pub enum AppError {
    /// Missing or unparsable id, or no such record.
    NotFound,
    Tracking(TrackingError),
}

impl From<TrackingError> for AppError {
    fn from(err: TrackingError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Tracking(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => not_found(),
            Self::Tracking(err) => {
                let structured = StructuredError::from_error(&err);
                let status = StatusCode::from_u16(structured.code.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

                match structured.code {
                    ErrorCode::IssueNotFound => not_found(),
                    ErrorCode::AntiForgery => {
                        warn!(code = structured.code.as_str(), "rejected request: {err}");
                        (status, Html(format::bad_request_page(&structured.message)))
                            .into_response()
                    }
                    code => {
                        let request_id = super::next_request_id();
                        error!(
                            request_id = %request_id,
                            code = code.as_str(),
                            "request failed: {err}"
                        );
                        (
                            status,
                            Html(format::error_page(Some(&request_id), Some(code.as_str()))),
                        )
                            .into_response()
                    }
                }
            }
        }
    }
}

/// The shared 404 response.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(format::not_found_page())).into_response()
}
