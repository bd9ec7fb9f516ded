//! Landing, privacy and error pages.

use crate::format;
use axum::http::header;
use axum::response::{Html, IntoResponse};

/// `GET /`
pub async fn index() -> Html<String> {
    Html(format::home_page())
}

/// `GET /Home/Privacy`
pub async fn privacy() -> Html<String> {
    Html(format::privacy_page())
}

/// `GET /Home/Error`
///
/// Never cached.
pub async fn error() -> impl IntoResponse {
    let request_id = super::next_request_id();
    (
        [(header::CACHE_CONTROL, "no-store, no-cache")],
        Html(format::error_page(Some(&request_id), None)),
    )
}
