//! HTTP layer for `tracking`.
//!
//! Routes follow the `/{Controller}/{Action}/{id}` layout: `/Issue/...` for the
//! issue controller and `/Home/...` for the static pages. Handlers share an
//! [`AppState`] holding the database handle and the form token.

mod antiforgery;
mod error;
mod home;
mod issues;

pub use antiforgery::{generate_token, verify_token};
pub use error::AppError;

use crate::error::Result;
use crate::storage::Database;
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

/// Identifier shown on error pages and attached to the matching log line.
fn next_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Shared handler dependencies.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    /// Anti-forgery token embedded in every form.
    pub form_token: Arc<str>,
}

impl AppState {
    /// Build state with a freshly minted form token.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            db,
            form_token: Arc::from(generate_token()),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/Home", get(home::index))
        .route("/Home/Index", get(home::index))
        .route("/Home/Privacy", get(home::privacy))
        .route("/Home/Error", get(home::error))
        .route("/Issue", get(issues::index))
        .route("/Issue/Index", get(issues::index))
        .route("/Issue/Details", get(issues::details))
        .route("/Issue/Details/:id", get(issues::details))
        .route(
            "/Issue/Create",
            get(issues::create_form).post(issues::create),
        )
        .route("/Issue/Edit", get(issues::edit_form).post(issues::edit))
        .route("/Issue/Edit/:id", get(issues::edit_form).post(issues::edit))
        .route(
            "/Issue/Delete",
            get(issues::delete_form).post(issues::delete),
        )
        .route(
            "/Issue/Delete/:id",
            get(issues::delete_form).post(issues::delete),
        )
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback() -> axum::response::Response {
    error::not_found()
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            tracing::warn!("cannot listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    }
}
