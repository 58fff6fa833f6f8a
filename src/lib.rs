pub mod ajax;
pub mod appresult;
pub mod auth;
pub mod config;
pub mod contact;
pub mod csrf;
pub mod db;
pub mod index;
pub mod logging;
pub mod profiles;
pub mod res;
pub mod session;
pub mod templates;
pub mod uploads;

use axum::{extract::FromRef, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::{Key, SameSite}, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use uploads::UploadDir;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub uploads: UploadDir,
}

/// Every route, wrapped in request tracing and a session layer whose cookie is signed with `key`.
pub fn router(app_state: AppState, key: Key) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnSessionEnd)
        .with_signed(key);

    Router::new()
        .route("/", get(index::index))
        .route("/about", get(index::about))

        .merge(auth::router())
        .merge(profiles::router())
        .merge(uploads::router())
        .merge(contact::router())
        .merge(ajax::router())

        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
