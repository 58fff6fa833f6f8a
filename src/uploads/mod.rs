pub mod file;
mod page;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::AppState;

pub use file::UploadDir;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", get(page::upload_page).post(page::submit_upload))
        .layer(DefaultBodyLimit::disable())
}
