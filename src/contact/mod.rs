pub mod form;
mod page;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", get(page::contact_page).post(page::submit_contact))
        .route("/messages", get(page::messages))
}
