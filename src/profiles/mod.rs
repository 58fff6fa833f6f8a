mod page;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/{username}", get(page::user_profile))
        .route("/admin", get(page::hello_admin))
        .route("/guest/{guest}", get(page::hello_guest))
        .route("/profile/{name}", get(page::profile_redirect))
}
