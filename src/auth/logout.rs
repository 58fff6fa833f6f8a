use axum::{debug_handler, response::Redirect};
use tower_sessions::Session;
use tracing::info;

use crate::{session::{clear_user, flash, FlashLevel}, AppResult};

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<Redirect> {
    let name = match clear_user(&session).await? {
        Some(user) => {
            info!(username = %user.username, "logged out");
            user.username
        }
        None => "user".to_owned(),
    };

    flash(
        &session,
        FlashLevel::Info,
        format!("{name}, you have been logged out. See you next time!"),
    )
    .await?;
    Ok(Redirect::to("/"))
}
