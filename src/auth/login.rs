use axum::{debug_handler, extract::Path, response::{IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, info};

use crate::{
    session::{flash, store_user, FlashLevel, Role},
    templates::{HtmlTemplate, LayoutContext, LoginFailedTemplate, LoginTemplate},
    AppResult,
};

use super::authenticate;

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[debug_handler]
pub(crate) async fn login_page(session: Session) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, "Log in").await?;
    Ok(HtmlTemplate::new(LoginTemplate { layout }).into_response())
}

#[debug_handler]
pub(crate) async fn login(
    session: Session,
    Form(LoginForm { username, password }): Form<LoginForm>,
) -> AppResult<Redirect> {
    match authenticate(&username, &password) {
        Ok(user) => {
            store_user(&session, &user).await?;
            info!(username = %user.username, role = %user.user_role, "logged in");

            let greeting = match user.user_role {
                Role::Admin => format!("Welcome, {}! You are logged in as administrator.", user.username),
                Role::Guest => format!("Welcome, {}! You are logged in as a guest.", user.username),
            };
            flash(&session, FlashLevel::Success, greeting).await?;
            Ok(Redirect::to("/"))
        }
        Err(err) => {
            debug!(%username, "login rejected");
            flash(&session, FlashLevel::Error, err.to_string()).await?;
            Ok(Redirect::to("/login"))
        }
    }
}

#[debug_handler]
pub(crate) async fn login_failed(
    Path(username): Path<String>,
    session: Session,
) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, "Login failed").await?;
    Ok(HtmlTemplate::new(LoginFailedTemplate { layout, username }).into_response())
}
