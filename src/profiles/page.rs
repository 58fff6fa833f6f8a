use axum::{debug_handler, extract::Path, response::{IntoResponse, Redirect, Response}};
use tower_sessions::Session;

use crate::{
    templates::{AdminTemplate, GuestTemplate, HtmlTemplate, LayoutContext, UserProfileTemplate},
    AppResult,
};

#[debug_handler]
pub(crate) async fn user_profile(
    Path(username): Path<String>,
    session: Session,
) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, username.as_str()).await?;
    Ok(HtmlTemplate::new(UserProfileTemplate { layout, name: username }).into_response())
}

#[debug_handler]
pub(crate) async fn hello_admin(session: Session) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, "Admin").await?;
    Ok(HtmlTemplate::new(AdminTemplate { layout }).into_response())
}

#[debug_handler]
pub(crate) async fn hello_guest(
    Path(guest): Path<String>,
    session: Session,
) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, "Guest").await?;
    Ok(HtmlTemplate::new(GuestTemplate { layout, guest_name: guest }).into_response())
}

#[debug_handler]
pub(crate) async fn profile_redirect(Path(name): Path<String>) -> Redirect {
    Redirect::to(&profile_target(&name))
}

pub(crate) fn profile_target(name: &str) -> String {
    if name == "admin" {
        "/admin".to_owned()
    } else {
        format!("/guest/{}", encode_segment(name))
    }
}

/// Percent-encode everything but RFC 3986 unreserved characters.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
