use axum::{debug_handler, response::{IntoResponse, Response}};
use tower_sessions::Session;

use crate::{
    include_res,
    res::markdown,
    templates::{AboutTemplate, HtmlTemplate, IndexTemplate, LayoutContext},
    AppResult,
};

#[debug_handler]
pub async fn index(session: Session) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, "Home").await?;
    Ok(HtmlTemplate::new(IndexTemplate { layout }).into_response())
}

#[debug_handler]
pub async fn about(session: Session) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, "About").await?;
    let content = markdown(include_res!(str, "/pages/about.md"));
    Ok(HtmlTemplate::new(AboutTemplate { layout, content }).into_response())
}
