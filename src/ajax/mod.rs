use axum::{debug_handler, response::{IntoResponse, Response}, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{templates::{AjaxDemoTemplate, HtmlTemplate, LayoutContext}, AppResult, AppState};

pub const DEFAULT_NAME: &str = "friend";
pub const DEFAULT_LASTNAME: &str = "";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ajax-demo", get(demo))
        .route("/ajax/say-hello", post(say_hello))
        .route("/ajax/say-goodbye", post(say_goodbye))
}

/// Body of `/ajax/say-hello`. Absent fields fall back to [`DEFAULT_NAME`] and
/// [`DEFAULT_LASTNAME`]; present ones must be strings or the extractor rejects the request.
#[derive(Debug, Default, Deserialize)]
pub struct HelloRequest {
    pub name: Option<String>,
    pub lastname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AjaxResponse {
    pub success: bool,
    pub message: String,
    pub action: String,
}

pub fn hello(req: HelloRequest) -> AjaxResponse {
    let name = req.name.unwrap_or_else(|| DEFAULT_NAME.to_owned());
    let lastname = req.lastname.unwrap_or_else(|| DEFAULT_LASTNAME.to_owned());
    AjaxResponse {
        success: true,
        message: format!("Hello from {name} {lastname}!"),
        action: "turn_green".to_owned(),
    }
}

pub fn goodbye() -> AjaxResponse {
    AjaxResponse {
        success: true,
        message: "Goodbye, whoever you are!".to_owned(),
        action: "turn_red".to_owned(),
    }
}

#[debug_handler]
async fn demo(session: Session) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, "AJAX demo").await?;
    Ok(HtmlTemplate::new(AjaxDemoTemplate { layout }).into_response())
}

#[debug_handler]
async fn say_hello(Json(req): Json<HelloRequest>) -> Json<AjaxResponse> {
    Json(hello(req))
}

#[debug_handler]
async fn say_goodbye() -> Json<AjaxResponse> {
    Json(goodbye())
}
