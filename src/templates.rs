use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tower_sessions::Session;
use tracing::error;

use crate::{session::{current_user, take_flashes, Flash, SessionUser}, AppResult};

/// What every page's layout shows: title, who is logged in, pending notices.
#[derive(Clone, Debug)]
pub struct LayoutContext {
    pub title: String,
    pub user: Option<SessionUser>,
    pub flashes: Vec<Flash>,
}

impl LayoutContext {
    /// Reading the layout drains pending flashes, so each one is shown once.
    pub async fn from_session(session: &Session, title: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            title: title.into(),
            user: current_user(session).await?,
            flashes: take_flashes(session).await?,
        })
    }
}

/// Converts askama templates into axum responses, logging render failures.
pub struct HtmlTemplate<T: Template> {
    template: T,
    status: StatusCode,
}

impl<T: Template> HtmlTemplate<T> {
    pub fn new(template: T) -> Self {
        Self { template, status: StatusCode::OK }
    }

    pub fn with_status(template: T, status: StatusCode) -> Self {
        Self { template, status }
    }
}

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(err) => {
                error!(target: "templates", error = %err, "failed to render template");
                (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering error").into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "index.html", escape = "html")]
pub struct IndexTemplate {
    pub layout: LayoutContext,
}

/// `content` is HTML rendered from the bundled markdown and is emitted unescaped.
#[derive(Template)]
#[template(path = "about.html", escape = "html")]
pub struct AboutTemplate {
    pub layout: LayoutContext,
    pub content: String,
}

#[derive(Template)]
#[template(path = "login.html", escape = "html")]
pub struct LoginTemplate {
    pub layout: LayoutContext,
}

#[derive(Template)]
#[template(path = "login_failed.html", escape = "html")]
pub struct LoginFailedTemplate {
    pub layout: LayoutContext,
    pub username: String,
}

#[derive(Template)]
#[template(path = "user_profile.html", escape = "html")]
pub struct UserProfileTemplate {
    pub layout: LayoutContext,
    pub name: String,
}

#[derive(Template)]
#[template(path = "admin.html", escape = "html")]
pub struct AdminTemplate {
    pub layout: LayoutContext,
}

#[derive(Template)]
#[template(path = "guest.html", escape = "html")]
pub struct GuestTemplate {
    pub layout: LayoutContext,
    pub guest_name: String,
}

#[derive(Template)]
#[template(path = "upload.html", escape = "html")]
pub struct UploadTemplate {
    pub layout: LayoutContext,
    pub allowed: String,
}

#[derive(Template)]
#[template(path = "contact.html", escape = "html")]
pub struct ContactTemplate {
    pub layout: LayoutContext,
    pub csrf_token: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub form_errors: Vec<&'static str>,
    pub name_errors: Vec<&'static str>,
    pub email_errors: Vec<&'static str>,
    pub message_errors: Vec<&'static str>,
}

/// A stored contact message, formatted for display.
#[derive(Clone, Debug)]
pub struct MessageView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

#[derive(Template)]
#[template(path = "messages.html", escape = "html")]
pub struct MessagesTemplate {
    pub layout: LayoutContext,
    pub messages: Vec<MessageView>,
}

#[derive(Template)]
#[template(path = "ajax_demo.html", escape = "html")]
pub struct AjaxDemoTemplate {
    pub layout: LayoutContext,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FlashLevel, Role};

    fn layout(title: &str) -> LayoutContext {
        LayoutContext { title: title.to_owned(), user: None, flashes: Vec::new() }
    }

    #[test]
    fn values_are_escaped() {
        let html = UserProfileTemplate { layout: layout("x"), name: r#"<script>"x's"&"#.to_owned() }
            .render()
            .unwrap();
        assert!(html.contains("Profile of &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn layout_shows_user_and_flashes() {
        let html = AdminTemplate {
            layout: LayoutContext {
                title: "Admin".to_owned(),
                user: Some(SessionUser { username: "<b>ann</b>".to_owned(), user_role: Role::Guest }),
                flashes: vec![Flash { level: FlashLevel::Error, message: "<i>nope</i>".to_owned() }],
            },
        }
        .render()
        .unwrap();
        assert!(html.contains("&lt;b&gt;ann"));
        assert!(html.contains("(guest)"));
        assert!(html.contains(r#"class="flash flash-error""#));
        assert!(html.contains("&lt;i&gt;nope"));
        assert!(html.contains("/logout"));
    }

    #[test]
    fn about_content_is_not_escaped() {
        let html = AboutTemplate { layout: layout("About"), content: "<h1>About</h1>".to_owned() }
            .render()
            .unwrap();
        assert!(html.contains("<h1>About</h1>"));
    }

    #[test]
    fn contact_form_carries_token_and_errors() {
        let html = ContactTemplate {
            layout: layout("Contact"),
            csrf_token: "tok123".to_owned(),
            name: r#"A"B"#.to_owned(),
            email: String::new(),
            message: String::new(),
            form_errors: vec!["expired"],
            name_errors: Vec::new(),
            email_errors: vec!["Email is required."],
            message_errors: Vec::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"name="csrf_token" value="tok123""#));
        assert!(html.contains(r#"value="A&"#));
        assert!(!html.contains(r#"value="A"B""#));
        assert!(html.contains("Email is required."));
        assert!(html.contains("expired"));
    }

    #[test]
    fn empty_message_list() {
        let html = MessagesTemplate { layout: layout("Messages"), messages: Vec::new() }.render().unwrap();
        assert!(html.contains("Messages (0)"));
        assert!(html.contains("No messages yet."));
    }

    #[test]
    fn status_is_kept() {
        let res = HtmlTemplate::with_status(IndexTemplate { layout: layout("Home") }, StatusCode::BAD_REQUEST)
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
