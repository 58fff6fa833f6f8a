use axum::{debug_handler, extract::State, http::StatusCode, response::{IntoResponse, Redirect, Response}, Form};
use sqlx::SqlitePool;
use time::macros::format_description;
use tower_sessions::Session;
use tracing::{debug, info, warn};

use crate::{
    csrf::{ensure_csrf_token, validate_csrf_token, CSRF_REJECTED},
    db::{self, ContactMessage},
    session::{flash, FlashLevel},
    templates::{ContactTemplate, HtmlTemplate, LayoutContext, MessageView, MessagesTemplate},
    AppResult,
    AppState,
};

use super::form::{errors_for, validate, FieldError, RawContact};

fn messages_for(errors: &[FieldError], field: &str) -> Vec<&'static str> {
    errors_for(errors, field).map(|e| e.message).collect()
}

async fn render_form(
    session: &Session,
    raw: &RawContact,
    form_errors: Vec<&'static str>,
    errors: &[FieldError],
    status: StatusCode,
) -> AppResult<Response> {
    let template = ContactTemplate {
        layout: LayoutContext::from_session(session, "Contact").await?,
        csrf_token: ensure_csrf_token(session).await?,
        name: raw.name.clone(),
        email: raw.email.clone(),
        message: raw.message.clone(),
        form_errors,
        name_errors: messages_for(errors, "name"),
        email_errors: messages_for(errors, "email"),
        message_errors: messages_for(errors, "message"),
    };
    Ok(HtmlTemplate::with_status(template, status).into_response())
}

#[debug_handler]
pub(crate) async fn contact_page(session: Session) -> AppResult<Response> {
    render_form(&session, &RawContact::default(), Vec::new(), &[], StatusCode::OK).await
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit_contact(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(raw): Form<RawContact>,
) -> AppResult<Response> {
    if !validate_csrf_token(&session, &raw.csrf_token).await? {
        warn!("contact form rejected: missing or mismatched csrf token");
        return render_form(&session, &raw, vec![CSRF_REJECTED], &[], StatusCode::BAD_REQUEST).await;
    }

    let contact = match validate(&raw) {
        Ok(contact) => contact,
        Err(errors) => {
            debug!(count = errors.len(), "contact form rejected");
            return render_form(&session, &raw, Vec::new(), &errors, StatusCode::UNPROCESSABLE_ENTITY).await;
        }
    };

    let stored = db::insert(&db_pool, &contact).await?;
    info!(id = stored.id, name = %stored.name, email = %stored.email, "contact message stored");

    flash(
        &session,
        FlashLevel::Success,
        format!("Thanks for your message, {}! It has been saved.", stored.name),
    )
    .await?;
    Ok(Redirect::to("/contact").into_response())
}

fn message_view(msg: ContactMessage) -> AppResult<MessageView> {
    let created_at = msg
        .created_at
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC"))?;

    Ok(MessageView {
        id: msg.id,
        name: msg.name,
        email: msg.email,
        message: msg.message,
        created_at,
    })
}

#[debug_handler(state = AppState)]
pub(crate) async fn messages(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let messages = db::list_all(&db_pool)
        .await?
        .into_iter()
        .map(message_view)
        .collect::<AppResult<Vec<_>>>()?;

    let layout = LayoutContext::from_session(&session, "Messages").await?;
    Ok(HtmlTemplate::new(MessagesTemplate { layout, messages }).into_response())
}
