use axum::{
    debug_handler,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::{debug, info, warn};

use crate::{
    session::{flash, FlashLevel},
    templates::{HtmlTemplate, LayoutContext, UploadTemplate},
    AppResult,
    AppState,
};

use super::file::{upload, FilePart, UploadDir, UploadError, ALLOWED_EXTENSIONS};

pub const FILE_FIELD: &str = "file_to_upload";

#[debug_handler]
pub(crate) async fn upload_page(session: Session) -> AppResult<Response> {
    let layout = LayoutContext::from_session(&session, "Upload").await?;
    Ok(HtmlTemplate::new(UploadTemplate { layout, allowed: ALLOWED_EXTENSIONS.join(", ") }).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit_upload(
    State(uploads): State<UploadDir>,
    session: Session,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Response> {
    let part = match multipart {
        Ok(multipart) => file_part(multipart).await?,
        Err(rejection) => {
            debug!(%rejection, "upload is not a multipart request");
            None
        }
    };

    match upload(&uploads, part).await {
        Ok(stored) => {
            info!(file = %stored, dir = %uploads.path().display(), "file uploaded");
            flash(
                &session,
                FlashLevel::Success,
                format!(r#"File "{stored}" uploaded. It has been saved to the uploads folder."#),
            )
            .await?;
        }
        Err(UploadError::Io(err)) => return Err(err.into()),
        Err(err) => {
            warn!(%err, "upload rejected");
            let level = match err {
                UploadError::EmptyFilename => FlashLevel::Info,
                _ => FlashLevel::Error,
            };
            flash(&session, level, err.to_string()).await?;
        }
    }

    Ok(Redirect::to("/upload").into_response())
}

async fn file_part(mut multipart: Multipart) -> AppResult<Option<FilePart>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await?;
        return Ok(Some(FilePart { file_name, bytes }));
    }
    Ok(None)
}
