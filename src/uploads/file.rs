use std::{io, path::{Path, PathBuf}, sync::Arc};

use axum::body::Bytes;

pub const ALLOWED_EXTENSIONS: [&str; 10] = ["txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "xls", "xlsx"];

/// The directory every upload lands in, flat.
#[derive(Debug, Clone)]
pub struct UploadDir(Arc<PathBuf>);

impl UploadDir {
    pub async fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        tokio::fs::create_dir_all(&path).await?;
        Ok(UploadDir(Arc::new(path)))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// The `file_to_upload` part of a multipart body.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file part in the request.")]
    NoFilePart,
    #[error("No file selected.")]
    EmptyFilename,
    #[error("File type not allowed. Supported types: txt, pdf, png, jpg, jpeg, gif, doc, docx, xls, xlsx.")]
    DisallowedType,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Extension after the last `.`, compared case-insensitively.
pub fn allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Flatten a client-supplied name into something safe to join onto the upload dir.
///
/// Path separators become word breaks, non-ASCII and anything outside
/// `[A-Za-z0-9_.-]` is dropped, whitespace runs collapse to `_`, and leading
/// or trailing `.`/`_` are stripped.
pub fn secure_filename(file_name: &str) -> String {
    let spaced: String = file_name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(['.', '_'])
        .to_owned()
}

/// Check the part, then write it under its sanitized name. Existing files are replaced.
pub async fn upload(dir: &UploadDir, part: Option<FilePart>) -> Result<String, UploadError> {
    let part = part.ok_or(UploadError::NoFilePart)?;
    let file_name = part.file_name.unwrap_or_default();

    if file_name.is_empty() {
        return Err(UploadError::EmptyFilename);
    }
    if !allowed_file(&file_name) {
        return Err(UploadError::DisallowedType);
    }

    let stored = secure_filename(&file_name);
    // sanitizing can eat the extension, e.g. a name made only of non-ASCII before the dot
    if !allowed_file(&stored) {
        return Err(UploadError::DisallowedType);
    }

    tokio::fs::write(dir.path().join(&stored), &part.bytes).await?;
    Ok(stored)
}
