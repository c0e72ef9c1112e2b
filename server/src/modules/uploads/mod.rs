//! Multipart image uploads written to local disk.
//!
//! Files land under `<uploads_dir>/<kind>/<millis>-<sanitized-name>` and the
//! stored value is the public URL path beneath `/uploads`.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only image files allowed")]
    NotAnImage,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy)]
pub enum UploadKind {
    Scientist,
    Discovery,
    Avatar,
}

impl UploadKind {
    fn subdir(self) -> &'static str {
        match self {
            UploadKind::Scientist => "scientists",
            UploadKind::Discovery => "discoveries",
            UploadKind::Avatar => "avatars",
        }
    }
}

/// Strip path components and replace anything outside `[A-Za-z0-9._-]`.
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Write an uploaded image to disk and return its `/uploads/...` URL path.
///
/// Rejects anything whose content type is not `image/*`.
pub async fn save_image(
    uploads_dir: &Path,
    kind: UploadKind,
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, UploadError> {
    if !content_type.is_some_and(|ct| ct.starts_with("image")) {
        return Err(UploadError::NotAnImage);
    }

    let stored_name = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        sanitize_filename(filename)
    );

    let dir = uploads_dir.join(kind.subdir());
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&stored_name), data).await?;

    Ok(format!("/uploads/{}/{}", kind.subdir(), stored_name))
}
