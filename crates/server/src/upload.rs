// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Receipt file storage.
//!
//! Uploads land under `<root>/<year>/<YYYY-MM-DD>/` with a random hex
//! name and an extension derived from the declared MIME type. Client
//! file names never reach the filesystem, and stored paths are always
//! relative to the upload root.

use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::{debug, warn};

/// Maps an accepted receipt MIME type to the stored file extension.
fn extension_for(mime_type: &str) -> Option<&'static str> {
    match mime_type.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

/// Content type to serve a stored receipt with, from its extension.
pub fn content_type_for(relative_path: &str) -> &'static str {
    match relative_path.rsplit('.').next() {
        Some("jpg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Stored paths are server-generated; anything with a parent reference
/// or an absolute segment is refused rather than resolved.
fn is_safe_relative_path(relative_path: &str) -> bool {
    !relative_path.starts_with('/')
        && relative_path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != ".." && !segment.contains('\\'))
}

/// Writes receipt bytes under the upload root.
///
/// # Arguments
///
/// * `uploads_dir` - Root directory for receipt storage
/// * `mime_type` - Declared MIME type of the upload
/// * `bytes` - The file content
///
/// # Returns
///
/// The stored path relative to the upload root.
///
/// # Errors
///
/// Returns an error if the MIME type is not an accepted receipt type or
/// the file cannot be written.
pub async fn store_receipt(
    uploads_dir: &Path,
    mime_type: &str,
    bytes: &[u8],
) -> Result<String, Error> {
    let Some(extension) = extension_for(mime_type) else {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("Unsupported receipt type: {mime_type}"),
        ));
    };

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let day: String = format!(
        "{:04}-{:02}-{:02}",
        now.year(),
        u8::from(now.month()),
        now.day()
    );
    let relative_dir: String = format!("{:04}/{day}", now.year());
    let file_name: String = format!(
        "{:016x}{:016x}.{extension}",
        rand::random::<u64>(),
        rand::random::<u64>()
    );

    let target_dir: PathBuf = uploads_dir.join(&relative_dir);
    tokio::fs::create_dir_all(&target_dir).await?;
    let target: PathBuf = target_dir.join(&file_name);
    tokio::fs::write(&target, bytes).await?;

    debug!(path = %target.display(), "Stored receipt upload");
    Ok(format!("{relative_dir}/{file_name}"))
}

/// Reads a stored receipt back for download.
///
/// # Errors
///
/// Returns an error if the path escapes the upload root or the file
/// cannot be read.
pub async fn read_receipt(uploads_dir: &Path, relative_path: &str) -> Result<Vec<u8>, Error> {
    if !is_safe_relative_path(relative_path) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("Unsafe receipt path: {relative_path}"),
        ));
    }
    tokio::fs::read(uploads_dir.join(relative_path)).await
}

/// Removes a stored receipt. Failures are logged and swallowed.
pub async fn discard_receipt(uploads_dir: &Path, relative_path: &str) {
    if !is_safe_relative_path(relative_path) {
        return;
    }
    let target: PathBuf = uploads_dir.join(relative_path);
    if let Err(e) = tokio::fs::remove_file(&target).await {
        warn!(path = %target.display(), error = %e, "Failed to remove receipt file");
    }
}
