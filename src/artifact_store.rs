use std::path::{Path, PathBuf};

use url::Url;

use crate::book_id::BookId;
use crate::error::EntryError;
use crate::sanitize::sanitize_filename;

/// `{id}. {author} - {title}.txt`, made safe for the filesystem.
pub fn book_file_name(id: BookId, author: &str, title: &str) -> String {
    sanitize_filename(&format!("{id}. {author} - {title}.txt"))
}

/// File name for a cover image: the last path segment of its URL.
pub fn image_file_name(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    sanitize_filename(segment)
}

/// Writes `bytes` to `dir/file_name`, creating `dir` if needed.
///
/// The final name only ever holds complete content: data goes to a temporary
/// sibling first and is renamed into place.
pub fn write_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, EntryError> {
    let path = dir.join(file_name);
    write_atomic(&path, bytes).map_err(|source| EntryError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(
        ".{file_name}.tmp.{}",
        uuid::Uuid::new_v4().simple()
    ));

    if let Err(err) = std::fs::write(&tmp_path, bytes) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err);
    }
    if let Err(err) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}
