use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Numeric id of a catalog entry, as embedded in `/b{id}/` detail-page URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookIdError {
    #[error("book url has no path segment: {url}")]
    MissingSegment { url: String },
    #[error("book url path must be `/b<id>/`, got: {url}")]
    UnexpectedPath { url: String },
    #[error("invalid book id `{input}`")]
    InvalidNumber { input: String },
    #[error("book path has no `<id>. ` prefix: {path}")]
    MissingPrefix { path: String },
}

impl BookId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Parses `https://host/b239/` into `239`. Only the last path segment is
    /// read, so a site mounted under a prefix (`/mirror/b239/`) works too.
    pub fn from_book_url(url: &Url) -> Result<Self, BookIdError> {
        let segment = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|segment| !segment.is_empty())
            .last()
            .ok_or_else(|| BookIdError::MissingSegment {
                url: url.to_string(),
            })?;

        let digits = segment
            .strip_prefix('b')
            .ok_or_else(|| BookIdError::UnexpectedPath {
                url: url.to_string(),
            })?;
        parse_digits(digits)
    }

    /// Recovers the id from an artifact path named `{id}. {author} - {title}.txt`.
    pub fn from_book_path(path: &str) -> Result<Self, BookIdError> {
        let file_name = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path);
        let (digits, _) = file_name
            .split_once(". ")
            .ok_or_else(|| BookIdError::MissingPrefix {
                path: path.to_owned(),
            })?;
        parse_digits(digits)
    }
}

fn parse_digits(input: &str) -> Result<BookId, BookIdError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BookIdError::InvalidNumber {
            input: input.to_owned(),
        });
    }
    input
        .parse::<u32>()
        .map(BookId)
        .map_err(|_| BookIdError::InvalidNumber {
            input: input.to_owned(),
        })
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
