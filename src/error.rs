//! Error types for the crawl.
//!
//! Per-entry and per-page failures (`FetchError`, `ParseError`, `EntryError`)
//! are logged and skipped by the caller. `CrawlError` is the only error that
//! ends a run.

use std::path::PathBuf;

use thiserror::Error;

use crate::book_id::BookIdError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("GET {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url}: unexpected status {status}")]
    Status { url: String, status: u16 },
    #[error("GET {url}: redirect without a valid Location header")]
    BadRedirect { url: String },
    #[error("GET {url}: more than {limit} redirects")]
    TooManyRedirects { url: String, limit: usize },
    #[error("invalid url {input}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("catalog io on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a single catalog entry was not downloaded.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error(transparent)]
    BookId(#[from] BookIdError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Conditions that abort the whole run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("load catalog")]
    LoadCatalog(#[source] CatalogError),
    #[error("flush catalog after page {page}")]
    FlushCatalog {
        page: u32,
        #[source]
        source: CatalogError,
    },
    #[error("read first category page {url}")]
    FirstPage {
        url: String,
        #[source]
        source: PageError,
    },
    #[error("empty page range: start page {start} must be below end page {end}")]
    EmptyPageRange { start: u32, end: u32 },
    #[error(transparent)]
    InvalidUrl(FetchError),
}
