use std::ops::Range;
use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::catalog::Catalog;
use crate::config::CrawlConfig;
use crate::download::{Downloader, PageSummary};
use crate::error::{CrawlError, FetchError, PageError};
use crate::fetch::Fetch;
use crate::parse;

/// Exclusive end page used when no page range is requested.
pub const DEFAULT_END_PAGE: u32 = 11;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_crawled: u32,
    pub pages_failed: u32,
    pub books: PageSummary,
}

/// Pages to crawl, as the half-open range `[start, end)`.
///
/// Only a start page without an end page needs the network: the end is then
/// one past the last page listed on the category root. Failing to read that
/// page is fatal.
pub async fn resolve_page_range(
    fetcher: &dyn Fetch,
    config: &CrawlConfig,
) -> Result<Range<u32>, CrawlError> {
    let start = config.start_page.unwrap_or(1);
    let end = match (config.start_page, config.end_page) {
        (_, Some(end)) => end,
        (None, None) => DEFAULT_END_PAGE,
        (Some(_), None) => {
            let last = last_page_number(fetcher, &config.category_url)
                .await
                .map_err(|source| CrawlError::FirstPage {
                    url: config.category_url.to_string(),
                    source,
                })?;
            tracing::debug!(last, "category last page");
            last.saturating_add(1)
        }
    };

    if start >= end {
        return Err(CrawlError::EmptyPageRange { start, end });
    }
    Ok(start..end)
}

/// Crawls the configured pages, downloading every new book and flushing the
/// catalog after each page.
///
/// The first page of the range must be readable; later pages that fail are
/// logged and skipped.
pub async fn run(fetcher: Arc<dyn Fetch>, config: &CrawlConfig) -> Result<RunSummary, CrawlError> {
    let mut catalog = Catalog::load(&config.catalog_path).map_err(CrawlError::LoadCatalog)?;
    tracing::info!(
        books = catalog.len(),
        path = %config.catalog_path.display(),
        "catalog loaded"
    );

    let pages = resolve_page_range(fetcher.as_ref(), config).await?;
    tracing::info!(start = pages.start, end = pages.end, "crawling category pages");

    let downloader =
        Downloader::new(fetcher.clone(), config.clone()).map_err(CrawlError::InvalidUrl)?;
    let mut summary = RunSummary::default();

    let first_page = pages.start;
    for page in pages {
        let links = match fetch_book_links(fetcher.as_ref(), config, page).await {
            Ok(links) => links,
            Err(source) if page == first_page => {
                return Err(CrawlError::FirstPage {
                    url: page_url_string(config, page),
                    source,
                });
            }
            Err(err) => {
                tracing::error!(page, ?err, "category page skipped");
                summary.pages_failed += 1;
                continue;
            }
        };

        let page_summary = downloader.process_page(&links, &mut catalog).await;
        catalog
            .flush(&config.catalog_path)
            .map_err(|source| CrawlError::FlushCatalog { page, source })?;

        tracing::info!(
            page,
            downloaded = page_summary.downloaded,
            already_cataloged = page_summary.already_cataloged,
            missing = page_summary.missing,
            failed = page_summary.failed,
            "page done"
        );
        summary.pages_crawled += 1;
        summary.books.add(page_summary);
    }

    tracing::info!(
        pages_crawled = summary.pages_crawled,
        pages_failed = summary.pages_failed,
        downloaded = summary.books.downloaded,
        already_cataloged = summary.books.already_cataloged,
        missing = summary.books.missing,
        failed = summary.books.failed,
        catalog_size = catalog.len(),
        "crawl finished"
    );
    Ok(summary)
}

async fn fetch_book_links(
    fetcher: &dyn Fetch,
    config: &CrawlConfig,
    page: u32,
) -> Result<Vec<Url>, PageError> {
    let url = config
        .page_url(page)
        .map_err(|source| FetchError::InvalidUrl {
            input: format!("{}{page}/", config.category_url),
            source,
        })?;
    let response = fetcher.get(&url, &[]).await?;
    let doc = Html::parse_document(&response.text());
    Ok(parse::parse_book_links(&doc, &response.final_url)?)
}

fn page_url_string(config: &CrawlConfig, page: u32) -> String {
    config
        .page_url(page)
        .map(String::from)
        .unwrap_or_else(|_| format!("{}{page}/", config.category_url))
}

async fn last_page_number(fetcher: &dyn Fetch, category_url: &Url) -> Result<u32, PageError> {
    let response = fetcher.get(category_url, &[]).await?;
    let doc = Html::parse_document(&response.text());
    Ok(parse::parse_last_page_number(&doc)?)
}
