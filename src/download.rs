use std::path::PathBuf;
use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::artifact_store::{book_file_name, image_file_name, write_artifact};
use crate::book_id::BookId;
use crate::catalog::Catalog;
use crate::config::CrawlConfig;
use crate::error::{EntryError, FetchError};
use crate::existence::{self, Existence};
use crate::fetch::Fetch;
use crate::formats::BookRecord;
use crate::parse;

/// What happened to one catalog entry that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Downloaded,
    AlreadyCataloged,
    Missing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub downloaded: usize,
    pub already_cataloged: usize,
    pub missing: usize,
    pub failed: usize,
}

impl PageSummary {
    fn record(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Downloaded => self.downloaded += 1,
            EntryOutcome::AlreadyCataloged => self.already_cataloged += 1,
            EntryOutcome::Missing => self.missing += 1,
        }
    }

    pub fn add(&mut self, other: PageSummary) {
        self.downloaded += other.downloaded;
        self.already_cataloged += other.already_cataloged;
        self.missing += other.missing;
        self.failed += other.failed;
    }
}

/// Resolves catalog entries into downloaded files and catalog records.
pub struct Downloader {
    fetcher: Arc<dyn Fetch>,
    config: CrawlConfig,
    text_url: Url,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn Fetch>, config: CrawlConfig) -> Result<Self, FetchError> {
        let text_url = config
            .text_url()
            .map_err(|source| FetchError::InvalidUrl {
                input: format!("{}txt.php", config.base_url),
                source,
            })?;
        Ok(Self {
            fetcher,
            config,
            text_url,
        })
    }

    /// Processes `links` in order. Failures are logged and counted; they never
    /// stop the remaining links.
    pub async fn process_page(&self, links: &[Url], catalog: &mut Catalog) -> PageSummary {
        let mut summary = PageSummary::default();
        for link in links {
            match self.process_book(link, catalog).await {
                Ok(outcome) => summary.record(outcome),
                Err(err) => {
                    tracing::warn!(url = %link, ?err, "book skipped");
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    pub async fn process_book(
        &self,
        link: &Url,
        catalog: &mut Catalog,
    ) -> Result<EntryOutcome, EntryError> {
        let id = BookId::from_book_url(link)?;
        let id_param = id.to_string();

        let text = self
            .fetcher
            .get(&self.text_url, &[("id", id_param.as_str())])
            .await?;
        if existence::check(&text) == Existence::Missing {
            tracing::info!(%id, redirected_to = %text.final_url, "book text is not available");
            return Ok(EntryOutcome::Missing);
        }

        let detail = self.fetcher.get(link, &[]).await?;
        let book = {
            let doc = Html::parse_document(&detail.text());
            parse::parse_book_page(&doc, &detail.final_url)?
        };

        if catalog.contains(id) {
            tracing::debug!(%id, title = %book.title, "already in catalog");
            return Ok(EntryOutcome::AlreadyCataloged);
        }

        // Text first: a failed text write must not leave an orphan cover.
        let book_path = if self.config.skip_text {
            None
        } else {
            let file_name = book_file_name(id, &book.author, &book.title);
            let path = write_artifact(&self.config.books_dir, &file_name, &text.body)?;
            Some(path_string(path))
        };

        let img_path = if self.config.skip_images {
            None
        } else {
            self.download_image(id, &book.img_url).await
        };

        tracing::info!(%id, title = %book.title, author = %book.author, "book downloaded");
        catalog.append(BookRecord {
            id,
            title: book.title,
            author: book.author,
            img_url: book.img_url.to_string(),
            img_path,
            genres: book.genres,
            comments: book.comments,
            book_path,
        });
        Ok(EntryOutcome::Downloaded)
    }

    /// A failed cover download leaves the book without a local image.
    async fn download_image(&self, id: BookId, url: &Url) -> Option<String> {
        match self.try_download_image(url).await {
            Ok(path) => Some(path_string(path)),
            Err(err) => {
                tracing::warn!(%id, %url, ?err, "cover image skipped");
                None
            }
        }
    }

    async fn try_download_image(&self, url: &Url) -> Result<PathBuf, EntryError> {
        let response = self.fetcher.get(url, &[]).await?;
        write_artifact(
            &self.config.images_dir,
            &image_file_name(url),
            &response.body,
        )
    }
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}
