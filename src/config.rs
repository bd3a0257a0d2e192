use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use url::Url;

use crate::cli::CrawlArgs;
use crate::sanitize::sanitize_folder;

pub const BOOKS_DIR: &str = "books";
pub const IMAGES_DIR: &str = "images";
pub const CATALOG_FILE: &str = "books.json";

/// Everything a crawl run needs, resolved once up front.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: Url,
    pub category_url: Url,
    pub start_page: Option<u32>,
    pub end_page: Option<u32>,
    pub skip_images: bool,
    pub skip_text: bool,
    pub books_dir: PathBuf,
    pub images_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub timeout: Duration,
}

impl CrawlConfig {
    pub fn from_args(args: &CrawlArgs) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(&args.base_url).context("parse --base-url")?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!("--base-url must be http/https: {base_url}");
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let category = args.category.trim_matches('/');
        if category.is_empty() {
            anyhow::bail!("--category must not be empty");
        }
        let category_url = base_url
            .join(&format!("{category}/"))
            .context("build category url")?;

        let dest = args
            .dest_folder
            .as_deref()
            .map(|folder| sanitize_folder(Path::new(folder)))
            .unwrap_or_default();
        let catalog_path = match args.json_path.as_deref() {
            Some(json_path) => sanitize_folder(Path::new(json_path)),
            None => dest.join(CATALOG_FILE),
        };

        Ok(Self {
            base_url,
            category_url,
            start_page: args.start_page,
            end_page: args.end_page,
            skip_images: args.skip_imgs,
            skip_text: args.skip_txt,
            books_dir: dest.join(BOOKS_DIR),
            images_dir: dest.join(IMAGES_DIR),
            catalog_path,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }

    /// URL serving the plain-text body of a book (`?id=` is added per request).
    pub fn text_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join("txt.php")
    }

    /// Category page `page`; page 1 is the category root.
    pub fn page_url(&self, page: u32) -> Result<Url, url::ParseError> {
        if page <= 1 {
            return Ok(self.category_url.clone());
        }
        self.category_url.join(&format!("{page}/"))
    }
}
