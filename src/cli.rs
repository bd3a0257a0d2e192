use clap::Parser;

/// Download science fiction books from the tululu.org online library.
///
/// Pages `[start-page, end-page)` of the category are crawled. Without any
/// page options pages 1..=10 are crawled; with only `--start-page` the crawl
/// runs to the last page listed on the category page.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub crawl: CrawlArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CrawlArgs {
    /// First category page to crawl.
    #[arg(long, short = 's', value_parser = clap::value_parser!(u32).range(1..))]
    pub start_page: Option<u32>,

    /// Category page to stop before (exclusive).
    #[arg(long, short = 'e', value_parser = clap::value_parser!(u32).range(1..))]
    pub end_page: Option<u32>,

    /// Do not download cover images.
    #[arg(long)]
    pub skip_imgs: bool,

    /// Do not download book texts.
    #[arg(long)]
    pub skip_txt: bool,

    /// Folder that receives `books/`, `images/` and the default `books.json`.
    #[arg(long)]
    pub dest_folder: Option<String>,

    /// Catalog file path (default: `<dest-folder>/books.json`).
    #[arg(long)]
    pub json_path: Option<String>,

    /// Print the resolved destination paths.
    #[arg(long)]
    pub print_paths: bool,

    /// Library root URL (must be http/https).
    #[arg(long, default_value = "https://tululu.org/")]
    pub base_url: String,

    /// Category path below the library root.
    #[arg(long, default_value = "l55")]
    pub category: String,

    /// Per-request timeout.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
