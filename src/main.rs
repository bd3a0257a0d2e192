use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser as _;

use tululu_fetch::config::CrawlConfig;
use tululu_fetch::fetch::HttpFetcher;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    tululu_fetch::logging::init().context("init logging")?;

    let cli = tululu_fetch::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = CrawlConfig::from_args(&cli.crawl).context("resolve configuration")?;
    if cli.crawl.print_paths {
        println!("books: {}", config.books_dir.display());
        println!("images: {}", config.images_dir.display());
        println!("catalog: {}", config.catalog_path.display());
    }

    let fetcher = HttpFetcher::new(config.timeout).context("build http client")?;
    let summary = tululu_fetch::paginate::run(Arc::new(fetcher), &config)
        .await
        .context("crawl")?;

    println!(
        "downloaded {}, already cataloged {}, missing {}, failed {} (pages crawled {}, pages failed {})",
        summary.books.downloaded,
        summary.books.already_cataloged,
        summary.books.missing,
        summary.books.failed,
        summary.pages_crawled,
        summary.pages_failed,
    );

    Ok(())
}
