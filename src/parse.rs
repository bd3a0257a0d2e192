//! Extraction of catalog facts from tululu.org HTML.
//!
//! Everything here is pure: callers fetch the page, build an
//! [`scraper::Html`] and pass it in together with the URL it was served from,
//! which relative links are resolved against.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ParseError;

const TITLE_AUTHOR_SEPARATOR: &str = "::";
const PLACEHOLDER_IMAGE_PATH: &str = "/images/nopic.gif";

/// Metadata scraped from a book detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPage {
    pub title: String,
    pub author: String,
    pub img_url: Url,
    pub genres: Vec<String>,
    pub comments: Vec<String>,
}

pub fn parse_book_page(doc: &Html, base: &Url) -> Result<BookPage, ParseError> {
    let (title, author) = parse_title_author(doc)?;
    Ok(BookPage {
        title,
        author,
        img_url: parse_image_url(doc, base)?,
        genres: parse_genres(doc)?,
        comments: parse_comments(doc)?,
    })
}

/// Detail-page links of a category page, in document order.
pub fn parse_book_links(doc: &Html, base: &Url) -> Result<Vec<Url>, ParseError> {
    let card = selector(".d_book")?;
    let link = selector("a[href]")?;

    let mut links = Vec::new();
    for element in doc.select(&card) {
        let Some(href) = element
            .select(&link)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        match base.join(href) {
            Ok(url) => links.push(url),
            Err(err) => tracing::debug!(href, ?err, "skipping unparsable book link"),
        }
    }
    Ok(links)
}

/// Splits the `<h1>` heading `Title :: Author`.
pub fn parse_title_author(doc: &Html) -> Result<(String, String), ParseError> {
    let heading = selector("h1")?;
    let text = doc
        .select(&heading)
        .next()
        .map(element_text)
        .ok_or_else(|| ParseError::MalformedDocument("no <h1> heading".to_owned()))?;

    let (title, author) = text.split_once(TITLE_AUTHOR_SEPARATOR).ok_or_else(|| {
        ParseError::MalformedDocument(format!(
            "heading `{text}` has no `{TITLE_AUTHOR_SEPARATOR}` separator"
        ))
    })?;
    Ok((title.trim().to_owned(), author.trim().to_owned()))
}

/// Cover image URL, or the site's placeholder image when the page has none.
pub fn parse_image_url(doc: &Html, base: &Url) -> Result<Url, ParseError> {
    let image = selector(".bookimage a img")?;
    let src = doc
        .select(&image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_PATH);

    base.join(src)
        .map_err(|err| ParseError::MalformedDocument(format!("image src `{src}`: {err}")))
}

pub fn parse_genres(doc: &Html) -> Result<Vec<String>, ParseError> {
    let genre = selector("span.d_book a")?;
    Ok(doc.select(&genre).map(element_text).collect())
}

pub fn parse_comments(doc: &Html) -> Result<Vec<String>, ParseError> {
    let comment = selector(".texts .black")?;
    Ok(doc.select(&comment).map(element_text).collect())
}

/// Highest page number listed by the pagination widget (its last link).
pub fn parse_last_page_number(doc: &Html) -> Result<u32, ParseError> {
    let page_link = selector(".center a")?;
    let last = doc
        .select(&page_link)
        .last()
        .map(element_text)
        .ok_or_else(|| ParseError::MalformedDocument("no pagination widget".to_owned()))?;

    last.parse::<u32>().map_err(|_| {
        ParseError::MalformedDocument(format!("last pagination label `{last}` is not a number"))
    })
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css)
        .map_err(|err| ParseError::MalformedDocument(format!("invalid selector `{css}`: {err}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}
