use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tululu_fetch::cli::CrawlArgs;
use tululu_fetch::config::CrawlConfig;
use tululu_fetch::error::FetchError;
use tululu_fetch::fetch::{Fetch, FetchResponse, with_params};
use url::Url;

pub const BASE_URL: &str = "https://tululu.org/";

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Route {
    Html(String),
    Bytes(Vec<u8>),
    /// Answers with a redirect to the given URL, which then serves a page.
    Redirect(String),
    Status(u16),
}

/// In-memory stand-in for the library that records every requested URL.
#[derive(Debug, Default)]
pub struct MockSite {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &str, route: Route) {
        self.routes
            .lock()
            .expect("lock routes")
            .insert(url.to_owned(), route);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock calls").clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().expect("lock calls").clear();
    }

    pub fn was_called(&self, url: &str) -> bool {
        self.calls().iter().any(|call| call == url)
    }

    /// Serves a book whose text exists, with detail page, text and cover.
    pub fn add_book(&self, id: u32, title: &str, author: &str) {
        self.route(&text_url(id), Route::Bytes(book_text(id).into_bytes()));
        self.route(&book_url(id), Route::Html(book_page(id, title, author)));
        self.route(&image_url(id), Route::Bytes(cover_bytes(id)));
    }

    /// Serves a book whose text request is redirected to the front page.
    pub fn add_missing_book(&self, id: u32, title: &str, author: &str) {
        self.route(&text_url(id), Route::Redirect(BASE_URL.to_owned()));
        self.route(&book_url(id), Route::Html(book_page(id, title, author)));
        self.route(&image_url(id), Route::Bytes(cover_bytes(id)));
    }
}

#[async_trait]
impl Fetch for MockSite {
    async fn get(&self, url: &Url, params: &[(&str, &str)]) -> Result<FetchResponse, FetchError> {
        let requested = with_params(url, params);
        self.calls
            .lock()
            .expect("lock calls")
            .push(requested.to_string());

        let route = self
            .routes
            .lock()
            .expect("lock routes")
            .get(requested.as_str())
            .cloned();

        let ok = |final_url: Url, redirect_history: Vec<Url>, body: Vec<u8>| FetchResponse {
            url: requested.clone(),
            final_url,
            status: 200,
            redirect_history,
            body,
        };

        match route {
            Some(Route::Html(html)) => Ok(ok(requested.clone(), Vec::new(), html.into_bytes())),
            Some(Route::Bytes(bytes)) => Ok(ok(requested.clone(), Vec::new(), bytes)),
            Some(Route::Redirect(target)) => {
                let target = Url::parse(&target).expect("parse redirect target");
                Ok(ok(
                    target,
                    vec![requested.clone()],
                    b"<html><body>front page</body></html>".to_vec(),
                ))
            }
            Some(Route::Status(status)) => Err(FetchError::Status {
                url: requested.to_string(),
                status,
            }),
            None => Err(FetchError::Status {
                url: requested.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn text_url(id: u32) -> String {
    format!("{BASE_URL}txt.php?id={id}")
}

pub fn book_url(id: u32) -> String {
    format!("{BASE_URL}b{id}/")
}

pub fn image_url(id: u32) -> String {
    format!("{BASE_URL}shots/{id}.jpg")
}

#[allow(dead_code)]
pub fn page_url(page: u32) -> String {
    if page <= 1 {
        format!("{BASE_URL}l55/")
    } else {
        format!("{BASE_URL}l55/{page}/")
    }
}

pub fn book_text(id: u32) -> String {
    format!("Текст книги номер {id}.\n")
}

pub fn cover_bytes(id: u32) -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, id as u8]
}

pub fn book_page(id: u32, title: &str, author: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <body>
    <h1>{title} &nbsp; :: &nbsp; {author}</h1>
    <div class="bookimage"><a href="/b{id}/"><img src="/shots/{id}.jpg" alt=""></a></div>
    <span class="d_book">Жанр книги: <a href="/l55/">Научная фантастика</a></span>
    <div class="texts"><b>Reader</b><br><span class="black">Комментарий к книге {id}</span></div>
  </body>
</html>
"#
    )
}

/// A category page listing `ids`; `last_page` adds a pagination widget.
pub fn category_page(ids: &[u32], last_page: Option<u32>) -> String {
    let mut html = String::from("<!doctype html>\n<html>\n  <body>\n");
    for id in ids {
        html.push_str(&format!(
            "    <table class=\"d_book\"><tr><td><a href=\"/b{id}/\">Book {id}</a></td></tr></table>\n"
        ));
    }
    if let Some(last) = last_page {
        html.push_str("    <p class=\"center\">");
        for page in 1..=last {
            html.push_str(&format!("<a href=\"/l55/{page}/\">{page}</a> "));
        }
        html.push_str("</p>\n");
    }
    html.push_str("  </body>\n</html>\n");
    html
}

pub fn args(dest: &Path) -> CrawlArgs {
    CrawlArgs {
        start_page: None,
        end_page: None,
        skip_imgs: false,
        skip_txt: false,
        dest_folder: Some(dest.to_string_lossy().into_owned()),
        json_path: None,
        print_paths: false,
        base_url: BASE_URL.to_owned(),
        category: "l55".to_owned(),
        timeout_secs: 5,
    }
}

pub fn config(args: &CrawlArgs) -> CrawlConfig {
    CrawlConfig::from_args(args).expect("build crawl config")
}
