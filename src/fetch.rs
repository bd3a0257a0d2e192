use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, LOCATION};
use url::Url;

use crate::error::FetchError;

const USER_AGENT: &str = "tululu-fetch/0.1";
const MAX_REDIRECTS: usize = 10;

/// A completed GET request.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL that was requested, query parameters included.
    pub url: Url,
    pub final_url: Url,
    pub status: u16,
    /// Every URL that answered with a redirect, in the order they were visited.
    pub redirect_history: Vec<Url>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// GET-only access to the remote site.
///
/// Implementations must report redirects in `redirect_history` rather than
/// hiding them behind the final status, and must treat a non-2xx final status
/// as `FetchError::Status`.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &Url, params: &[(&str, &str)]) -> Result<FetchResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &Url, params: &[(&str, &str)]) -> Result<FetchResponse, FetchError> {
        let requested = with_params(url, params);
        let mut current = requested.clone();
        let mut redirect_history = Vec::new();

        loop {
            tracing::debug!(url = %current, "GET");
            let response = self
                .client
                .get(current.clone())
                .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: current.to_string(),
                    source,
                })?;

            let status = response.status();
            if status.is_redirection() {
                if redirect_history.len() >= MAX_REDIRECTS {
                    return Err(FetchError::TooManyRedirects {
                        url: requested.to_string(),
                        limit: MAX_REDIRECTS,
                    });
                }
                let next = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|location| current.join(location).ok())
                    .ok_or_else(|| FetchError::BadRedirect {
                        url: current.to_string(),
                    })?;
                redirect_history.push(current);
                current = next;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::Status {
                    url: current.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|source| FetchError::Transport {
                    url: current.to_string(),
                    source,
                })?;

            return Ok(FetchResponse {
                url: requested,
                final_url: current,
                status: status.as_u16(),
                redirect_history,
                body: body.to_vec(),
            });
        }
    }
}

pub fn with_params(url: &Url, params: &[(&str, &str)]) -> Url {
    let mut url = url.clone();
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    url
}
