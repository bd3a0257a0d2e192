use crate::fetch::FetchResponse;

/// Whether a requested text artifact is actually served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Exists,
    Missing,
}

/// The library answers a request for an absent text with a redirect to its
/// front page, never with a 404, so any redirect means the text is missing.
pub fn check(response: &FetchResponse) -> Existence {
    if response.redirect_history.is_empty() {
        Existence::Exists
    } else {
        Existence::Missing
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn response(redirect_history: Vec<Url>) -> FetchResponse {
        let url = Url::parse("https://tululu.org/txt.php?id=1").expect("parse url");
        FetchResponse {
            url: url.clone(),
            final_url: url,
            status: 200,
            redirect_history,
            body: b"text".to_vec(),
        }
    }

    #[test]
    fn direct_response_exists() {
        assert_eq!(check(&response(Vec::new())), Existence::Exists);
    }

    #[test]
    fn redirected_response_is_missing() {
        let hop = Url::parse("https://tululu.org/txt.php?id=1").expect("parse url");
        assert_eq!(check(&response(vec![hop])), Existence::Missing);
    }
}
