use serde::{Deserialize, Serialize};

use crate::book_id::BookId;

/// One downloaded book as stored in `books.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredBookRecord")]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub img_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_path: Option<String>,
    pub genres: Vec<String>,
    pub comments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_path: Option<String>,
}

/// On-disk shape, accepting catalogs written before records carried an `id`.
#[derive(Debug, Deserialize)]
struct StoredBookRecord {
    #[serde(default)]
    id: Option<BookId>,
    title: String,
    author: String,
    img_url: String,
    #[serde(default)]
    img_path: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    comments: Vec<String>,
    #[serde(default)]
    book_path: Option<String>,
}

impl TryFrom<StoredBookRecord> for BookRecord {
    type Error = String;

    fn try_from(stored: StoredBookRecord) -> Result<Self, Self::Error> {
        let id = match (stored.id, stored.book_path.as_deref()) {
            (Some(id), _) => id,
            (None, Some(book_path)) => {
                BookId::from_book_path(book_path).map_err(|err| err.to_string())?
            }
            (None, None) => {
                return Err(format!(
                    "record `{}` has neither `id` nor `book_path`",
                    stored.title
                ));
            }
        };

        Ok(Self {
            id,
            title: stored.title,
            author: stored.author,
            img_url: stored.img_url,
            img_path: stored.img_path,
            genres: stored.genres,
            comments: stored.comments,
            book_path: stored.book_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_record_recovers_id_from_book_path() -> anyhow::Result<()> {
        let json = r#"{
            "title": "Я, робот",
            "author": "Азимов Айзек",
            "img_url": "https://tululu.org/shots/42.jpg",
            "genres": ["Научная фантастика"],
            "comments": [],
            "book_path": "books/42. Азимов Айзек - Я, робот.txt"
        }"#;
        let record: BookRecord = serde_json::from_str(json)?;
        assert_eq!(record.id, BookId::new(42));
        assert_eq!(record.img_path, None);
        Ok(())
    }

    #[test]
    fn record_without_any_identifier_is_rejected() {
        let json = r#"{"title": "t", "author": "a", "img_url": "u", "genres": [], "comments": []}"#;
        let err = serde_json::from_str::<BookRecord>(json).expect_err("must reject");
        assert!(err.to_string().contains("neither `id` nor `book_path`"));
    }

    #[test]
    fn optional_paths_are_omitted_when_absent() -> anyhow::Result<()> {
        let record = BookRecord {
            id: BookId::new(1),
            title: "t".to_owned(),
            author: "a".to_owned(),
            img_url: "https://tululu.org/images/nopic.gif".to_owned(),
            img_path: None,
            genres: Vec::new(),
            comments: Vec::new(),
            book_path: None,
        };
        let value = serde_json::to_value(&record)?;
        assert!(value.get("img_path").is_none());
        assert!(value.get("book_path").is_none());
        assert_eq!(value["id"], 1);
        Ok(())
    }
}
