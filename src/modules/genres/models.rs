use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modules::support::Violations;
use catalog_http::error::AppError;

/// A book, always stored inside the genre its `genre_id` names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Globally unique identifier
    pub id: u64,
    pub title: String,
    pub author: String,
    /// Owning genre
    pub genre_id: u64,
}

/// A genre and the books filed under it, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
    pub books: Vec<Book>,
}

/// Request body for `POST /genres/{genre_id}/books`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre_id: Option<u64>,
}

/// Validated book fields; the owning genre comes from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

impl BookDraft {
    /// Validate against the genre named by the request path.
    pub fn validate(self, path_genre_id: u64) -> Result<NewBook, AppError> {
        let mut violations = Violations::new();

        let title = violations.required("title", self.title);
        let author = violations.required("author", self.author);
        if matches!(self.genre_id, Some(id) if id != path_genre_id) {
            violations.push("genreId", "must match the genre in the path");
        }

        violations.into_result("invalid book")?;

        match (title, author) {
            (Some(title), Some(author)) => Ok(NewBook { title, author }),
            _ => Err(AppError::validation(vec![], "invalid book")),
        }
    }
}

/// Partial update for `PATCH /genres/{genre_id}/books/{book_id}`.
///
/// Unknown body fields are ignored, so a body made only of them arrives here
/// as an empty patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre_id: Option<u64>,
}

impl BookPatch {
    /// No recognized field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.genre_id.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::validation(
                vec![serde_json::json!({
                    "field": "body",
                    "error": "expected at least one of title, author, genreId"
                })],
                "no updatable book property in request body",
            ));
        }

        let mut violations = Violations::new();
        violations.optional("title", self.title.as_deref());
        violations.optional("author", self.author.as_deref());
        violations.into_result("invalid book update")
    }

    /// Apply the supplied fields; the id never changes.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(genre_id) = self.genre_id {
            book.genre_id = genre_id;
        }
    }
}

/// Validated genre fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

impl NewGenre {
    /// Genre creation accepts any JSON body once authorized; a string `name`
    /// is used when present.
    pub fn from_body(body: &Value) -> Self {
        let name = body
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book() -> Book {
        Book {
            id: 1,
            title: "Pride and Prejudice".into(),
            author: "Jane Austen".into(),
            genre_id: 1,
        }
    }

    #[test]
    fn book_serializes_camel_case() {
        let json = serde_json::to_value(book()).unwrap();
        assert_eq!(
            json,
            json!({"id": 1, "title": "Pride and Prejudice", "author": "Jane Austen", "genreId": 1})
        );
    }

    #[test]
    fn patch_of_unknown_fields_is_empty() {
        let patch: BookPatch =
            serde_json::from_value(json!({"nameofbook": "BookOne", "name": "Author", "num": 3}))
                .unwrap();
        assert!(patch.is_empty());
        assert!(patch.validate().is_err());
    }

    #[test]
    fn patch_applies_only_supplied_fields() {
        let patch: BookPatch = serde_json::from_value(json!({"title": "CoolBook"})).unwrap();
        patch.validate().unwrap();

        let mut target = book();
        patch.apply_to(&mut target);
        assert_eq!(target.id, 1);
        assert_eq!(target.title, "CoolBook");
        assert_eq!(target.author, "Jane Austen");
        assert_eq!(target.genre_id, 1);
    }

    #[test]
    fn patch_rejects_blank_values() {
        let patch = BookPatch {
            author: Some(" ".into()),
            ..BookPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn draft_without_author_is_invalid() {
        let draft: BookDraft =
            serde_json::from_value(json!({"title": "FunBook", "genreId": 2})).unwrap();
        match draft.validate(2).unwrap_err() {
            AppError::Validation { details, .. } => {
                assert_eq!(details, vec![json!({"field": "author", "error": "required"})]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn draft_genre_must_match_path() {
        let draft: BookDraft =
            serde_json::from_value(json!({"title": "FunBook", "author": "A", "genreId": 3}))
                .unwrap();
        assert!(draft.validate(2).is_err());
    }

    #[test]
    fn genre_name_is_optional() {
        assert_eq!(NewGenre::from_body(&json!({"name": "Poetry"})).name, "Poetry");
        assert_eq!(NewGenre::from_body(&json!({"some_number": "x"})).name, "");
        assert_eq!(NewGenre::from_body(&json!([1, 2])).name, "");
    }
}
