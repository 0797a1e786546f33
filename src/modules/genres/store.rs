//! In-memory genres, each holding its books.

use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Book, BookPatch, Genre, NewBook, NewGenre};
use catalog_http::error::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenreError {
    #[error("genre {0} not found")]
    GenreNotFound(u64),

    /// The book is absent, or filed under a different genre than the path.
    #[error("book {book_id} not found in genre {genre_id}")]
    BookNotFound { genre_id: u64, book_id: u64 },

    /// A patch tried to move a book into a genre that does not exist.
    #[error("genre {0} does not exist")]
    UnknownTargetGenre(u64),
}

impl From<GenreError> for AppError {
    fn from(err: GenreError) -> Self {
        match err {
            GenreError::UnknownTargetGenre(_) => {
                AppError::invalid_field("genreId", "unknown genre", err.to_string())
            }
            GenreError::GenreNotFound(_) | GenreError::BookNotFound { .. } => {
                AppError::not_found(err.to_string())
            }
        }
    }
}

/// Genres and their books behind one lock. Book ids are global across
/// genres.
#[derive(Debug)]
pub struct GenreStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Clone)]
struct Inner {
    genres: Vec<Genre>,
    next_genre_id: u64,
    next_book_id: u64,
}

impl Inner {
    fn fixture() -> Self {
        let genres = vec![
            genre(1, "Classics", book(1, "Pride and Prejudice", "Jane Austen", 1)),
            genre(2, "Science Fiction", book(2, "Dune", "Frank Herbert", 2)),
            genre(
                3,
                "Mystery",
                book(3, "The Hound of the Baskervilles", "Arthur Conan Doyle", 3),
            ),
        ];

        Self {
            next_genre_id: genres.iter().map(|g| g.id).max().unwrap_or(0) + 1,
            next_book_id: genres
                .iter()
                .flat_map(|g| g.books.iter().map(|b| b.id))
                .max()
                .unwrap_or(0)
                + 1,
            genres,
        }
    }

    fn genre_index(&self, genre_id: u64) -> Option<usize> {
        self.genres.iter().position(|genre| genre.id == genre_id)
    }

    /// Locate a book by id, then keep it only if it belongs to `genre_id`.
    fn scoped_book(&self, genre_id: u64, book_id: u64) -> Result<(usize, usize), GenreError> {
        self.genres
            .iter()
            .enumerate()
            .find_map(|(g, genre)| {
                genre
                    .books
                    .iter()
                    .position(|book| book.id == book_id)
                    .map(|b| (g, b))
            })
            .filter(|&(g, b)| self.genres[g].books[b].genre_id == genre_id)
            .ok_or(GenreError::BookNotFound { genre_id, book_id })
    }
}

impl GenreStore {
    /// Create a store seeded with the fixture data.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::fixture()),
        }
    }

    /// Restore fixture contents and id counters.
    pub async fn reset(&self) {
        *self.inner.write().await = Inner::fixture();
        tracing::info!(target: "catalog.genres", "genre store reset to fixture");
    }

    pub async fn list_genres(&self) -> Vec<Genre> {
        self.inner.read().await.genres.clone()
    }

    /// Every book, in genre order then shelf order.
    pub async fn list_books(&self) -> Vec<Book> {
        self.inner
            .read()
            .await
            .genres
            .iter()
            .flat_map(|genre| genre.books.iter().cloned())
            .collect()
    }

    pub async fn books_in(&self, genre_id: u64) -> Result<Vec<Book>, GenreError> {
        let inner = self.inner.read().await;
        let index = inner
            .genre_index(genre_id)
            .ok_or(GenreError::GenreNotFound(genre_id))?;
        Ok(inner.genres[index].books.clone())
    }

    pub async fn contains_genre(&self, genre_id: u64) -> bool {
        self.inner.read().await.genre_index(genre_id).is_some()
    }

    pub async fn get_book(&self, genre_id: u64, book_id: u64) -> Result<Book, GenreError> {
        let inner = self.inner.read().await;
        let (g, b) = inner.scoped_book(genre_id, book_id)?;
        Ok(inner.genres[g].books[b].clone())
    }

    pub async fn create_book(&self, genre_id: u64, fields: NewBook) -> Result<Book, GenreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .genre_index(genre_id)
            .ok_or(GenreError::GenreNotFound(genre_id))?;

        let book = Book {
            id: inner.next_book_id,
            title: fields.title,
            author: fields.author,
            genre_id,
        };
        inner.next_book_id += 1;
        inner.genres[index].books.push(book.clone());

        tracing::debug!(target: "catalog.genres", id = book.id, genre_id, "book created");
        Ok(book)
    }

    /// Apply a partial update to a book resolved under `genre_id`.
    ///
    /// A changed `genre_id` moves the book to the end of the target genre.
    /// Nothing is modified when an error is returned.
    pub async fn update_book(
        &self,
        genre_id: u64,
        book_id: u64,
        patch: &BookPatch,
    ) -> Result<Book, GenreError> {
        let mut inner = self.inner.write().await;
        let (g, b) = inner.scoped_book(genre_id, book_id)?;

        let target = match patch.genre_id {
            Some(target_id) if target_id != genre_id => Some(
                inner
                    .genre_index(target_id)
                    .ok_or(GenreError::UnknownTargetGenre(target_id))?,
            ),
            _ => None,
        };

        let updated = match target {
            Some(target) => {
                let mut book = inner.genres[g].books.remove(b);
                patch.apply_to(&mut book);
                inner.genres[target].books.push(book.clone());
                book
            }
            None => {
                let book = &mut inner.genres[g].books[b];
                patch.apply_to(book);
                book.clone()
            }
        };

        tracing::debug!(
            target: "catalog.genres",
            id = updated.id,
            genre_id = updated.genre_id,
            "book updated"
        );
        Ok(updated)
    }

    pub async fn create_genre(&self, fields: NewGenre) -> Genre {
        let mut inner = self.inner.write().await;
        let genre = Genre {
            id: inner.next_genre_id,
            name: fields.name,
            books: Vec::new(),
        };
        inner.next_genre_id += 1;
        inner.genres.push(genre.clone());

        tracing::debug!(target: "catalog.genres", id = genre.id, "genre created");
        genre
    }
}

impl Default for GenreStore {
    fn default() -> Self {
        Self::new()
    }
}

fn genre(id: u64, name: &str, book: Book) -> Genre {
    Genre {
        id,
        name: name.to_string(),
        books: vec![book],
    }
}

fn book(id: u64, title: &str, author: &str, genre_id: u64) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        genre_id,
    }
}
