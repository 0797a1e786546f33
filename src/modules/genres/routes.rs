use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::auth::GenreWriter;
use super::models::{Book, BookDraft, BookPatch, Genre, NewGenre};
use super::store::{GenreError, GenreStore};
use crate::modules::support::parse_id;
use catalog_authz::SharedAuthenticator;
use catalog_http::{error::AppError, extract::ApiJson};

/// State shared by the genre and book handlers
#[derive(Clone)]
pub struct GenresState {
    pub store: Arc<GenreStore>,
    pub authenticator: SharedAuthenticator,
}

pub fn router(state: GenresState) -> Router {
    let shelf = get(list_genre_books).post(create_book);

    Router::new()
        .route("/books", get(list_books))
        .route("/genres", get(list_genres).post(create_genre))
        .route("/genres/{genre_id}/books", shelf.clone())
        .route("/genres/{genre_id}/books/", shelf)
        .route(
            "/genres/{genre_id}/books/{book_id}",
            get(get_book).patch(update_book),
        )
        .with_state(state)
}

async fn list_books(State(state): State<GenresState>) -> Json<Vec<Book>> {
    Json(state.store.list_books().await)
}

async fn list_genres(State(state): State<GenresState>) -> Json<Vec<Genre>> {
    Json(state.store.list_genres().await)
}

async fn create_genre(
    State(state): State<GenresState>,
    _writer: GenreWriter,
    body: Bytes,
) -> (StatusCode, Json<Genre>) {
    // Once authorized, any body is accepted; unreadable JSON counts as empty.
    let body = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    let genre = state.store.create_genre(NewGenre::from_body(&body)).await;
    (StatusCode::CREATED, Json(genre))
}

async fn list_genre_books(
    State(state): State<GenresState>,
    Path(genre_id): Path<String>,
) -> Result<Json<Vec<Book>>, AppError> {
    let genre_id = parse_id(&genre_id, "genre")?;
    Ok(Json(state.store.books_in(genre_id).await?))
}

async fn create_book(
    State(state): State<GenresState>,
    Path(genre_id): Path<String>,
    body: Result<ApiJson<BookDraft>, AppError>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let genre_id = parse_id(&genre_id, "genre")?;
    if !state.store.contains_genre(genre_id).await {
        return Err(GenreError::GenreNotFound(genre_id).into());
    }

    let ApiJson(draft) = body?;
    let fields = draft.validate(genre_id)?;
    let book = state.store.create_book(genre_id, fields).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn get_book(
    State(state): State<GenresState>,
    Path((genre_id, book_id)): Path<(String, String)>,
) -> Result<Json<Book>, AppError> {
    let (genre_id, book_id) = scoped_ids(&genre_id, &book_id)?;
    Ok(Json(state.store.get_book(genre_id, book_id).await?))
}

async fn update_book(
    State(state): State<GenresState>,
    Path((genre_id, book_id)): Path<(String, String)>,
    body: Result<ApiJson<BookPatch>, AppError>,
) -> Result<Json<Book>, AppError> {
    let (genre_id, book_id) = scoped_ids(&genre_id, &book_id)?;

    // Resolve the scope first so a mismatched genre is a 404 whatever the body.
    state.store.get_book(genre_id, book_id).await?;
    let ApiJson(patch) = body?;
    patch.validate()?;

    Ok(Json(
        state.store.update_book(genre_id, book_id, &patch).await?,
    ))
}

fn scoped_ids(genre_id: &str, book_id: &str) -> Result<(u64, u64), AppError> {
    Ok((parse_id(genre_id, "genre")?, parse_id(book_id, "book")?))
}
