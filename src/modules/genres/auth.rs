use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::routes::GenresState;
use catalog_http::error::AppError;

/// Proof that the request carried an accepted `Authorization` credential.
///
/// Extracted from the request head, so it is checked before any body
/// extractor runs.
#[derive(Debug, Clone, Copy)]
pub struct GenreWriter;

impl FromRequestParts<GenresState> for GenreWriter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &GenresState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Err(AppError::unauthorized("missing Authorization header"));
        };

        let accepted = header
            .to_str()
            .map(|credential| state.authenticator.verify(credential))
            .unwrap_or(false);

        if accepted {
            Ok(GenreWriter)
        } else {
            tracing::warn!(target: "catalog.genres", "rejected genre write credential");
            Err(AppError::unauthorized("invalid Authorization credential"))
        }
    }
}
