//! Request extractors shared by module routes.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor whose rejections are reported as [`AppError`].
///
/// A body that parses but has the wrong shape is a validation error; a body
/// that is not JSON at all (or lacks the JSON content type) is a bad request.
/// Both map to 400 instead of axum's default 415/422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(map_rejection(rejection)),
        }
    }
}

fn map_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => AppError::validation(vec![], err.body_text()),
        other => AppError::bad_request(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::IntoResponse,
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        count: u32,
    }

    async fn echo(ApiJson(payload): ApiJson<Payload>) -> impl IntoResponse {
        payload.count.to_string()
    }

    fn app() -> Router {
        Router::new().route("/", post(echo))
    }

    async fn send(body: &str, content_type: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        app()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn accepts_well_formed_body() {
        assert_eq!(
            send(r#"{"count": 3}"#, Some("application/json")).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn wrong_shape_is_bad_request() {
        assert_eq!(
            send(r#"{"count": "three"}"#, Some("application/json")).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn syntax_error_is_bad_request() {
        assert_eq!(
            send("{count", Some("application/json")).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        assert_eq!(send(r#"{"count": 3}"#, None).await, StatusCode::BAD_REQUEST);
    }
}
