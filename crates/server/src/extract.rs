//! Body and query extractors whose rejections render as [`ServerError`].
//!
//! axum's own extractors answer with plain-text bodies and statuses such as
//! 415 or 422; every malformed request here is a 400 `{"error": ...}`.

use axum::{
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};

use crate::ServerError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServerError))]
pub struct Query<T>(pub T);

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        id: i32,
    }

    #[tokio::test]
    async fn mistyped_json_is_a_bad_request() {
        let request = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":"abc"}"#))
            .unwrap();
        let Err(err) = Json::<Payload>::from_request(request, &()).await else {
            panic!("expected a rejection");
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn json_without_content_type_is_a_bad_request() {
        let request = Request::builder()
            .body(Body::from(r#"{"id":1}"#))
            .unwrap();
        let Err(err) = Json::<Payload>::from_request(request, &()).await else {
            panic!("expected a rejection");
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
