//! Request extractors: the authenticated request context and JSON bodies.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::auth::Principal;
use crate::error::ApiError;

/// Per-request context placed in request extensions by the authentication
/// middleware.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated caller.
    pub principal: Principal,
    /// Value of the `x-request-id` header, when present.
    pub request_id: Option<String>,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))
    }
}

/// JSON body whose rejections (bad syntax, wrong types, wrong content type)
/// become `400 BAD_REQUEST` in the API error format.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: Option<String>,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_parses() {
        let JsonBody(payload) = JsonBody::<Payload>::from_request(json_request(r#"{"title":"A"}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.title.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_json_body_rejections_are_bad_request() {
        for body in [r#"{"title":"#, r#"{"title": 5}"#] {
            let err = JsonBody::<Payload>::from_request(json_request(body), &())
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{}", body);
        }

        let no_content_type = Request::builder()
            .method("POST")
            .body(Body::from(r#"{"title":"A"}"#))
            .unwrap();
        let err = JsonBody::<Payload>::from_request(no_content_type, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_missing_context_is_unauthorized() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        let err = RequestContext::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
