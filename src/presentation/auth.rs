// Access token extraction
use crate::presentation::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Deserialize;

/// Caller's Graph API token: the second word of `Authorization`
/// (`Bearer <token>`), else the `access_token` query parameter
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken(pub String);

#[derive(Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(' ').nth(1))
            .filter(|t| !t.is_empty())
            .map(String::from);

        let token = from_header.or_else(|| {
            Query::<TokenQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(q)| q.access_token)
                .filter(|t| !t.is_empty())
        });

        match token {
            Some(token) => Ok(AccessToken(token)),
            None => {
                tracing::debug!(path = parts.uri.path(), "request without access token");
                Err(ApiError::MissingToken)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str, authorization: Option<&str>) -> Result<AccessToken, ApiError> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AccessToken::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_header_wins_over_query() {
        let token = extract("/x?access_token=query", Some("Bearer header"))
            .await
            .unwrap();
        assert_eq!(token, AccessToken("header".into()));
    }

    #[tokio::test]
    async fn test_query_fallback() {
        let token = extract("/x?access_token=query", None).await.unwrap();
        assert_eq!(token.0, "query");

        let token = extract("/x?access_token=query", Some("Bearer")).await.unwrap();
        assert_eq!(token.0, "query");
    }

    #[tokio::test]
    async fn test_missing_token() {
        assert!(matches!(
            extract("/x", None).await,
            Err(ApiError::MissingToken)
        ));
        assert!(matches!(
            extract("/x?access_token=", Some("Bearer ")).await,
            Err(ApiError::MissingToken)
        ));
    }
}
