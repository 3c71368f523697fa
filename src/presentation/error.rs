// API errors rendered as `{error, details?}` JSON
use crate::application::dashboard_service::AggregationError;
use crate::application::graph_repository::GraphError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access token required")]
    MissingToken,

    #[error("{context}")]
    Upstream {
        context: &'static str,
        source: GraphError,
        /// Shown when upstream gave no message of its own
        fallback_details: Option<&'static str>,
    },

    #[error("Failed to fetch dashboard data")]
    Aggregation(#[from] AggregationError),
}

impl ApiError {
    pub fn upstream(context: &'static str, source: GraphError) -> Self {
        ApiError::Upstream {
            context,
            source,
            fallback_details: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, None),
            ApiError::Upstream {
                source,
                fallback_details,
                ..
            } => (
                StatusCode::from_u16(source.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                source
                    .upstream_message()
                    .or(*fallback_details)
                    .map(String::from),
            ),
            ApiError::Aggregation(e) => (StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string())),
        };

        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
