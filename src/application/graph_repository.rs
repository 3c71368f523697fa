// Repository trait for Graph API access
use crate::domain::graph_request::GraphRequest;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    /// Upstream answered with a non-success status
    #[error("Graph API returned status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    #[error("Graph API request failed: {0}")]
    Transport(String),
    #[error("Graph API returned an unreadable body: {0}")]
    Decode(String),
}

impl GraphError {
    /// Status to relay to our own caller
    pub fn status(&self) -> u16 {
        match self {
            GraphError::Status { status, .. } => *status,
            _ => 500,
        }
    }

    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            GraphError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

#[async_trait]
pub trait GraphRepository: Send + Sync {
    /// Issue one GET against the Graph API on behalf of `access_token`
    async fn fetch(&self, access_token: &str, request: &GraphRequest) -> GraphResult<Value>;
}
