// Client-side port for talking to the dashboard API
use crate::domain::platform::Platform;
use crate::domain::settings::DashboardSettings;
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Every method returns the raw Graph payload unwrapped from the server's
/// `{platform, <id>, data}` envelope.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn snapshot(&self, settings: &DashboardSettings) -> ClientResult<DashboardSnapshot>;

    /// Threads is read through its placeholder endpoint
    async fn insights(&self, settings: &DashboardSettings, platform: Platform)
    -> ClientResult<Value>;

    async fn facebook_posts(&self, settings: &DashboardSettings, limit: u32)
    -> ClientResult<Value>;

    async fn instagram_media(&self, settings: &DashboardSettings, limit: u32)
    -> ClientResult<Value>;
}
