// Graph API repository implementation
use crate::application::graph_repository::{GraphError, GraphRepository, GraphResult};
use crate::domain::graph_request::GraphRequest;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

#[derive(Debug, Clone)]
pub struct GraphApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GraphApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, request: &GraphRequest) -> String {
        format!("{}/{}", self.base_url, request.path())
    }
}

#[async_trait]
impl GraphRepository for GraphApiClient {
    async fn fetch(&self, access_token: &str, request: &GraphRequest) -> GraphResult<Value> {
        let url = self.url(request);
        tracing::debug!(url = %url, params = ?request.params, "Graph API request");

        let response = self
            .client
            .get(&url)
            .query(&request.params)
            .query(&[("access_token", access_token)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GraphError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Graph errors look like {"error": {"message": ..., "code": ...}}
            let body = response.json::<Value>().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.pointer("/error/message"))
                .and_then(Value::as_str)
                .map(String::from);
            tracing::warn!(url = %url, status = status.as_u16(), ?message, "Graph API returned an error");
            return Err(GraphError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GraphError::Decode(e.without_url().to_string()))
    }
}
