// Meta service - Per-platform Graph API lookups with default metric and field lists
use crate::application::graph_repository::{GraphRepository, GraphResult};
use crate::domain::graph_request::{
    DEFAULT_LIMIT, DEFAULT_PERIOD, FACEBOOK_INSIGHT_METRICS, FACEBOOK_POST_FIELDS,
    GraphRequest, INSTAGRAM_INSIGHT_METRICS, INSTAGRAM_MEDIA_FIELDS, MESSENGER_INSIGHT_METRICS,
    NODE_FIELDS, THREADS_FIELDS,
};
use crate::domain::platform::Platform;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct MetaService {
    repository: Arc<dyn GraphRepository>,
}

impl MetaService {
    pub fn new(repository: Arc<dyn GraphRepository>) -> Self {
        Self { repository }
    }

    /// Insights for a Facebook page, Instagram business account or Messenger page.
    /// Threads has no insights edge; it is served by [`MetaService::threads`].
    pub async fn insights(
        &self,
        platform: Platform,
        access_token: &str,
        node_id: &str,
        metric: Option<String>,
        period: Option<String>,
    ) -> GraphResult<Value> {
        let default_metric = match platform {
            Platform::Facebook => FACEBOOK_INSIGHT_METRICS,
            Platform::Instagram => INSTAGRAM_INSIGHT_METRICS,
            Platform::Messenger => MESSENGER_INSIGHT_METRICS,
            Platform::Threads => return self.threads(access_token, node_id).await,
        };

        let request = GraphRequest::insights(
            node_id,
            metric.unwrap_or_else(|| default_metric.to_string()),
            period.unwrap_or_else(|| DEFAULT_PERIOD.to_string()),
        );
        tracing::debug!(%platform, node = node_id, "fetching insights");
        self.repository.fetch(access_token, &request).await
    }

    pub async fn facebook_posts(
        &self,
        access_token: &str,
        page_id: &str,
        fields: Option<String>,
        limit: Option<String>,
    ) -> GraphResult<Value> {
        let request = GraphRequest::edge(
            page_id,
            "posts",
            fields.unwrap_or_else(|| FACEBOOK_POST_FIELDS.to_string()),
            Some(limit.unwrap_or_else(|| DEFAULT_LIMIT.to_string())),
        );
        tracing::debug!(node = page_id, "fetching facebook posts");
        self.repository.fetch(access_token, &request).await
    }

    pub async fn instagram_media(
        &self,
        access_token: &str,
        user_id: &str,
        fields: Option<String>,
        limit: Option<String>,
    ) -> GraphResult<Value> {
        let request = GraphRequest::edge(
            user_id,
            "media",
            fields.unwrap_or_else(|| INSTAGRAM_MEDIA_FIELDS.to_string()),
            Some(limit.unwrap_or_else(|| DEFAULT_LIMIT.to_string())),
        );
        tracing::debug!(node = user_id, "fetching instagram media");
        self.repository.fetch(access_token, &request).await
    }

    pub async fn threads(&self, access_token: &str, user_id: &str) -> GraphResult<Value> {
        let request = GraphRequest::edge(user_id, "threads", THREADS_FIELDS, None);
        tracing::debug!(node = user_id, "fetching threads");
        self.repository.fetch(access_token, &request).await
    }

    pub async fn node_info(
        &self,
        access_token: &str,
        id: &str,
        fields: Option<String>,
    ) -> GraphResult<Value> {
        let request = GraphRequest::node(id, fields.unwrap_or_else(|| NODE_FIELDS.to_string()));
        self.repository.fetch(access_token, &request).await
    }
}
