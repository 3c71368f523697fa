// HTTP client for the dashboard API served by this crate
use crate::application::dashboard_api::{ClientError, ClientResult, DashboardApi};
use crate::domain::platform::Platform;
use crate::domain::settings::DashboardSettings;
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    client: reqwest::Client,
    /// e.g. `http://127.0.0.1:8080/api/meta`
    base_url: String,
}

impl HttpDashboardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        settings: &DashboardSettings,
        query: &[(&str, String)],
    ) -> ClientResult<Value> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&settings.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Malformed(e.to_string()))
    }

    /// Strips the `{platform, <id>, data}` envelope
    async fn get_data(
        &self,
        path: &str,
        settings: &DashboardSettings,
        query: &[(&str, String)],
    ) -> ClientResult<Value> {
        match self.get_json(path, settings, query).await? {
            Value::Object(mut body) => body
                .remove("data")
                .ok_or_else(|| ClientError::Malformed("missing data field".to_string())),
            other => Err(ClientError::Malformed(format!(
                "expected an object, got {}",
                other
            ))),
        }
    }
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn snapshot(&self, settings: &DashboardSettings) -> ClientResult<DashboardSnapshot> {
        let path = format!(
            "dashboard/{}/{}",
            segment(&settings.page_id),
            segment(&settings.user_id)
        );
        let body = self.get_json(&path, settings, &[]).await?;
        serde_json::from_value(body).map_err(|e| ClientError::Malformed(e.to_string()))
    }

    async fn insights(
        &self,
        settings: &DashboardSettings,
        platform: Platform,
    ) -> ClientResult<Value> {
        let path = format!(
            "{}/insights/{}",
            platform,
            segment(settings.node_id(platform))
        );
        self.get_data(&path, settings, &[]).await
    }

    async fn facebook_posts(
        &self,
        settings: &DashboardSettings,
        limit: u32,
    ) -> ClientResult<Value> {
        let path = format!("facebook/posts/{}", segment(&settings.page_id));
        self.get_data(&path, settings, &[("limit", limit.to_string())])
            .await
    }

    async fn instagram_media(
        &self,
        settings: &DashboardSettings,
        limit: u32,
    ) -> ClientResult<Value> {
        let path = format!("instagram/media/{}", segment(&settings.user_id));
        self.get_data(&path, settings, &[("limit", limit.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::graph_repository::GraphError;
    use crate::application::graph_repository::testing::StubGraphRepository;
    use crate::presentation::app_state::AppState;
    use crate::presentation::router::build_router;
    use crate::presentation::router::testing::spawn_server;
    use axum::{Router, routing::get};
    use serde_json::json;
    use std::sync::Arc;

    async fn api_over(repo: Arc<StubGraphRepository>) -> HttpDashboardApi {
        let base = spawn_server(build_router(AppState::new(repo))).await;
        HttpDashboardApi::new(format!("{}/api/meta/", base))
    }

    fn settings() -> DashboardSettings {
        DashboardSettings::new("tok", "page-1", "ig-1", 15)
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_through_server() {
        let repo = Arc::new(StubGraphRepository::new().respond(
            "ig-1/insights",
            Err(GraphError::Status {
                status: 500,
                message: None,
            }),
        ));
        let api = api_over(repo).await;

        let snapshot = api.snapshot(&settings()).await.unwrap();
        assert_eq!(snapshot.instagram.insights, None);
        assert_eq!(snapshot.facebook.posts, Some(json!({"data": []})));
    }

    #[tokio::test]
    async fn test_insights_unwraps_envelope() {
        let payload = json!({"data": [{"name": "page_messages", "values": [{"value": 4}]}]});
        let repo = Arc::new(StubGraphRepository::new().respond("page-1/insights", Ok(payload.clone())));
        let api = api_over(repo.clone()).await;

        let value = api.insights(&settings(), Platform::Messenger).await.unwrap();
        assert_eq!(value, payload);

        api.facebook_posts(&settings(), 6).await.unwrap();
        let calls = repo.calls();
        assert_eq!(calls[1].1.param("limit"), Some("6"));
    }

    #[tokio::test]
    async fn test_missing_token_surfaces_status() {
        let repo = Arc::new(StubGraphRepository::new());
        let api = api_over(repo.clone()).await;

        let err = api
            .snapshot(&DashboardSettings::new("", "page-1", "ig-1", 15))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Status(401));
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let base = spawn_server(Router::new().route(
            "/api/meta/dashboard/:page/:user",
            get(|| async { "not json" }),
        ))
        .await;
        let api = HttpDashboardApi::new(format!("{}/api/meta", base));

        let err = api.snapshot(&settings()).await.unwrap_err();
        assert!(matches!(err, ClientError::Malformed(_)));
    }
}
