// Dashboard service - Use case for the combined cross-platform snapshot
use crate::application::graph_repository::GraphRepository;
use crate::domain::graph_request::{
    DASHBOARD_LIMIT, DASHBOARD_MEDIA_FIELDS, DASHBOARD_MESSENGER_METRICS, DASHBOARD_POST_FIELDS,
    DEFAULT_PERIOD, FACEBOOK_INSIGHT_METRICS, GraphRequest, INSTAGRAM_INSIGHT_METRICS,
};
use crate::domain::snapshot::{DashboardSnapshot, FacebookData, InstagramData, MessengerData};
use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("dashboard fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn GraphRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn GraphRepository>) -> Self {
        Self { repository }
    }

    /// Fans out the five upstream calls and waits for every one of them to settle.
    /// A failed call only nulls its own field.
    pub async fn snapshot(
        &self,
        access_token: &str,
        page_id: &str,
        user_id: &str,
    ) -> Result<DashboardSnapshot, AggregationError> {
        let facebook_insights = self.spawn_fetch(
            access_token,
            "facebook.insights",
            GraphRequest::insights(page_id, FACEBOOK_INSIGHT_METRICS, DEFAULT_PERIOD),
        );
        let instagram_insights = self.spawn_fetch(
            access_token,
            "instagram.insights",
            GraphRequest::insights(user_id, INSTAGRAM_INSIGHT_METRICS, DEFAULT_PERIOD),
        );
        let messenger_insights = self.spawn_fetch(
            access_token,
            "messenger.insights",
            GraphRequest::insights(page_id, DASHBOARD_MESSENGER_METRICS, DEFAULT_PERIOD),
        );
        let facebook_posts = self.spawn_fetch(
            access_token,
            "facebook.posts",
            GraphRequest::edge(
                page_id,
                "posts",
                DASHBOARD_POST_FIELDS,
                Some(DASHBOARD_LIMIT.to_string()),
            ),
        );
        let instagram_media = self.spawn_fetch(
            access_token,
            "instagram.media",
            GraphRequest::edge(
                user_id,
                "media",
                DASHBOARD_MEDIA_FIELDS,
                Some(DASHBOARD_LIMIT.to_string()),
            ),
        );

        // Settle every call before surfacing a task failure
        let settled = join_all([
            facebook_insights,
            instagram_insights,
            messenger_insights,
            facebook_posts,
            instagram_media,
        ])
        .await;
        let mut results = settled
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();
        let mut next = || results.next().flatten();

        let facebook_insights = next();
        let instagram_insights = next();
        let messenger_insights = next();
        let facebook_posts = next();
        let instagram_media = next();

        let snapshot = DashboardSnapshot::new(
            FacebookData {
                insights: facebook_insights,
                posts: facebook_posts,
            },
            InstagramData {
                insights: instagram_insights,
                media: instagram_media,
            },
            MessengerData {
                insights: messenger_insights,
            },
            Utc::now(),
        );

        tracing::debug!(page = page_id, user = user_id, "dashboard snapshot assembled");
        Ok(snapshot)
    }

    fn spawn_fetch(
        &self,
        access_token: &str,
        label: &'static str,
        request: GraphRequest,
    ) -> JoinHandle<Option<Value>> {
        let repo = self.repository.clone();
        let access_token = access_token.to_string();

        tokio::spawn(async move {
            match repo.fetch(&access_token, &request).await {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(call = label, status = e.status(), "dashboard call failed: {}", e);
                    None
                }
            }
        })
    }
}
