// HTTP request handlers
use crate::application::graph_repository::GraphError;
use crate::domain::platform::Platform;
use crate::domain::snapshot::DashboardSnapshot;
use crate::presentation::app_state::AppState;
use crate::presentation::auth::AccessToken;
use crate::presentation::error::ApiError;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub metric: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EdgeQuery {
    pub fields: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FieldsQuery {
    pub fields: Option<String>,
}

const THREADS_FALLBACK: &str = "Threads API may not be available yet";

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// `{platform, pageId|userId, data}`
fn envelope(platform: Platform, node_id: String, data: Value) -> Json<Value> {
    let mut body = Map::new();
    body.insert("platform".into(), Value::from(platform.as_str()));
    body.insert(platform.id_param().into(), Value::from(node_id));
    body.insert("data".into(), data);
    Json(Value::Object(body))
}

fn upstream_failure(platform: Platform, context: &'static str, e: GraphError) -> ApiError {
    tracing::error!(%platform, status = e.status(), "{}: {}", context, e);
    ApiError::upstream(context, e)
}

async fn platform_insights(
    state: &AppState,
    platform: Platform,
    token: &str,
    node_id: String,
    query: InsightsQuery,
    context: &'static str,
) -> Result<Json<Value>, ApiError> {
    let data = state
        .meta_service
        .insights(platform, token, &node_id, query.metric, query.period)
        .await
        .map_err(|e| upstream_failure(platform, context, e))?;
    Ok(envelope(platform, node_id, data))
}

pub async fn facebook_insights(
    AccessToken(token): AccessToken,
    Path(page_id): Path<String>,
    Query(query): Query<InsightsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    platform_insights(
        &state,
        Platform::Facebook,
        &token,
        page_id,
        query,
        "Failed to fetch Facebook insights",
    )
    .await
}

pub async fn instagram_insights(
    AccessToken(token): AccessToken,
    Path(user_id): Path<String>,
    Query(query): Query<InsightsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    platform_insights(
        &state,
        Platform::Instagram,
        &token,
        user_id,
        query,
        "Failed to fetch Instagram insights",
    )
    .await
}

pub async fn messenger_insights(
    AccessToken(token): AccessToken,
    Path(page_id): Path<String>,
    Query(query): Query<InsightsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    platform_insights(
        &state,
        Platform::Messenger,
        &token,
        page_id,
        query,
        "Failed to fetch Messenger insights",
    )
    .await
}

pub async fn facebook_posts(
    AccessToken(token): AccessToken,
    Path(page_id): Path<String>,
    Query(query): Query<EdgeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let data = state
        .meta_service
        .facebook_posts(&token, &page_id, query.fields, query.limit)
        .await
        .map_err(|e| upstream_failure(Platform::Facebook, "Failed to fetch Facebook posts", e))?;
    Ok(envelope(Platform::Facebook, page_id, data))
}

pub async fn instagram_media(
    AccessToken(token): AccessToken,
    Path(user_id): Path<String>,
    Query(query): Query<EdgeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let data = state
        .meta_service
        .instagram_media(&token, &user_id, query.fields, query.limit)
        .await
        .map_err(|e| upstream_failure(Platform::Instagram, "Failed to fetch Instagram media", e))?;
    Ok(envelope(Platform::Instagram, user_id, data))
}

/// Threads placeholder; failures are reported as a likely-unavailable API
pub async fn threads_insights(
    AccessToken(token): AccessToken,
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    match state.meta_service.threads(&token, &user_id).await {
        Ok(data) => Ok(envelope(Platform::Threads, user_id, data)),
        Err(e) => {
            tracing::warn!(status = e.status(), "Threads API Error: {}", e);
            Err(ApiError::Upstream {
                context: "Failed to fetch Threads data",
                source: e,
                fallback_details: Some(THREADS_FALLBACK),
            })
        }
    }
}

pub async fn node_info(
    AccessToken(token): AccessToken,
    Path(id): Path<String>,
    Query(query): Query<FieldsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let data = state
        .meta_service
        .node_info(&token, &id, query.fields)
        .await
        .map_err(|e| {
            tracing::error!(node = %id, "User API Error: {}", e);
            ApiError::upstream("Failed to fetch user/page information", e)
        })?;

    let mut body = Map::new();
    body.insert("data".into(), data);
    Ok(Json(Value::Object(body)))
}

/// Combined snapshot across platforms (partial results on upstream failures)
pub async fn dashboard(
    AccessToken(token): AccessToken,
    Path((page_id, user_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let snapshot = state
        .dashboard_service
        .snapshot(&token, &page_id, &user_id)
        .await
        .map_err(|e| {
            tracing::error!("Dashboard API Error: {}", e);
            ApiError::from(e)
        })?;
    Ok(Json(snapshot))
}
