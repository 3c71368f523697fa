// Route table for the dashboard API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard, facebook_insights, facebook_posts, health_check, instagram_insights,
    instagram_media, messenger_insights, node_info, threads_insights,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    let meta = Router::new()
        .route("/facebook/insights/:pageId", get(facebook_insights))
        .route("/facebook/posts/:pageId", get(facebook_posts))
        .route("/instagram/insights/:userId", get(instagram_insights))
        .route("/instagram/media/:userId", get(instagram_media))
        .route("/messenger/insights/:pageId", get(messenger_insights))
        .route("/threads/insights/:userId", get(threads_insights))
        .route("/user/:id", get(node_info))
        .route("/dashboard/:pageId/:userId", get(dashboard));

    Router::new()
        .route("/healthz", get(health_check))
        .nest("/api/meta", meta)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
