// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod graph_client;
pub mod http_dashboard_api;
pub mod refresh_timer;
pub mod settings_store;
