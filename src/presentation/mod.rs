// Presentation layer - HTTP surface and dashboard rendering
pub mod app_state;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod terminal_view;
