// Meta dashboard - Graph API aggregation service and dashboard controller
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
