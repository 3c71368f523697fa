// Domain layer - Plain data shapes shared by the server and the dashboard client
pub mod graph_request;
pub mod insight;
pub mod platform;
pub mod settings;
pub mod snapshot;
