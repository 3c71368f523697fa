// Application layer - Use cases and the ports they drive
pub mod dashboard_api;
pub mod dashboard_controller;
pub mod dashboard_service;
pub mod dashboard_view;
pub mod graph_repository;
pub mod meta_service;
pub mod refresh_schedule;
pub mod settings_store;
pub mod view_model;
