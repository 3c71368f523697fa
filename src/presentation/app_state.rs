// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::graph_repository::GraphRepository;
use crate::application::meta_service::MetaService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub meta_service: MetaService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(repository: Arc<dyn GraphRepository>) -> Arc<Self> {
        Arc::new(Self {
            meta_service: MetaService::new(repository.clone()),
            dashboard_service: DashboardService::new(repository),
        })
    }
}
