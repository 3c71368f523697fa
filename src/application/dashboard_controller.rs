// Dashboard controller - Tab state machine, fetch-and-render cycles and auto-refresh
use crate::application::dashboard_api::{ClientResult, DashboardApi};
use crate::application::dashboard_view::DashboardView;
use crate::application::refresh_schedule::RefreshSchedule;
use crate::application::settings_store::SettingsStore;
use crate::domain::platform::{Platform, Tab};
use crate::domain::settings::DashboardSettings;
use crate::application::view_model::{
    self, CONFIGURE_FIRST, DASHBOARD_LOAD_FAILED, Notification, Panel, PanelSlot,
    SETTINGS_SAVED, THREADS_UNAVAILABLE,
};
use serde_json::Value;
use std::time::Duration;

/// Posts/media shown on a platform tab
const FEED_LIMIT: u32 = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    SelectTab(Tab),
    Refresh,
    RefreshPlatform(Platform),
    OpenSettings,
    CloseSettings,
    SaveSettings(DashboardSettings),
    /// Fired by the refresh schedule
    Tick,
}

pub struct DashboardController<A, S, R, V> {
    api: A,
    store: S,
    schedule: R,
    view: V,
    settings: DashboardSettings,
    active_tab: Tab,
}

impl<A, S, R, V> DashboardController<A, S, R, V>
where
    A: DashboardApi,
    S: SettingsStore,
    R: RefreshSchedule,
    V: DashboardView,
{
    pub fn new(api: A, store: S, schedule: R, view: V) -> Self {
        Self {
            api,
            store,
            schedule,
            view,
            settings: DashboardSettings::default(),
            active_tab: Tab::Overview,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn schedule(&self) -> &R {
        &self.schedule
    }

    /// Loads persisted settings and either fetches right away or asks for configuration
    pub async fn start(&mut self) {
        self.settings = self.store.load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            DashboardSettings::default()
        });

        self.active_tab = Tab::Overview;
        self.view.set_active_tab(Tab::Overview);
        self.view
            .init_charts(&view_model::engagement_chart(), &view_model::platform_chart());

        if self.settings.is_complete() {
            self.load_dashboard().await;
            self.reschedule();
        } else {
            self.view.show_settings(&self.settings);
        }
    }

    pub async fn handle(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SelectTab(tab) => self.switch_tab(tab).await,
            DashboardEvent::Refresh | DashboardEvent::Tick => self.load_dashboard().await,
            DashboardEvent::RefreshPlatform(platform) => self.load_platform(platform).await,
            DashboardEvent::OpenSettings => self.view.show_settings(&self.settings),
            DashboardEvent::CloseSettings => self.view.hide_settings(),
            DashboardEvent::SaveSettings(settings) => self.save_settings(settings).await,
        }
    }

    pub async fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.view.set_active_tab(tab);

        if let Tab::Platform(platform) = tab {
            self.load_platform(platform).await;
        }
    }

    pub async fn load_dashboard(&mut self) {
        if !self.settings.is_complete() {
            self.view
                .notify(&Notification::Error(CONFIGURE_FIRST.to_string()));
            return;
        }

        self.view.set_loading(true);
        match self.api.snapshot(&self.settings).await {
            Ok(snapshot) => {
                tracing::debug!(timestamp = %snapshot.timestamp, "dashboard snapshot received");
                self.view
                    .update_metrics(&view_model::overview_metrics(&snapshot));
                if let Some(values) = view_model::platform_comparison(&snapshot) {
                    self.view.update_platform_chart(&values);
                }
            }
            Err(e) => {
                tracing::error!("Error loading dashboard data: {}", e);
                self.view
                    .notify(&Notification::Error(DASHBOARD_LOAD_FAILED.to_string()));
            }
        }
        self.view.set_loading(false);
    }

    pub async fn load_platform(&mut self, platform: Platform) {
        if self.settings.access_token.is_empty() {
            return;
        }

        self.view.set_loading(true);
        match platform {
            Platform::Facebook => {
                let (insights, posts) = tokio::join!(
                    self.api.insights(&self.settings, platform),
                    self.api.facebook_posts(&self.settings, FEED_LIMIT)
                );
                self.render(platform, PanelSlot::Insights, insights, view_model::insights_panel);
                self.render(platform, PanelSlot::Feed, posts, view_model::posts_panel);
            }
            Platform::Instagram => {
                let (insights, media) = tokio::join!(
                    self.api.insights(&self.settings, platform),
                    self.api.instagram_media(&self.settings, FEED_LIMIT)
                );
                self.render(platform, PanelSlot::Insights, insights, view_model::insights_panel);
                self.render(platform, PanelSlot::Feed, media, view_model::media_panel);
            }
            Platform::Messenger => {
                let insights = self.api.insights(&self.settings, platform).await;
                self.render(platform, PanelSlot::Insights, insights, view_model::insights_panel);
            }
            Platform::Threads => {
                // An error here usually means the API is not open to this app yet
                let panel = match self.api.insights(&self.settings, platform).await {
                    Ok(payload) => view_model::threads_panel(&payload),
                    Err(e) => {
                        tracing::info!("Threads data unavailable: {}", e);
                        Panel::Message(THREADS_UNAVAILABLE.to_string())
                    }
                };
                self.view.show_panel(platform, PanelSlot::Feed, &panel);
            }
        }
        self.view.set_loading(false);
    }

    /// New settings apply to this session even when they cannot be persisted;
    /// the success notice is only shown once they are stored.
    pub async fn save_settings(&mut self, settings: DashboardSettings) {
        self.settings = settings;
        let saved = match self.store.save(&self.settings) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to persist settings: {}", e);
                self.view.notify(&Notification::Error(e.to_string()));
                false
            }
        };

        self.view.hide_settings();
        self.reschedule();
        self.load_dashboard().await;
        if saved {
            self.view
                .notify(&Notification::Success(SETTINGS_SAVED.to_string()));
        }
    }

    /// Replaces the running schedule; a non-positive interval leaves none running
    fn reschedule(&mut self) {
        self.schedule.stop();
        if self.settings.refresh_enabled() {
            let minutes = self.settings.refresh_interval_minutes.unsigned_abs();
            tracing::info!(minutes, "auto-refresh scheduled");
            self.schedule
                .start(Duration::from_secs(minutes.saturating_mul(60)));
        } else {
            tracing::info!("auto-refresh disabled");
        }
    }

    fn render(
        &mut self,
        platform: Platform,
        slot: PanelSlot,
        result: ClientResult<Value>,
        to_panel: fn(&Value) -> Panel,
    ) {
        match result {
            Ok(payload) => self.view.show_panel(platform, slot, &to_panel(&payload)),
            Err(e) => {
                tracing::error!(%platform, "Error loading platform data: {}", e);
                self.view.notify(&Notification::Error(format!(
                    "Could not load {} data",
                    platform
                )));
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::application::dashboard_api::ClientError;
    use crate::infrastructure::settings_store::InMemorySettingsStore;
    use crate::application::view_model::{MetricCard, NO_MEDIA};
    use serde_json::json;

    fn configured_store(interval: i64) -> InMemorySettingsStore {
        let store = InMemorySettingsStore::default();
        store
            .save(&DashboardSettings::new("tok", "page-1", "ig-1", interval))
            .unwrap();
        store
    }

    fn snapshot() -> crate::domain::snapshot::DashboardSnapshot {
        serde_json::from_value(json!({
            "facebook": {
                "insights": {"data": [
                    {"name": "page_fans", "values": [{"value": 1500}]},
                    {"name": "page_engaged_users", "values": [{"value": 30}]}
                ]},
                "posts": null
            },
            "instagram": {"insights": null, "media": null},
            "messenger": {"insights": {"data": [{"name": "page_messages", "values": [{"value": 12}]}]}},
            "timestamp": "2024-03-01T12:30:00.000Z"
        }))
        .unwrap()
    }

    type TestController =
        DashboardController<FakeApi, InMemorySettingsStore, RecordingSchedule, RecordingView>;

    fn controller(api: FakeApi, store: InMemorySettingsStore) -> TestController {
        DashboardController::new(
            api,
            store,
            RecordingSchedule::default(),
            RecordingView::default(),
        )
    }

    #[tokio::test]
    async fn test_start_without_config_opens_settings_and_stays_offline() {
        let api = FakeApi::default();
        let mut controller = controller(api.clone(), InMemorySettingsStore::default());

        controller.start().await;

        assert!(api.requests().is_empty());
        assert!(controller.view().drawn.contains(&Drawn::SettingsShown));
        assert!(!controller.schedule().is_active());
    }

    #[tokio::test]
    async fn test_start_with_config_loads_and_schedules() {
        let api = FakeApi {
            snapshot: Some(snapshot()),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), configured_store(15));

        controller.start().await;

        assert_eq!(api.requests(), vec!["dashboard/page-1/ig-1"]);
        assert_eq!(controller.schedule().starts, vec![Duration::from_secs(900)]);
        let drawn = &controller.view().drawn;
        assert!(drawn.contains(&Drawn::Metrics(vec![
            MetricCard {
                id: "fb-fans",
                value: "1.5K".into()
            },
            MetricCard {
                id: "msg-count",
                value: "12".into()
            },
        ])));
        assert!(drawn.contains(&Drawn::PlatformChart(vec![30.0, 0.0, 12.0])));
        assert!(!drawn.contains(&Drawn::SettingsShown));
    }

    #[tokio::test]
    async fn test_switch_tab_fetches_platform_once() {
        let api = FakeApi {
            payload: json!({"data": []}),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), configured_store(15));
        controller.settings = DashboardSettings::new("tok", "page-1", "ig-1", 15);

        controller
            .handle(DashboardEvent::SelectTab(Tab::Platform(Platform::Messenger)))
            .await;

        assert_eq!(api.requests(), vec!["messenger/insights/page-1"]);
        assert_eq!(controller.active_tab(), Tab::Platform(Platform::Messenger));
        let tabs: Vec<_> = controller
            .view()
            .drawn
            .iter()
            .filter(|d| matches!(d, Drawn::Tab(_)))
            .collect();
        assert_eq!(tabs, vec![&Drawn::Tab(Tab::Platform(Platform::Messenger))]);
    }

    #[tokio::test]
    async fn test_facebook_tab_fetches_insights_and_posts() {
        let api = FakeApi {
            payload: json!({"data": []}),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), InMemorySettingsStore::default());
        controller.settings = DashboardSettings::new("tok", "page-1", "ig-1", 15);

        controller
            .switch_tab(Tab::Platform(Platform::Facebook))
            .await;

        let mut requests = api.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec!["facebook/insights/page-1", "facebook/posts/page-1?limit=6"]
        );
        assert!(controller.view().drawn.contains(&Drawn::Panel(
            Platform::Facebook,
            PanelSlot::Insights,
            Panel::InsightCards(vec![])
        )));
    }

    #[tokio::test]
    async fn test_overview_tab_does_not_fetch() {
        let api = FakeApi::default();
        let mut controller = controller(api.clone(), InMemorySettingsStore::default());
        controller.settings = DashboardSettings::new("tok", "page-1", "ig-1", 15);

        controller.switch_tab(Tab::Overview).await;

        assert!(api.requests().is_empty());
        assert_eq!(controller.active_tab(), Tab::Overview);
    }

    #[tokio::test]
    async fn test_threads_failure_shows_unavailable_notice() {
        let api = FakeApi {
            fail_with: Some(ClientError::Status(400)),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), InMemorySettingsStore::default());
        controller.settings = DashboardSettings::new("tok", "page-1", "ig-1", 15);

        controller.switch_tab(Tab::Platform(Platform::Threads)).await;

        assert_eq!(api.requests(), vec!["threads/insights/ig-1"]);
        assert!(controller.view().notifications().is_empty());
        assert!(controller.view().drawn.contains(&Drawn::Panel(
            Platform::Threads,
            PanelSlot::Feed,
            Panel::Message(THREADS_UNAVAILABLE.into())
        )));
    }

    #[tokio::test]
    async fn test_save_settings_with_zero_interval_cancels_refresh() {
        let api = FakeApi {
            snapshot: Some(snapshot()),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), configured_store(15));
        controller.start().await;
        assert!(controller.schedule().is_active());

        controller
            .handle(DashboardEvent::SaveSettings(DashboardSettings::new(
                "tok", "page-1", "ig-1", 0,
            )))
            .await;

        assert!(!controller.schedule().is_active());
        assert_eq!(controller.schedule().starts.len(), 1);
        assert_eq!(controller.store.load().unwrap().refresh_interval_minutes, 0);
    }

    #[tokio::test]
    async fn test_save_settings_replaces_timer() {
        let api = FakeApi {
            snapshot: Some(snapshot()),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), configured_store(15));
        controller.start().await;

        controller
            .save_settings(DashboardSettings::new("tok", "page-1", "ig-1", 5))
            .await;

        let schedule = controller.schedule();
        assert_eq!(schedule.running, Some(Duration::from_secs(300)));
        assert_eq!(
            schedule.starts,
            vec![Duration::from_secs(900), Duration::from_secs(300)]
        );
        assert_eq!(schedule.stops, 2);
        let last = controller.view().notifications().last().cloned().cloned();
        assert_eq!(last, Some(Notification::Success(SETTINGS_SAVED.into())));
    }

    #[tokio::test]
    async fn test_fetch_failure_notifies_and_keeps_rendered_state() {
        let api = FakeApi {
            fail_with: Some(ClientError::Status(502)),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), configured_store(15));

        controller.start().await;

        let view = controller.view();
        assert_eq!(
            view.notifications(),
            vec![&Notification::Error(DASHBOARD_LOAD_FAILED.into())]
        );
        assert!(!view.drawn.iter().any(|d| matches!(d, Drawn::Metrics(_))));
        assert!(!view.drawn.iter().any(|d| matches!(d, Drawn::PlatformChart(_))));
    }

    #[tokio::test]
    async fn test_refresh_without_config_asks_for_settings() {
        let api = FakeApi::default();
        let mut controller = controller(api.clone(), InMemorySettingsStore::default());

        controller.handle(DashboardEvent::Refresh).await;

        assert!(api.requests().is_empty());
        assert_eq!(
            controller.view().notifications(),
            vec![&Notification::Error(CONFIGURE_FIRST.into())]
        );
    }

    #[tokio::test]
    async fn test_save_failure_reports_error_without_success() {
        let api = FakeApi {
            snapshot: Some(snapshot()),
            ..Default::default()
        };
        let store = ReadOnlySettingsStore(DashboardSettings::new("tok", "page-1", "ig-1", 15));
        let mut controller = DashboardController::new(
            api.clone(),
            store,
            RecordingSchedule::default(),
            RecordingView::default(),
        );
        controller.start().await;

        controller
            .save_settings(DashboardSettings::new("tok", "page-1", "ig-1", 5))
            .await;

        let notifications = controller.view().notifications();
        assert_eq!(notifications.len(), 1);
        assert!(matches!(notifications[0], Notification::Error(msg) if msg.contains("disk full")));
        assert_eq!(controller.settings().refresh_interval_minutes, 5);
        assert_eq!(controller.schedule().running, Some(Duration::from_secs(300)));
    }

    #[tokio::test]
    async fn test_huge_interval_saturates_period() {
        let api = FakeApi {
            snapshot: Some(snapshot()),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), configured_store(15));

        controller
            .save_settings(DashboardSettings::new("tok", "page-1", "ig-1", i64::MAX))
            .await;

        assert_eq!(
            controller.schedule().running,
            Some(Duration::from_secs(u64::MAX))
        );
    }

    #[tokio::test]
    async fn test_negative_interval_disables_refresh() {
        let api = FakeApi {
            snapshot: Some(snapshot()),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), configured_store(15));
        controller.start().await;

        controller
            .save_settings(DashboardSettings::new("tok", "page-1", "ig-1", -5))
            .await;

        let schedule = controller.schedule();
        assert!(!schedule.is_active());
        assert_eq!(schedule.starts, vec![Duration::from_secs(900)]);
        assert_eq!(schedule.stops, 2);
    }

    #[tokio::test]
    async fn test_refresh_platform_keeps_active_tab() {
        let api = FakeApi {
            payload: json!({"data": []}),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), InMemorySettingsStore::default());
        controller.settings = DashboardSettings::new("tok", "page-1", "ig-1", 15);

        controller
            .handle(DashboardEvent::RefreshPlatform(Platform::Instagram))
            .await;

        let mut requests = api.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec!["instagram/insights/ig-1", "instagram/media/ig-1?limit=6"]
        );
        assert_eq!(controller.active_tab(), Tab::Overview);
        assert!(!controller
            .view()
            .drawn
            .iter()
            .any(|d| matches!(d, Drawn::Tab(_))));
    }

    #[tokio::test]
    async fn test_instagram_tab_fetches_insights_and_media() {
        let api = FakeApi {
            payload: json!({"data": []}),
            ..Default::default()
        };
        let mut controller = controller(api.clone(), InMemorySettingsStore::default());
        controller.settings = DashboardSettings::new("tok", "page-1", "ig-1", 15);

        controller
            .switch_tab(Tab::Platform(Platform::Instagram))
            .await;

        let mut requests = api.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec!["instagram/insights/ig-1", "instagram/media/ig-1?limit=6"]
        );
        assert_eq!(controller.active_tab(), Tab::Platform(Platform::Instagram));
        assert!(controller.view().drawn.contains(&Drawn::Panel(
            Platform::Instagram,
            PanelSlot::Feed,
            Panel::Message(NO_MEDIA.into())
        )));
    }
}
