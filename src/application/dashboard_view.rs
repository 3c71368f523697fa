// Render sink for the dashboard controller
use crate::domain::platform::{Platform, Tab};
use crate::domain::settings::DashboardSettings;
use crate::application::view_model::{ChartData, MetricCard, Notification, Panel, PanelSlot};

/// Receives finished view models; implementations only draw
pub trait DashboardView: Send {
    fn set_active_tab(&mut self, tab: Tab);

    fn set_loading(&mut self, loading: bool);

    fn init_charts(&mut self, engagement: &ChartData, platforms: &ChartData);

    /// Only the cards present are updated; others keep their last value
    fn update_metrics(&mut self, cards: &[MetricCard]);

    /// Replaces the platform comparison values in place and redraws
    fn update_platform_chart(&mut self, values: &[f64]);

    fn show_panel(&mut self, platform: Platform, slot: PanelSlot, panel: &Panel);

    fn show_settings(&mut self, settings: &DashboardSettings);

    fn hide_settings(&mut self);

    fn notify(&mut self, notification: &Notification);
}
