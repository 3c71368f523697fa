// Plain-text render sink used by the dashboard-watch binary
use crate::application::dashboard_view::DashboardView;
use crate::domain::platform::{Platform, Tab};
use crate::domain::settings::DashboardSettings;
use crate::application::view_model::{ChartData, MetricCard, Notification, Panel, PanelSlot};
use std::collections::BTreeMap;
use std::io::Write;

/// Keeps the last rendered values so partial updates leave the rest in place
pub struct TerminalView<W: Write + Send> {
    out: W,
    metrics: BTreeMap<&'static str, String>,
    platform_labels: Vec<String>,
    platform_values: Vec<f64>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            metrics: BTreeMap::new(),
            platform_labels: Vec::new(),
            platform_values: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("terminal write failed: {}", e);
        }
    }

    fn draw_overview(&mut self) {
        let mut lines: Vec<String> = self
            .metrics
            .iter()
            .map(|(id, value)| format!("  {:<10} {}", id, value))
            .collect();
        let chart = self
            .platform_labels
            .iter()
            .zip(&self.platform_values)
            .map(|(label, value)| format!("{}={}", label, value))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("  platforms  {}", chart));

        self.line("-- overview --");
        for line in lines {
            self.line(&line);
        }
    }
}

impl<W: Write + Send> DashboardView for TerminalView<W> {
    fn set_active_tab(&mut self, tab: Tab) {
        self.line(&format!("[tab] {}", tab));
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.line("loading...");
        }
    }

    fn init_charts(&mut self, engagement: &ChartData, platforms: &ChartData) {
        for series in &engagement.series {
            let values: Vec<String> = series.values.iter().map(|v| v.to_string()).collect();
            self.line(&format!("[{}] {}: {}", engagement.id, series.name, values.join(", ")));
        }
        self.platform_labels = platforms.labels.clone();
        self.platform_values = platforms
            .series
            .first()
            .map(|s| s.values.clone())
            .unwrap_or_default();
    }

    fn update_metrics(&mut self, cards: &[MetricCard]) {
        for card in cards {
            self.metrics.insert(card.id, card.value.clone());
        }
        self.draw_overview();
    }

    fn update_platform_chart(&mut self, values: &[f64]) {
        self.platform_values = values.to_vec();
        self.draw_overview();
    }

    fn show_panel(&mut self, platform: Platform, slot: PanelSlot, panel: &Panel) {
        let heading = match slot {
            PanelSlot::Insights => format!("-- {} insights --", platform),
            PanelSlot::Feed => format!("-- {} feed --", platform),
        };
        self.line(&heading);

        let lines: Vec<String> = match panel {
            Panel::InsightCards(cards) => cards
                .iter()
                .map(|c| format!("  {:<16} {:>8}  ({})", c.title, c.value, c.period))
                .collect(),
            Panel::PostCards(cards) => cards
                .iter()
                .map(|c| format!("  {} | {} likes {} comments | {}", c.date, c.likes, c.comments, c.excerpt))
                .collect(),
            Panel::MediaCards(cards) => cards
                .iter()
                .map(|c| {
                    format!(
                        "  {} | {} likes {} comments | {} {}",
                        c.date,
                        c.likes,
                        c.comments,
                        c.caption,
                        c.image_url.as_deref().unwrap_or_default()
                    )
                })
                .collect(),
            Panel::Message(message) => vec![format!("  {}", message)],
        };
        for line in lines {
            self.line(&line);
        }
    }

    fn show_settings(&mut self, settings: &DashboardSettings) {
        self.line("-- settings --");
        self.line(&format!(
            "  page={} user={} refresh={}min token={}",
            settings.page_id,
            settings.user_id,
            settings.refresh_interval_minutes,
            if settings.access_token.is_empty() { "unset" } else { "set" }
        ));
        self.line("  set <token> <page_id> <user_id> <minutes>");
    }

    fn hide_settings(&mut self) {}

    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::Error(message) => self.line(&format!("[error] {}", message)),
            Notification::Success(message) => self.line(&format!("[ok] {}", message)),
        }
    }
}
