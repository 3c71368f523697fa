// View models - Pure mappings from Graph payloads to renderable structures; drawing lives in presentation
use crate::domain::insight::{GraphList, InsightsPage, Media, Post, ThreadPost};
use crate::domain::platform::Platform;
use crate::domain::snapshot::DashboardSnapshot;
use chrono::DateTime;
use serde_json::Value;

pub const CONFIGURE_FIRST: &str =
    "Please configure the access token, page ID and user ID in settings";
pub const DASHBOARD_LOAD_FAILED: &str =
    "Could not load dashboard data. Please check the API configuration.";
pub const SETTINGS_SAVED: &str = "Settings saved successfully!";
pub const THREADS_UNAVAILABLE: &str =
    "The Threads API is still in development. This view will update once the API is officially released.";
pub const NO_INSIGHTS: &str = "No insights data";
pub const NO_POSTS: &str = "No posts";
pub const NO_MEDIA: &str = "No media";
pub const NO_THREADS: &str = "No threads";

const POST_EXCERPT_CHARS: usize = 150;
const CAPTION_EXCERPT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Error(String),
    Success(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Error(m) | Notification::Success(m) => m,
        }
    }
}

/// Overview card keyed by its element id
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub id: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub name: String,
    pub colors: Vec<&'static str>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: &'static str,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSlot {
    /// Insight cards area of a platform tab
    Insights,
    /// Posts, media or threads list of a platform tab
    Feed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightCard {
    pub title: String,
    pub value: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub excerpt: String,
    pub likes: u64,
    pub comments: u64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaCard {
    pub image_url: Option<String>,
    pub caption: String,
    pub likes: u64,
    pub comments: u64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    InsightCards(Vec<InsightCard>),
    PostCards(Vec<PostCard>),
    MediaCards(Vec<MediaCard>),
    Message(String),
}

/// Compact display: `999`, `1.5K`, `2.5M`
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        num.to_string()
    }
}

pub fn insight_title(name: &str) -> &str {
    match name {
        "page_fans" => "Followers",
        "page_impressions" | "impressions" => "Impressions",
        "page_engaged_users" => "Engaged Users",
        "reach" => "Reach",
        "profile_views" => "Profile Views",
        "page_messages" => "Messages",
        other => other,
    }
}

/// Cards for the overview tab. Zero or missing values produce no card so the
/// previous figure stays on screen.
pub fn overview_metrics(snapshot: &DashboardSnapshot) -> Vec<MetricCard> {
    [
        ("fb-fans", Platform::Facebook, "page_fans"),
        ("ig-reach", Platform::Instagram, "reach"),
        ("msg-count", Platform::Messenger, "page_messages"),
    ]
    .into_iter()
    .filter_map(|(id, platform, metric)| {
        let value = snapshot.insights(platform)?.metric_value(metric);
        (value != 0.0).then(|| MetricCard {
            id,
            value: format_number(value),
        })
    })
    .collect()
}

/// Facebook / Instagram / Messenger values for the comparison chart,
/// `None` when every platform reads zero
pub fn platform_comparison(snapshot: &DashboardSnapshot) -> Option<[f64; 3]> {
    let metric = |platform, name| {
        snapshot
            .insights(platform)
            .map(|page| page.metric_value(name))
            .unwrap_or(0.0)
    };
    let values = [
        metric(Platform::Facebook, "page_engaged_users"),
        metric(Platform::Instagram, "reach"),
        metric(Platform::Messenger, "page_messages"),
    ];
    values.iter().any(|v| *v != 0.0).then_some(values)
}

/// Weekly engagement chart. It is seeded with demo figures and no snapshot
/// field feeds it yet.
pub fn engagement_chart() -> ChartData {
    ChartData {
        id: "engagementChart",
        kind: ChartKind::Line,
        labels: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .into_iter()
            .map(String::from)
            .collect(),
        series: vec![
            SeriesData {
                name: "Facebook".to_string(),
                colors: vec!["#1877f2"],
                values: vec![65.0, 59.0, 80.0, 81.0, 56.0, 55.0, 40.0],
            },
            SeriesData {
                name: "Instagram".to_string(),
                colors: vec!["#e4405f"],
                values: vec![28.0, 48.0, 40.0, 19.0, 86.0, 27.0, 90.0],
            },
        ],
    }
}

pub fn platform_chart() -> ChartData {
    ChartData {
        id: "platformChart",
        kind: ChartKind::Doughnut,
        labels: ["Facebook", "Instagram", "Messenger"]
            .into_iter()
            .map(String::from)
            .collect(),
        series: vec![SeriesData {
            name: "Platforms".to_string(),
            colors: vec!["#1877f2", "#e4405f", "#0084ff"],
            values: vec![300.0, 150.0, 100.0],
        }],
    }
}

pub fn insight_cards(page: &InsightsPage) -> Vec<InsightCard> {
    page.data
        .iter()
        .map(|insight| InsightCard {
            title: insight_title(&insight.name).to_string(),
            value: format_number(insight.latest_value()),
            period: insight.period.clone().unwrap_or_else(|| "day".to_string()),
        })
        .collect()
}

pub fn insights_panel(payload: &Value) -> Panel {
    match InsightsPage::from_value(payload) {
        Some(page) => Panel::InsightCards(insight_cards(&page)),
        None => Panel::Message(NO_INSIGHTS.to_string()),
    }
}

pub fn post_cards(posts: &[Post]) -> Vec<PostCard> {
    posts
        .iter()
        .map(|post| PostCard {
            excerpt: excerpt(post.message.as_deref(), "No content", POST_EXCERPT_CHARS),
            likes: post.like_count(),
            comments: post.comment_count(),
            date: format_date(post.created_time.as_deref()),
        })
        .collect()
}

pub fn posts_panel(payload: &Value) -> Panel {
    let posts = GraphList::<Post>::from_value(payload)
        .map(|list| list.data)
        .unwrap_or_default();
    if posts.is_empty() {
        Panel::Message(NO_POSTS.to_string())
    } else {
        Panel::PostCards(post_cards(&posts))
    }
}

pub fn media_cards(media: &[Media]) -> Vec<MediaCard> {
    media
        .iter()
        .map(|item| MediaCard {
            image_url: item.media_url.clone().filter(|url| !url.is_empty()),
            caption: excerpt(item.caption.as_deref(), "No caption", CAPTION_EXCERPT_CHARS),
            likes: item.like_count,
            comments: item.comments_count,
            date: format_date(item.timestamp.as_deref()),
        })
        .collect()
}

pub fn media_panel(payload: &Value) -> Panel {
    let media = GraphList::<Media>::from_value(payload)
        .map(|list| list.data)
        .unwrap_or_default();
    if media.is_empty() {
        Panel::Message(NO_MEDIA.to_string())
    } else {
        Panel::MediaCards(media_cards(&media))
    }
}

/// Threads posts reuse the post card; replies fill the comment counter
pub fn threads_panel(payload: &Value) -> Panel {
    let threads = GraphList::<ThreadPost>::from_value(payload)
        .map(|list| list.data)
        .unwrap_or_default();
    if threads.is_empty() {
        return Panel::Message(NO_THREADS.to_string());
    }
    Panel::PostCards(
        threads
            .iter()
            .map(|thread| PostCard {
                excerpt: excerpt(thread.text.as_deref(), "No content", POST_EXCERPT_CHARS),
                likes: thread.like_count,
                comments: thread.reply_count,
                date: format_date(thread.timestamp.as_deref()),
            })
            .collect(),
    )
}

fn excerpt(text: Option<&str>, fallback: &str, max_chars: usize) -> String {
    let text = text.filter(|t| !t.is_empty()).unwrap_or(fallback);
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Graph timestamps look like `2024-01-15T10:00:00+0000`
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}
