// Graph API payload models: insights, posts and media
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "data": [...] }` list envelope returned by every Graph API edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T: DeserializeOwned> GraphList<T> {
    /// Reads a list out of a raw upstream payload, `None` when it is not list-shaped
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.get("data") {
            Some(Value::Array(_)) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    pub name: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub values: Vec<InsightValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightValue {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl Insight {
    /// The first bucket's value; non-numeric or missing values count as zero
    pub fn latest_value(&self) -> f64 {
        self.values
            .first()
            .and_then(|v| v.value.as_f64())
            .unwrap_or(0.0)
    }
}

impl GraphList<Insight> {
    pub fn find(&self, name: &str) -> Option<&Insight> {
        self.data.iter().find(|insight| insight.name == name)
    }

    pub fn metric_value(&self, name: &str) -> f64 {
        self.find(name).map(Insight::latest_value).unwrap_or(0.0)
    }
}

pub type InsightsPage = GraphList<Insight>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub likes: Option<Summarized>,
    #[serde(default)]
    pub comments: Option<Summarized>,
}

/// Edge requested with `.summary(true)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Summarized {
    #[serde(default)]
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Summary {
    #[serde(default)]
    pub total_count: u64,
}

fn total(edge: &Option<Summarized>) -> u64 {
    edge.as_ref()
        .and_then(|e| e.summary.as_ref())
        .map(|s| s.total_count)
        .unwrap_or(0)
}

impl Post {
    pub fn like_count(&self) -> u64 {
        total(&self.likes)
    }

    pub fn comment_count(&self) -> u64 {
        total(&self.comments)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Media {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comments_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ThreadPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_value_defaults_to_zero() {
        let page = InsightsPage::from_value(&json!({
            "data": [
                {"name": "page_fans", "period": "day", "values": [{"value": 1200, "end_time": "2024-01-02T08:00:00+0000"}]},
                {"name": "page_impressions", "period": "day", "values": []},
                {"name": "page_engaged_users", "values": [{"value": {"like": 3}}]}
            ],
            "paging": {}
        }))
        .unwrap();

        assert_eq!(page.metric_value("page_fans"), 1200.0);
        assert_eq!(page.metric_value("page_impressions"), 0.0);
        assert_eq!(page.metric_value("page_engaged_users"), 0.0);
        assert_eq!(page.metric_value("reach"), 0.0);
    }

    #[test]
    fn test_from_value_rejects_non_lists() {
        assert!(InsightsPage::from_value(&json!({"error": {"message": "nope"}})).is_none());
        assert!(InsightsPage::from_value(&json!({"data": {"data": []}})).is_none());
    }

    #[test]
    fn test_post_counters() {
        let posts = GraphList::<Post>::from_value(&json!({
            "data": [
                {"id": "1", "message": "hi", "likes": {"summary": {"total_count": 7}}},
                {"id": "2"}
            ]
        }))
        .unwrap();

        assert_eq!(posts.data[0].like_count(), 7);
        assert_eq!(posts.data[0].comment_count(), 0);
        assert_eq!(posts.data[1].like_count(), 0);
    }
}
