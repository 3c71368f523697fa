// Dashboard snapshot domain model
use super::insight::{GraphList, InsightsPage, Media, Post};
use super::platform::Platform;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FacebookData {
    pub insights: Option<Value>,
    pub posts: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstagramData {
    pub insights: Option<Value>,
    pub media: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessengerData {
    pub insights: Option<Value>,
}

/// Merged result of one combined fetch; a failed upstream call leaves its field `null`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub facebook: FacebookData,
    #[serde(default)]
    pub instagram: InstagramData,
    #[serde(default)]
    pub messenger: MessengerData,
    pub timestamp: String,
}

impl DashboardSnapshot {
    pub fn new(
        facebook: FacebookData,
        instagram: InstagramData,
        messenger: MessengerData,
        taken_at: DateTime<Utc>,
    ) -> Self {
        Self {
            facebook,
            instagram,
            messenger,
            timestamp: taken_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn insights(&self, platform: Platform) -> Option<InsightsPage> {
        let raw = match platform {
            Platform::Facebook => self.facebook.insights.as_ref(),
            Platform::Instagram => self.instagram.insights.as_ref(),
            Platform::Messenger => self.messenger.insights.as_ref(),
            Platform::Threads => None,
        };
        raw.and_then(InsightsPage::from_value)
    }

    pub fn posts(&self) -> Vec<Post> {
        self.facebook
            .posts
            .as_ref()
            .and_then(GraphList::<Post>::from_value)
            .map(|list| list.data)
            .unwrap_or_default()
    }

    pub fn media(&self) -> Vec<Media> {
        self.instagram
            .media
            .as_ref()
            .and_then(GraphList::<Media>::from_value)
            .map(|list| list.data)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_failed_fields_serialize_as_null() {
        let taken_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let snapshot = DashboardSnapshot::new(
            FacebookData::default(),
            InstagramData {
                insights: Some(json!({"data": []})),
                media: None,
            },
            MessengerData::default(),
            taken_at,
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["facebook"]["insights"], Value::Null);
        assert_eq!(value["facebook"]["posts"], Value::Null);
        assert_eq!(value["instagram"]["insights"], json!({"data": []}));
        assert_eq!(value["messenger"]["insights"], Value::Null);
        assert_eq!(value["timestamp"], "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_insights_lookup() {
        let snapshot: DashboardSnapshot = serde_json::from_value(json!({
            "facebook": {"insights": null, "posts": null},
            "instagram": {"insights": {"data": [{"name": "reach", "values": [{"value": 42}]}]}, "media": null},
            "messenger": {"insights": null},
            "timestamp": "2024-03-01T12:30:00.000Z"
        }))
        .unwrap();

        assert!(snapshot.insights(Platform::Facebook).is_none());
        assert_eq!(
            snapshot.insights(Platform::Instagram).unwrap().metric_value("reach"),
            42.0
        );
        assert!(snapshot.posts().is_empty());
    }
}
