// Outbound Graph API request model and the default metric/field lists

pub const DEFAULT_PERIOD: &str = "day";

pub const FACEBOOK_INSIGHT_METRICS: &str = "page_fans,page_impressions,page_engaged_users";
pub const FACEBOOK_POST_FIELDS: &str =
    "id,message,created_time,likes.summary(true),comments.summary(true),shares";
pub const INSTAGRAM_INSIGHT_METRICS: &str = "impressions,reach,profile_views";
pub const INSTAGRAM_MEDIA_FIELDS: &str =
    "id,caption,media_type,media_url,permalink,timestamp,like_count,comments_count";
pub const MESSENGER_INSIGHT_METRICS: &str =
    "page_messages,page_messages_blocked_conversations_unique";
pub const THREADS_FIELDS: &str = "id,text,timestamp,reply_count,like_count";
pub const NODE_FIELDS: &str = "id,name,picture,category,fan_count";
pub const DEFAULT_LIMIT: u32 = 10;

// Combined dashboard fetch uses slimmer lists
pub const DASHBOARD_MESSENGER_METRICS: &str = "page_messages";
pub const DASHBOARD_POST_FIELDS: &str =
    "id,message,created_time,likes.summary(true),comments.summary(true)";
pub const DASHBOARD_MEDIA_FIELDS: &str =
    "id,caption,media_type,media_url,like_count,comments_count";
pub const DASHBOARD_LIMIT: u32 = 5;

/// A single GET against `{node}[/{edge}]`; the access token is added by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRequest {
    pub node: String,
    pub edge: Option<&'static str>,
    pub params: Vec<(String, String)>,
}

impl GraphRequest {
    pub fn node(node: impl Into<String>, fields: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            edge: None,
            params: vec![("fields".to_string(), fields.into())],
        }
    }

    pub fn insights(
        node: impl Into<String>,
        metric: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            node: node.into(),
            edge: Some("insights"),
            params: vec![
                ("metric".to_string(), metric.into()),
                ("period".to_string(), period.into()),
            ],
        }
    }

    pub fn edge(
        node: impl Into<String>,
        edge: &'static str,
        fields: impl Into<String>,
        limit: Option<String>,
    ) -> Self {
        let mut params = vec![("fields".to_string(), fields.into())];
        if let Some(limit) = limit {
            params.push(("limit".to_string(), limit));
        }
        Self {
            node: node.into(),
            edge: Some(edge),
            params,
        }
    }

    /// Relative path, with the node id percent-encoded
    pub fn path(&self) -> String {
        let node = urlencoding::encode(&self.node);
        match self.edge {
            Some(edge) => format!("{}/{}", node, edge),
            None => node.into_owned(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
