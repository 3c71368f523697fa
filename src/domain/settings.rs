// Dashboard settings domain model
use super::platform::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ACCESS_TOKEN_KEY: &str = "meta_access_token";
pub const PAGE_ID_KEY: &str = "facebook_page_id";
pub const USER_ID_KEY: &str = "instagram_user_id";
pub const REFRESH_INTERVAL_KEY: &str = "refresh_interval";

pub const DEFAULT_REFRESH_MINUTES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub access_token: String,
    pub page_id: String,
    pub user_id: String,
    /// Zero or negative disables the periodic refresh
    pub refresh_interval_minutes: i64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            page_id: String::new(),
            user_id: String::new(),
            refresh_interval_minutes: DEFAULT_REFRESH_MINUTES,
        }
    }
}

impl DashboardSettings {
    pub fn new(
        access_token: impl Into<String>,
        page_id: impl Into<String>,
        user_id: impl Into<String>,
        refresh_interval_minutes: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            page_id: page_id.into(),
            user_id: user_id.into(),
            refresh_interval_minutes,
        }
    }

    /// Token, page id and user id are all required before any network access
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty() && !self.page_id.is_empty() && !self.user_id.is_empty()
    }

    /// Page id for page-level platforms, user id for account-level ones
    pub fn node_id(&self, platform: Platform) -> &str {
        match platform {
            Platform::Facebook | Platform::Messenger => &self.page_id,
            Platform::Instagram | Platform::Threads => &self.user_id,
        }
    }

    pub fn refresh_enabled(&self) -> bool {
        self.refresh_interval_minutes > 0
    }

    /// Builds settings from persisted key/value entries, falling back to defaults
    pub fn from_entries(entries: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| entries.get(key).cloned().unwrap_or_default();
        let refresh_interval_minutes = entries
            .get(REFRESH_INTERVAL_KEY)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_REFRESH_MINUTES);

        Self {
            access_token: text(ACCESS_TOKEN_KEY),
            page_id: text(PAGE_ID_KEY),
            user_id: text(USER_ID_KEY),
            refresh_interval_minutes,
        }
    }

    pub fn to_entries(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (ACCESS_TOKEN_KEY.to_string(), self.access_token.clone()),
            (PAGE_ID_KEY.to_string(), self.page_id.clone()),
            (USER_ID_KEY.to_string(), self.user_id.clone()),
            (
                REFRESH_INTERVAL_KEY.to_string(),
                self.refresh_interval_minutes.to_string(),
            ),
        ])
    }
}
