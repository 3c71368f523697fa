use serde::Deserialize;

use crate::infrastructure::graph_client::DEFAULT_GRAPH_API_BASE;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub dashboard: DashboardClientSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphSettings {
    #[serde(default = "default_graph_base")]
    pub base_url: String,
}

/// Settings for the terminal dashboard client
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardClientSettings {
    #[serde(default = "default_api_base")]
    pub api_base_url: String,
    #[serde(default = "default_settings_file")]
    pub settings_file: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_graph_base() -> String {
    DEFAULT_GRAPH_API_BASE.to_string()
}

fn default_api_base() -> String {
    "http://127.0.0.1:8080/api/meta".to_string()
}

fn default_settings_file() -> String {
    "dashboard-settings.toml".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            base_url: default_graph_base(),
        }
    }
}

impl Default for DashboardClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base(),
            settings_file: default_settings_file(),
        }
    }
}

/// `config/server.toml` (optional) overridden by `META_DASHBOARD__SECTION__KEY`
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/server")
}

pub fn load_app_config_from(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("META_DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = load_app_config_from("does/not/exist").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.graph.base_url, "https://graph.facebook.com/v18.0");
        assert_eq!(config.dashboard.settings_file, "dashboard-settings.toml");
    }

    #[test]
    fn test_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(
            &path,
            "[server]\nbind = \"127.0.0.1:9999\"\n\n[graph]\nbase_url = \"http://localhost:4000/v18.0\"\n",
        )
        .unwrap();

        let config = load_app_config_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9999");
        assert_eq!(config.graph.base_url, "http://localhost:4000/v18.0");
        assert_eq!(config.dashboard.api_base_url, "http://127.0.0.1:8080/api/meta");
    }
}
