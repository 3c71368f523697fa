// Settings stores: TOML file for the terminal dashboard, memory for tests and embedding
use crate::application::settings_store::{SettingsError, SettingsStore};
use crate::domain::settings::DashboardSettings;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key/value store backed by a flat TOML table using the persisted key names
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<DashboardSettings, SettingsError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no settings file yet");
            return Ok(DashboardSettings::default());
        }

        let text = std::fs::read_to_string(&self.path)?;
        let table: BTreeMap<String, toml::Value> = toml::from_str(&text)?;
        let entries = table
            .into_iter()
            .map(|(key, value)| match value {
                toml::Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect();

        Ok(DashboardSettings::from_entries(&entries))
    }

    fn save(&self, settings: &DashboardSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(&settings.to_entries())?;
        std::fs::write(&self.path, text)?;
        tracing::info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemorySettingsStore {
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self) -> Result<DashboardSettings, SettingsError> {
        Ok(DashboardSettings::from_entries(&self.entries()))
    }

    fn save(&self, settings: &DashboardSettings) -> Result<(), SettingsError> {
        if let Ok(mut entries) = self.entries.lock() {
            *entries = settings.to_entries();
        }
        Ok(())
    }
}
