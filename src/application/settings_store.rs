// Persistence port for dashboard settings
use crate::domain::settings::DashboardSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("settings could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),
}

pub trait SettingsStore: Send {
    /// Missing entries fall back to defaults; an empty store is not an error
    fn load(&self) -> Result<DashboardSettings, SettingsError>;

    fn save(&self, settings: &DashboardSettings) -> Result<(), SettingsError>;
}
