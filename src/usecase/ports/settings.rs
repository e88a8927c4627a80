#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    #[error("settings storage failed: {0}")]
    Storage(String),
}

/// Durable key/value storage for user preferences.
pub trait SettingsStore: Send + Sync {
    fn init(&self) -> Result<(), SettingsError>;

    fn load(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn save(&self, key: &str, value: &str) -> Result<(), SettingsError>;
    fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
