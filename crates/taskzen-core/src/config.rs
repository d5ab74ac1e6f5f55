use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seed a fresh profile with the demo board instead of an empty one.
    #[serde(default)]
    pub seed_demo: bool,

    /// Override for the data directory holding profile board files.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config| config.join("taskzen/config.toml"))
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Data directory to use, falling back to the platform default.
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|data| data.join("taskzen")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.seed_demo);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_parse_config() {
        let config: AppConfig = toml::from_str("seed_demo = true").unwrap();
        assert!(config.seed_demo);

        let config: AppConfig = toml::from_str("data_dir = \"/tmp/boards\"").unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/boards")));
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = AppConfig {
            seed_demo: false,
            data_dir: Some(PathBuf::from("/tmp/boards")),
        };
        assert_eq!(
            config.effective_data_dir(),
            Some(PathBuf::from("/tmp/boards"))
        );
    }
}
