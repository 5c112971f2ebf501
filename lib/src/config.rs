use crate::error::Result;
use crate::import_export::ImportOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the file server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Root directory of user uploads; defaults to `<data dir>/user-uploads`
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,

    /// Bookmark import behaviour
    #[serde(default)]
    pub import: ImportOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            upload_dir: None,
            import: ImportOptions::default(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/stash/config.yml)
    /// Falls back to default config if file doesn't exist
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {:?}: {}. Using default configuration",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Directory the file server reads uploads from
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| crate::utils::get_default_data_dir().join("user-uploads"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import_export::MissingUrlPolicy;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.import.missing_url, MissingUrlPolicy::Keep);
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let original = Config {
            listen_addr: "0.0.0.0:8080".to_string(),
            upload_dir: Some(PathBuf::from("/srv/uploads")),
            import: ImportOptions {
                missing_url: MissingUrlPolicy::Skip,
                max_depth: 8,
            },
        };

        original.save_to_path(config_path).unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(loaded.listen_addr, "0.0.0.0:8080");
        assert_eq!(loaded.upload_dir(), PathBuf::from("/srv/uploads"));
        assert_eq!(loaded.import, original.import);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "import:\n  missing_url: reject\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.listen_addr, default_listen_addr());
        assert_eq!(config.import.missing_url, MissingUrlPolicy::Reject);
        assert_eq!(config.import.max_depth, ImportOptions::default().max_depth);
    }
}
