use serde::Deserialize;
use std::path::PathBuf;

use crate::state::store::DATABASE_FILE;

const APP_DIR: &str = "contacts-app";

/// Optional overrides read from `config.toml`
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the database (and photos, unless `images_dir` is set)
    pub data_dir: Option<PathBuf>,
    /// Private directory for imported contact photos
    pub images_dir: Option<PathBuf>,
}

/// Resolved on-disk locations
#[derive(Debug, Clone, PartialEq)]
pub struct AppPaths {
    pub database: PathBuf,
    pub images_dir: PathBuf,
}

pub fn load_config() -> AppConfig {
    let path = config_path();
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return AppConfig::default();
    };
    parse_config(&contents).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed config {}: {}", path.display(), e);
        AppConfig::default()
    })
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

impl AppConfig {
    /// Resolve paths, honouring `CONTACTS_APP_DATA_HOME`
    pub fn paths(&self) -> AppPaths {
        let data_home = std::env::var_os("CONTACTS_APP_DATA_HOME").map(PathBuf::from);
        self.resolve_paths(data_home)
    }

    fn resolve_paths(&self, data_home: Option<PathBuf>) -> AppPaths {
        let data_dir = data_home
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(default_data_dir);

        let images_dir = self
            .images_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("files"));

        AppPaths {
            database: data_dir.join(DATABASE_FILE),
            images_dir,
        }
    }
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("CONTACTS_APP_CONFIG") {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// - Linux: ~/.local/share/contacts-app
/// - macOS: ~/Library/Application Support/contacts-app
/// - Windows: %APPDATA%\contacts-app
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());

        let paths = config.resolve_paths(None);
        assert!(paths.database.ends_with("contacts-app/contact_database.db"));
        assert!(paths.images_dir.ends_with("contacts-app/files"));
    }

    #[test]
    fn test_data_dir_from_file() {
        let config = parse_config("data_dir = \"/srv/contacts\"\n").unwrap();
        let paths = config.resolve_paths(None);
        assert_eq!(paths.database, PathBuf::from("/srv/contacts/contact_database.db"));
        assert_eq!(paths.images_dir, PathBuf::from("/srv/contacts/files"));
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/srv/contacts")),
            images_dir: Some(PathBuf::from("/mnt/photos")),
        };
        let paths = config.resolve_paths(Some(PathBuf::from("/tmp/override")));
        assert_eq!(paths.database, PathBuf::from("/tmp/override/contact_database.db"));
        assert_eq!(paths.images_dir, PathBuf::from("/mnt/photos"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(parse_config("data_dir = 42").is_err());
    }
}
