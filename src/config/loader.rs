use std::fs;
use std::path::PathBuf;

use color_eyre::Result;
use tracing::debug;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "tali";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the app config, falling back to defaults when no file exists.
pub fn load() -> Result<AppConfig> {
    let Some(path) = config_path() else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };
    load_from(&path)
}

pub fn load_from(path: &std::path::Path) -> Result<AppConfig> {
    if !path.exists() {
        debug!(?path, "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!(?path, "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.oss.page_size, 20);
        assert_eq!(config.theme.name, "Catppuccin Mocha");
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [theme]
            name = "Catppuccin Latte"

            [oss]
            page_size = 50

            [keybindings.pagination]
            next = "n"
            "#,
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.theme.name, "Catppuccin Latte");
        assert_eq!(config.oss.page_size, 50);
        assert_eq!(config.keybindings.pagination.next.display(), "n");
        assert_eq!(config.keybindings.pagination.prev.display(), "[");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[oss\npage_size = ").unwrap();
        assert!(load_from(&path).is_err());
    }
}
