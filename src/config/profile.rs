//! Credential profiles stored in the Aliyun CLI's `~/.aliyun/config.json`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, bail, eyre};
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

const DEFAULT_PROFILE: &str = "default";
const FALLBACK_EDITOR: &str = "vim";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileEntry {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    mode: String,
    #[serde(default)]
    access_key_id: String,
    #[serde(default)]
    access_key_secret: String,
    #[serde(default)]
    region_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    oss_endpoint: String,
    /// Fields owned by the aliyun CLI that we must write back untouched.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    current: String,
    #[serde(default)]
    profiles: Vec<ProfileEntry>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    editor: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// A validated profile ready to build API clients from.
#[derive(Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    pub region_id: String,
    pub oss_endpoint: String,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .field("region_id", &self.region_id)
            .field("oss_endpoint", &self.oss_endpoint)
            .finish()
    }
}

pub struct ProfileStore {
    path: PathBuf,
    file: ConfigFile,
    /// `current` as last written to disk.
    saved_current: String,
}

impl ProfileStore {
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".aliyun").join("config.json"))
            .ok_or_else(|| eyre!("could not determine home directory"))
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read aliyun config file at {}", path.display()))?;
        let file: ConfigFile = serde_json::from_str(&content)
            .wrap_err_with(|| format!("failed to parse aliyun config file {}", path.display()))?;
        if file.profiles.is_empty() {
            bail!("no profiles found in aliyun config file: {}", path.display());
        }
        debug!(path = %path.display(), profiles = file.profiles.len(), "Loaded profile store");
        let saved_current = file.current.clone();
        Ok(Self {
            path,
            file,
            saved_current,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.file.profiles.iter().map(|p| p.name.clone()).collect()
    }

    fn resolve_name(&self) -> Option<String> {
        if !self.file.current.is_empty() {
            return Some(self.file.current.clone());
        }
        match self.file.profiles.as_slice() {
            [only] => Some(only.name.clone()),
            profiles => profiles
                .iter()
                .find(|p| p.name == DEFAULT_PROFILE)
                .map(|p| p.name.clone()),
        }
    }

    /// Resolve and validate the active profile.
    pub fn active(&self) -> Result<Profile> {
        let name = self.resolve_name().ok_or_else(|| {
            eyre!(
                "no current profile specified in {}, and no '{DEFAULT_PROFILE}' profile found",
                self.path.display()
            )
        })?;
        let entry = self
            .file
            .profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| {
                eyre!("current profile '{name}' not found in {}", self.path.display())
            })?;

        if entry.access_key_id.is_empty()
            || entry.access_key_secret.is_empty()
            || entry.region_id.is_empty()
        {
            bail!(
                "profile '{}' in {} is missing access_key_id, access_key_secret, or region_id",
                entry.name,
                self.path.display()
            );
        }

        let oss_endpoint = if entry.oss_endpoint.is_empty() {
            format!("oss-{}.aliyuncs.com", entry.region_id)
        } else {
            entry.oss_endpoint.clone()
        };

        Ok(Profile {
            name: entry.name.clone(),
            access_key_id: entry.access_key_id.clone(),
            access_key_secret: entry.access_key_secret.clone(),
            region_id: entry.region_id.clone(),
            oss_endpoint,
        })
    }

    /// Make `name` current for this session only. The file is not rewritten.
    pub fn select(&mut self, name: &str) -> Result<()> {
        if !self.file.profiles.iter().any(|p| p.name == name) {
            bail!("profile '{name}' not found");
        }
        self.file.current = name.to_string();
        Ok(())
    }

    /// Persist `name` as the current profile.
    pub fn set_current(&mut self, name: &str) -> Result<()> {
        self.select(name)?;
        self.save()
    }

    /// Make `name` current and build something from it. Any failure restores
    /// the previous `current` on disk before the error is returned.
    pub fn switch_profile<T>(
        &mut self,
        name: &str,
        build: impl FnOnce(&Profile) -> Result<T>,
    ) -> Result<T> {
        let previous = self.file.current.clone();
        let saved = self.saved_current.clone();
        let attempt = self
            .set_current(name)
            .and_then(|()| self.active())
            .and_then(|profile| build(&profile));

        match attempt {
            Ok(value) => {
                info!(profile = name, "Switched profile");
                Ok(value)
            }
            Err(err) => {
                warn!(profile = name, error = %err, "Profile switch failed, rolling back");
                self.file.current = saved;
                if let Err(save_err) = self.save() {
                    warn!(error = %save_err, "Failed to restore previous profile");
                }
                self.file.current = previous;
                Err(err)
            }
        }
    }

    /// Editor command: the store's `editor` field, then `$VISUAL`, then `$EDITOR`.
    pub fn editor(&self) -> String {
        resolve_editor(
            &self.file.editor,
            std::env::var("VISUAL").ok(),
            std::env::var("EDITOR").ok(),
        )
    }

    fn save(&mut self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.file)?;
        fs::write(&self.path, content)
            .wrap_err_with(|| format!("failed to write {}", self.path.display()))?;
        self.saved_current.clone_from(&self.file.current);
        debug!(path = %self.path.display(), current = %self.file.current, "Saved profile store");
        Ok(())
    }
}

fn resolve_editor(configured: &str, visual: Option<String>, editor: Option<String>) -> String {
    [Some(configured.to_string()), visual, editor]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PROFILES: &str = r#"{
        "current": "",
        "profiles": [
            {"name": "default", "mode": "AK", "access_key_id": "id-a",
             "access_key_secret": "secret-a", "region_id": "cn-hangzhou",
             "output_format": "json"},
            {"name": "prod", "mode": "AK", "access_key_id": "id-b",
             "access_key_secret": "secret-b", "region_id": "cn-shanghai",
             "oss_endpoint": "oss-internal.example.com"},
            {"name": "broken", "mode": "AK", "access_key_id": "",
             "access_key_secret": "", "region_id": ""}
        ],
        "meta_path": "keep-me"
    }"#;

    fn store_with(content: &str) -> (tempfile::TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, content).unwrap();
        let store = ProfileStore::open(&path).unwrap();
        (dir, store)
    }

    #[test]
    fn test_falls_back_to_default_profile() {
        let (_dir, store) = store_with(TWO_PROFILES);
        let profile = store.active().unwrap();
        assert_eq!(profile.name, "default");
        assert_eq!(profile.oss_endpoint, "oss-cn-hangzhou.aliyuncs.com");
    }

    #[test]
    fn test_single_profile_is_active() {
        let (_dir, store) = store_with(
            r#"{"profiles": [{"name": "solo", "access_key_id": "a",
                "access_key_secret": "b", "region_id": "us-west-1"}]}"#,
        );
        assert_eq!(store.active().unwrap().name, "solo");
    }

    #[test]
    fn test_no_current_and_no_default_is_an_error() {
        let (_dir, store) = store_with(
            r#"{"profiles": [
                {"name": "a", "access_key_id": "a", "access_key_secret": "b", "region_id": "r"},
                {"name": "b", "access_key_id": "a", "access_key_secret": "b", "region_id": "r"}
            ]}"#,
        );
        assert!(store.active().is_err());
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"profiles": []}"#).unwrap();
        assert!(ProfileStore::open(&path).is_err());
    }

    #[test]
    fn test_custom_oss_endpoint_is_kept() {
        let (_dir, mut store) = store_with(TWO_PROFILES);
        store.set_current("prod").unwrap();
        assert_eq!(store.active().unwrap().oss_endpoint, "oss-internal.example.com");
    }

    #[test]
    fn test_select_does_not_touch_the_file() {
        let (_dir, mut store) = store_with(TWO_PROFILES);
        let before = fs::read_to_string(store.path()).unwrap();

        store.select("prod").unwrap();
        assert_eq!(store.active().unwrap().name, "prod");
        assert!(store.select("missing").is_err());
        assert_eq!(store.active().unwrap().name, "prod");

        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        let reopened = ProfileStore::open(store.path()).unwrap();
        assert_eq!(reopened.active().unwrap().name, "default");

        let result: Result<()> = store.switch_profile("default", |_| Err(eyre!("no network")));
        assert!(result.is_err());
        assert_eq!(store.active().unwrap().name, "prod");
        let reopened = ProfileStore::open(store.path()).unwrap();
        assert_eq!(reopened.active().unwrap().name, "default");
        assert!(!fs::read_to_string(store.path()).unwrap().contains("\"current\": \"prod\""));
    }

    #[test]
    fn test_switch_persists_and_keeps_unknown_fields() {
        let (_dir, mut store) = store_with(TWO_PROFILES);
        let region = store
            .switch_profile("prod", |p| Ok(p.region_id.clone()))
            .unwrap();
        assert_eq!(region, "cn-shanghai");

        let written = fs::read_to_string(store.path()).unwrap();
        let reopened = ProfileStore::open(store.path()).unwrap();
        assert_eq!(reopened.active().unwrap().name, "prod");
        assert!(written.contains("keep-me"));
        assert!(written.contains("output_format"));
    }

    #[test]
    fn test_switch_rolls_back_when_build_fails() {
        let (_dir, mut store) = store_with(TWO_PROFILES);
        store.set_current("default").unwrap();

        let result: Result<()> = store.switch_profile("prod", |_| Err(eyre!("no network")));
        assert!(result.is_err());

        let reopened = ProfileStore::open(store.path()).unwrap();
        assert_eq!(reopened.active().unwrap().name, "default");
    }

    #[test]
    fn test_switch_rolls_back_on_invalid_profile() {
        let (_dir, mut store) = store_with(TWO_PROFILES);
        let result = store.switch_profile("broken", |_| Ok(()));
        assert!(result.is_err());
        assert_eq!(store.active().unwrap().name, "default");

        assert!(store.switch_profile("missing", |_| Ok(())).is_err());
        assert_eq!(store.active().unwrap().name, "default");
    }

    #[test]
    fn test_secret_not_in_debug_output() {
        let (_dir, store) = store_with(TWO_PROFILES);
        let debug = format!("{:?}", store.active().unwrap());
        assert!(!debug.contains("secret-a"));
    }

    #[test]
    fn test_editor_priority() {
        assert_eq!(resolve_editor("nvim", Some("code".into()), None), "nvim");
        assert_eq!(
            resolve_editor("", Some("code -w".into()), Some("nano".into())),
            "code -w"
        );
        assert_eq!(resolve_editor("", None, Some("nano".into())), "nano");
        assert_eq!(resolve_editor("", Some(" ".into()), None), "vim");
    }
}
