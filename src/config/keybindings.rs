use serde::{Deserialize, Serialize};

use crate::config::key::KeyBinding;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub back: KeyBinding,
    pub help: KeyBinding,
    pub profiles: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub select: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchKeybindings {
    pub start: KeyBinding,
    pub next: KeyBinding,
    pub prev: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceKeybindings {
    pub copy: KeyBinding,
    pub edit: KeyBinding,
    pub databases: KeyBinding,
    pub accounts: KeyBinding,
    pub listeners: KeyBinding,
    pub topics: KeyBinding,
    pub groups: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationKeybindings {
    pub next: KeyBinding,
    pub prev: KeyBinding,
    pub first: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub dismiss: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub search: SearchKeybindings,
    pub resource: ResourceKeybindings,
    pub pagination: PaginationKeybindings,
    pub dialog: DialogKeybindings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::key::Key;

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: KeybindingsConfig = toml::from_str(
            r#"
            [global]
            quit = "ctrl+q"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.global.quit,
            KeyBinding::Single("ctrl+q".parse::<Key>().unwrap())
        );
        assert_eq!(config.global.back, GlobalKeybindings::default().back);
        assert_eq!(config.pagination.next, PaginationKeybindings::default().next);
    }
}
