use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::config::actions::{
    DialogAction, GlobalAction, NavAction, PageAction, ResourceAction, SearchAction,
};
use crate::config::key::Key;
use crate::config::keybindings::KeybindingsConfig;

/// Maps raw key events to logical actions using the configured bindings.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    /// `Ctrl+C` quits from anywhere, including text inputs.
    pub fn is_interrupt(event: &KeyEvent) -> bool {
        Key::with_ctrl(KeyCode::Char('c')).matches(event)
    }

    // Global actions
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::Back => kb.back.matches(event),
            GlobalAction::Help => kb.help.matches(event),
            GlobalAction::Profiles => kb.profiles.matches(event),
        }
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::Back => kb.back.display(),
            GlobalAction::Help => kb.help.display(),
            GlobalAction::Profiles => kb.profiles.display(),
        }
    }

    // Navigation actions
    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.matches(event),
            NavAction::Down => kb.down.matches(event),
            NavAction::PageUp => kb.page_up.matches(event),
            NavAction::PageDown => kb.page_down.matches(event),
            NavAction::Home => kb.home.matches(event),
            NavAction::End => kb.end.matches(event),
            NavAction::Select => kb.select.matches(event),
        }
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.display(),
            NavAction::Down => kb.down.display(),
            NavAction::PageUp => kb.page_up.display(),
            NavAction::PageDown => kb.page_down.display(),
            NavAction::Home => kb.home.display(),
            NavAction::End => kb.end.display(),
            NavAction::Select => kb.select.display(),
        }
    }

    // Search actions
    pub fn matches_search(&self, event: &KeyEvent, action: SearchAction) -> bool {
        let kb = &self.keybindings.search;
        match action {
            SearchAction::Start => kb.start.matches(event),
            SearchAction::Next => kb.next.matches(event),
            SearchAction::Prev => kb.prev.matches(event),
        }
    }

    pub fn display_search(&self, action: SearchAction) -> String {
        let kb = &self.keybindings.search;
        match action {
            SearchAction::Start => kb.start.display(),
            SearchAction::Next => kb.next.display(),
            SearchAction::Prev => kb.prev.display(),
        }
    }

    // Resource actions
    pub fn matches_resource(&self, event: &KeyEvent, action: ResourceAction) -> bool {
        let kb = &self.keybindings.resource;
        match action {
            ResourceAction::Copy => kb.copy.matches(event),
            ResourceAction::Edit => kb.edit.matches(event),
            ResourceAction::Databases => kb.databases.matches(event),
            ResourceAction::Accounts => kb.accounts.matches(event),
            ResourceAction::Listeners => kb.listeners.matches(event),
            ResourceAction::Topics => kb.topics.matches(event),
            ResourceAction::Groups => kb.groups.matches(event),
        }
    }

    pub fn display_resource(&self, action: ResourceAction) -> String {
        let kb = &self.keybindings.resource;
        match action {
            ResourceAction::Copy => kb.copy.display(),
            ResourceAction::Edit => kb.edit.display(),
            ResourceAction::Databases => kb.databases.display(),
            ResourceAction::Accounts => kb.accounts.display(),
            ResourceAction::Listeners => kb.listeners.display(),
            ResourceAction::Topics => kb.topics.display(),
            ResourceAction::Groups => kb.groups.display(),
        }
    }

    // Pagination actions
    pub fn matches_page(&self, event: &KeyEvent, action: PageAction) -> bool {
        let kb = &self.keybindings.pagination;
        match action {
            PageAction::Next => kb.next.matches(event),
            PageAction::Prev => kb.prev.matches(event),
            PageAction::First => kb.first.matches(event),
        }
    }

    pub fn display_page(&self, action: PageAction) -> String {
        let kb = &self.keybindings.pagination;
        match action {
            PageAction::Next => kb.next.display(),
            PageAction::Prev => kb.prev.display(),
            PageAction::First => kb.first.display(),
        }
    }

    // Dialog actions
    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        match action {
            DialogAction::Dismiss => self.keybindings.dialog.dismiss.matches(event),
        }
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        match action {
            DialogAction::Dismiss => self.keybindings.dialog.dismiss.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_back_and_quit_are_distinct() {
        let resolver = KeyResolver::default();
        assert!(resolver.matches_global(&key('q'), GlobalAction::Back));
        assert!(!resolver.matches_global(&key('q'), GlobalAction::Quit));
        assert!(resolver.matches_global(&key('Q'), GlobalAction::Quit));
        assert!(!resolver.matches_global(&key('Q'), GlobalAction::Back));
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(KeyResolver::is_interrupt(&ctrl_c));
        assert!(!KeyResolver::is_interrupt(&key('c')));
    }

    #[test]
    fn test_default_displays() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.display_global(GlobalAction::Back), "Esc/q");
        assert_eq!(resolver.display_search(SearchAction::Prev), "N/p");
        assert_eq!(resolver.display_page(PageAction::Next), "]");
        assert_eq!(resolver.display_nav(NavAction::Up), "k/↑");
    }
}
