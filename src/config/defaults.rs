use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{
    DialogKeybindings, GlobalKeybindings, NavigationKeybindings, PaginationKeybindings,
    ResourceKeybindings, SearchKeybindings,
};

fn keys(list: &[Key]) -> KeyBinding {
    KeyBinding::Multiple(list.to_vec())
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::char('Q').into(),
            back: keys(&[Key::new(KeyCode::Esc), Key::char('q')]),
            help: Key::char('?').into(),
            profiles: Key::char('O').into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: keys(&[Key::char('k'), Key::new(KeyCode::Up)]),
            down: keys(&[Key::char('j'), Key::new(KeyCode::Down)]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: keys(&[Key::char('g'), Key::new(KeyCode::Home)]),
            end: keys(&[Key::char('G'), Key::new(KeyCode::End)]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            start: Key::char('/').into(),
            next: Key::char('n').into(),
            prev: keys(&[Key::char('N'), Key::char('p')]),
        }
    }
}

impl Default for ResourceKeybindings {
    fn default() -> Self {
        Self {
            copy: Key::char('y').into(),
            edit: Key::char('e').into(),
            databases: Key::char('D').into(),
            accounts: Key::char('A').into(),
            listeners: Key::char('L').into(),
            topics: Key::char('T').into(),
            groups: Key::char('G').into(),
        }
    }
}

impl Default for PaginationKeybindings {
    fn default() -> Self {
        Self {
            next: Key::char(']').into(),
            prev: Key::char('[').into(),
            first: Key::char('0').into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            dismiss: keys(&[
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Esc),
                Key::char('q'),
            ]),
        }
    }
}
