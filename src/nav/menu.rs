use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, ListItem};

use super::PageId;
use super::registry::PageEvent;
use crate::Theme;
use crate::config::KeyResolver;
use crate::ui::{Component, EventResult, List, ListEvent, ListRow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct MenuEntry {
    shortcut: char,
    label: &'static str,
    /// `None` quits.
    target: Option<PageId>,
}

impl MenuEntry {
    const fn new(shortcut: char, label: &'static str, target: Option<PageId>) -> Self {
        Self {
            shortcut,
            label,
            target,
        }
    }

    fn event(&self) -> PageEvent {
        self.target.map_or(PageEvent::Quit, PageEvent::Open)
    }
}

impl ListRow for MenuEntry {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        ListItem::new(Line::from(vec![
            Span::styled(
                format!("({}) ", self.shortcut),
                Style::default().fg(theme.peach()),
            ),
            Span::styled(self.label, Style::default().fg(theme.text())),
        ]))
    }
}

const ENTRIES: [MenuEntry; 8] = [
    MenuEntry::new('1', "ECS Instances", Some(PageId::EcsList)),
    MenuEntry::new('2', "DNS Management", Some(PageId::DnsDomains)),
    MenuEntry::new('3', "SLB Instances", Some(PageId::SlbList)),
    MenuEntry::new('4', "OSS Management", Some(PageId::OssBuckets)),
    MenuEntry::new('5', "RDS Instances", Some(PageId::RdsList)),
    MenuEntry::new('6', "Redis Instances", Some(PageId::RedisList)),
    MenuEntry::new('7', "RocketMQ Instances", Some(PageId::RocketMqList)),
    MenuEntry::new('Q', "Quit", None),
];

/// Root page listing every product.
pub struct MainMenu {
    list: List<MenuEntry>,
}

impl MainMenu {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            list: List::new(ENTRIES.to_vec(), resolver),
        }
    }
}

impl Component for MainMenu {
    type Output = PageEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if let KeyCode::Char(c) = key.code
            && let Some(entry) = ENTRIES.iter().find(|e| e.shortcut == c && e.target.is_some())
        {
            return Ok(entry.event().into());
        }

        Ok(match self.list.handle_key(key)? {
            EventResult::Event(ListEvent::Activated(entry)) => entry.event().into(),
            EventResult::Consumed => EventResult::Consumed,
            EventResult::Ignored => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()))
            .title(" Main Menu ")
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.list.render(frame, inner, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(menu: &mut MainMenu, code: KeyCode) -> EventResult<PageEvent> {
        menu.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_digit_shortcuts_open_products() {
        let mut menu = MainMenu::new(Arc::new(KeyResolver::default()));
        for (c, page) in [('1', PageId::EcsList), ('4', PageId::OssBuckets), ('7', PageId::RocketMqList)] {
            assert!(matches!(
                press(&mut menu, KeyCode::Char(c)),
                EventResult::Event(PageEvent::Open(p)) if p == page
            ));
        }
    }

    #[test]
    fn test_enter_on_last_entry_quits() {
        let mut menu = MainMenu::new(Arc::new(KeyResolver::default()));
        press(&mut menu, KeyCode::End);
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            EventResult::Event(PageEvent::Quit)
        ));
    }

    #[test]
    fn test_moving_past_the_end_keeps_quit_selected() {
        let mut menu = MainMenu::new(Arc::new(KeyResolver::default()));
        press(&mut menu, KeyCode::End);
        press(&mut menu, KeyCode::PageDown);
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            EventResult::Event(PageEvent::Quit)
        ));

        let mut menu = MainMenu::new(Arc::new(KeyResolver::default()));
        for _ in 0..12 {
            press(&mut menu, KeyCode::Char('j'));
        }
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            EventResult::Event(PageEvent::Quit)
        ));
    }

    #[test]
    fn test_enter_opens_selected() {
        let mut menu = MainMenu::new(Arc::new(KeyResolver::default()));
        press(&mut menu, KeyCode::Char('j'));
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            EventResult::Event(PageEvent::Open(PageId::DnsDomains))
        ));
    }
}
