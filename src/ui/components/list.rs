use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{List as RatatuiList, ListItem, ListState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::ui::{Component, EventResult, Result};

const PAGE_STEP: usize = 5;

pub enum ListEvent<T> {
    Activated(T),
}

pub trait ListRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static>;
}

pub struct List<T: ListRow + Clone> {
    items: Vec<T>,
    state: ListState,
    resolver: Arc<KeyResolver>,
}

impl<T: ListRow + Clone> List<T> {
    pub fn new(items: Vec<T>, resolver: Arc<KeyResolver>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self {
            items,
            state,
            resolver,
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.state.select(Some(index));
        }
    }

    /// Replace the rows, keeping the selection in range.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.items.is_empty() {
            self.state.select(None);
        } else {
            let i = self.state.selected().unwrap_or(0).min(self.items.len() - 1);
            self.state.select(Some(i));
        }
    }
}

impl<T: ListRow + Clone> Component for List<T> {
    type Output = ListEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        let Some(last) = self.items.len().checked_sub(1) else {
            return Ok(EventResult::Ignored);
        };
        let current = self.state.selected().unwrap_or(0).min(last);

        let target = if self.resolver.matches_nav(&key, NavAction::Down) {
            Some((current + 1).min(last))
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            Some(current.saturating_sub(1))
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            Some(0)
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            Some(last)
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            Some(current.saturating_add(PAGE_STEP).min(last))
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            Some(current.saturating_sub(PAGE_STEP))
        } else {
            None
        };
        if let Some(i) = target {
            self.state.select(Some(i));
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_nav(&key, NavAction::Select) {
            return Ok(self
                .selected()
                .cloned()
                .map_or(EventResult::Ignored, |item| ListEvent::Activated(item).into()));
        }

        Ok(EventResult::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self.items.iter().map(|i| i.render_row(theme)).collect();

        let list = RatatuiList::new(items)
            .highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::text::Line;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(usize);

    impl ListRow for Row {
        fn render_row(&self, _theme: &Theme) -> ListItem<'static> {
            ListItem::new(Line::from(self.0.to_string()))
        }
    }

    fn list(len: usize) -> List<Row> {
        List::new((0..len).map(Row).collect(), Arc::new(KeyResolver::default()))
    }

    fn press(list: &mut List<Row>, code: KeyCode) -> EventResult<ListEvent<Row>> {
        list.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_selection_stays_on_real_rows() {
        let mut rows = list(8);
        for _ in 0..12 {
            press(&mut rows, KeyCode::Down);
        }
        assert_eq!(rows.selected(), Some(&Row(7)));

        press(&mut rows, KeyCode::Home);
        press(&mut rows, KeyCode::PageDown);
        assert_eq!(rows.selected(), Some(&Row(5)));
        press(&mut rows, KeyCode::PageDown);
        assert_eq!(rows.selected(), Some(&Row(7)));

        press(&mut rows, KeyCode::End);
        press(&mut rows, KeyCode::PageDown);
        assert_eq!(rows.selected(), Some(&Row(7)));
        press(&mut rows, KeyCode::PageUp);
        assert_eq!(rows.selected(), Some(&Row(2)));
        assert!(matches!(
            press(&mut rows, KeyCode::Enter),
            EventResult::Event(ListEvent::Activated(Row(2)))
        ));
    }

    #[test]
    fn test_empty_list_ignores_keys() {
        let mut rows = list(0);
        for code in [KeyCode::Down, KeyCode::End, KeyCode::PageDown, KeyCode::Enter] {
            assert!(matches!(press(&mut rows, code), EventResult::Ignored));
        }
        assert_eq!(rows.selected(), None);
    }
}
