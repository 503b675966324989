use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table as RatatuiTable, TableState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction, ResourceAction, SearchAction};
use crate::nav::YankTracker;
use crate::search::{MatchLocation, SearchState};
use crate::ui::{Component, EventResult, Result, search_footer};

const PAGE_STEP: usize = 10;
const MAX_COLUMN_WIDTH: u16 = 48;

pub enum TableEvent<T> {
    Activated(T),
    Yanked(T),
}

pub trait TableRow {
    fn cells(&self) -> Vec<String>;
}

/// Selectable table with in-view search and `yy` copy.
pub struct Table<T: TableRow + Clone> {
    items: Vec<T>,
    headers: &'static [&'static str],
    state: TableState,
    title: String,
    empty_message: String,
    search: SearchState,
    yank: YankTracker,
    resolver: Arc<KeyResolver>,
}

impl<T: TableRow + Clone> Table<T> {
    pub fn new(items: Vec<T>, headers: &'static [&'static str], resolver: Arc<KeyResolver>) -> Self {
        let mut state = TableState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self {
            items,
            headers,
            state,
            title: String::new(),
            empty_message: "No data.".to_string(),
            search: SearchState::default(),
            yank: YankTracker::default(),
            resolver,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected_index().and_then(|i| self.items.get(i))
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Scan every cell for `query` and jump to the first hit.
    pub fn apply_search(&mut self, query: &str) {
        self.search = SearchState::scan_cells(query, self.items.iter().map(TableRow::cells));
        self.jump_to_match(self.search.current());
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    fn jump_to_match(&mut self, location: Option<MatchLocation>) {
        if let Some(MatchLocation::Cell { row, .. }) = location {
            self.state.select(Some(row));
        }
    }

    fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = self
            .state
            .selected()
            .map_or(0, |i| (i + 1).min(self.items.len() - 1));
        self.state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(i));
    }

    fn select_offset(&mut self, forward: bool) {
        if self.items.is_empty() {
            return;
        }
        let current = self.state.selected().unwrap_or(0);
        let i = if forward {
            (current + PAGE_STEP).min(self.items.len() - 1)
        } else {
            current.saturating_sub(PAGE_STEP)
        };
        self.state.select(Some(i));
    }

    fn column_widths(&self) -> Vec<Constraint> {
        let mut widths: Vec<u16> = self
            .headers
            .iter()
            .map(|h| u16::try_from(h.chars().count()).unwrap_or(u16::MAX))
            .collect();
        for item in &self.items {
            for (w, cell) in widths.iter_mut().zip(item.cells()) {
                let len = u16::try_from(cell.chars().count()).unwrap_or(u16::MAX);
                *w = (*w).max(len);
            }
        }
        let last = widths.len().saturating_sub(1);
        widths
            .into_iter()
            .enumerate()
            .map(|(i, w)| {
                if i == last {
                    Constraint::Min(w.min(MAX_COLUMN_WIDTH))
                } else {
                    Constraint::Length(w.min(MAX_COLUMN_WIDTH))
                }
            })
            .collect()
    }

    fn block(&self, theme: &Theme) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()))
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
    }
}

impl<T: TableRow + Clone> Component for Table<T> {
    type Output = TableEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.select_next();
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.select_previous();
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_nav(&key, NavAction::Home) {
            if !self.items.is_empty() {
                self.state.select(Some(0));
            }
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_nav(&key, NavAction::End) {
            if !self.items.is_empty() {
                self.state.select(Some(self.items.len() - 1));
            }
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_nav(&key, NavAction::PageDown) {
            self.select_offset(true);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_nav(&key, NavAction::PageUp) {
            self.select_offset(false);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_nav(&key, NavAction::Select) {
            return Ok(self
                .selected_item()
                .cloned()
                .map_or(EventResult::Ignored, |item| TableEvent::Activated(item).into()));
        }
        if self.resolver.matches_search(&key, SearchAction::Next) {
            let location = self.search.next();
            self.jump_to_match(location);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_search(&key, SearchAction::Prev) {
            let location = self.search.prev();
            self.jump_to_match(location);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_resource(&key, ResourceAction::Copy) {
            if self.yank.press()
                && let Some(item) = self.selected_item()
            {
                return Ok(TableEvent::Yanked(item.clone()).into());
            }
            return Ok(EventResult::Consumed);
        }

        Ok(EventResult::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let (table_area, search_area) = if self.search.is_active() {
            let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        if self.items.is_empty() {
            let empty = Paragraph::new(self.empty_message.as_str())
                .style(Style::default().fg(theme.overlay0()))
                .block(self.block(theme));
            frame.render_widget(empty, table_area);
            return;
        }

        let header = Row::new(self.headers.iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(theme.header())
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .height(1)
        .style(Style::default().bg(theme.surface0()));

        let hit_style = Style::default().fg(theme.base()).bg(theme.yellow());
        let current_style = Style::default()
            .fg(theme.base())
            .bg(theme.peach())
            .add_modifier(Modifier::BOLD);

        let rows: Vec<Row> = self
            .items
            .iter()
            .enumerate()
            .map(|(row, item)| {
                let cells = item.cells().into_iter().enumerate().map(|(col, text)| {
                    let cell = Cell::from(text);
                    match self.search.cell_state(row, col) {
                        Some(true) => cell.style(current_style),
                        Some(false) => cell.style(hit_style),
                        None => cell,
                    }
                });
                Row::new(cells).style(Style::default().fg(theme.text()))
            })
            .collect();

        let table = RatatuiTable::new(rows, self.column_widths())
            .header(header)
            .column_spacing(2)
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ")
            .block(self.block(theme));

        frame.render_stateful_widget(table, table_area, &mut self.state);

        if let Some(search_area) = search_area {
            frame.render_widget(search_footer(&self.search, theme), search_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[derive(Clone, Debug, PartialEq)]
    struct Row3(&'static str, &'static str);

    impl TableRow for Row3 {
        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    fn table() -> Table<Row3> {
        Table::new(
            vec![
                Row3("i-alpha", "Running"),
                Row3("i-beta", "Stopped"),
                Row3("i-gamma", "Running"),
            ],
            &["ID", "Status"],
            Arc::new(KeyResolver::default()),
        )
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_clamps() {
        let mut t = table();
        t.handle_key(key('k')).unwrap();
        assert_eq!(t.selected_index(), Some(0));
        t.handle_key(key('G')).unwrap();
        assert_eq!(t.selected_index(), Some(2));
        t.handle_key(key('j')).unwrap();
        assert_eq!(t.selected_index(), Some(2));
        t.handle_key(key('g')).unwrap();
        assert_eq!(t.selected_index(), Some(0));
    }

    #[test]
    fn test_search_selects_matching_rows() {
        let mut t = table();
        t.handle_key(key('j')).unwrap();
        t.apply_search("running");
        assert_eq!(t.selected_index(), Some(0));
        t.handle_key(key('n')).unwrap();
        assert_eq!(t.selected_index(), Some(2));
        t.handle_key(key('n')).unwrap();
        assert_eq!(t.selected_index(), Some(0));
        t.handle_key(key('N')).unwrap();
        assert_eq!(t.selected_index(), Some(2));
    }

    #[test]
    fn test_search_without_hits_keeps_selection() {
        let mut t = table();
        t.handle_key(key('j')).unwrap();
        t.apply_search("zzz");
        t.handle_key(key('n')).unwrap();
        assert_eq!(t.selected_index(), Some(1));
    }

    #[test]
    fn test_double_y_yanks_selected_row() {
        let mut t = table();
        t.handle_key(key('j')).unwrap();
        assert!(matches!(t.handle_key(key('y')).unwrap(), EventResult::Consumed));
        match t.handle_key(key('y')).unwrap() {
            EventResult::Event(TableEvent::Yanked(row)) => assert_eq!(row.0, "i-beta"),
            _ => panic!("expected a yank"),
        }
    }

    #[test]
    fn test_enter_activates_and_empty_ignores() {
        let mut t = table();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(
            t.handle_key(enter).unwrap(),
            EventResult::Event(TableEvent::Activated(Row3("i-alpha", _)))
        ));

        let mut empty: Table<Row3> = Table::new(Vec::new(), &["ID"], Arc::new(KeyResolver::default()));
        assert!(matches!(empty.handle_key(enter).unwrap(), EventResult::Ignored));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut t = table();
        assert!(matches!(t.handle_key(key('D')).unwrap(), EventResult::Ignored));
    }
}
