use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;
use crate::config::{KeyResolver, NavAction, ResourceAction, SearchAction};
use crate::nav::YankTracker;
use crate::search::{MatchLocation, SearchState};
use crate::ui::{Component, EventResult, Result, search_footer};

pub enum TextViewEvent {
    Yanked,
    Edit,
}

/// Scrollable read-only text with in-view search.
pub struct TextView {
    title: String,
    lines: Vec<String>,
    scroll: usize,
    /// Inner height from the last render, used for paging.
    viewport: usize,
    search: SearchState,
    yank: YankTracker,
    resolver: Arc<KeyResolver>,
}

impl TextView {
    pub fn new(title: impl Into<String>, text: &str, resolver: Arc<KeyResolver>) -> Self {
        Self {
            title: title.into(),
            lines: text.lines().map(str::to_string).collect(),
            scroll: 0,
            viewport: 1,
            search: SearchState::default(),
            yank: YankTracker::default(),
            resolver,
        }
    }

    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn apply_search(&mut self, query: &str) {
        self.search = SearchState::scan_lines(query, &self.lines);
        self.reveal(self.search.current());
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    fn reveal(&mut self, location: Option<MatchLocation>) {
        if let Some(MatchLocation::Text { line, .. }) = location
            && (line < self.scroll || line >= self.scroll + self.viewport)
        {
            self.scroll = line.min(self.max_scroll());
        }
    }

    fn styled_line(&self, index: usize, theme: &Theme) -> Line<'static> {
        let text = &self.lines[index];
        let current = self.search.current();
        let mut spans = Vec::new();
        let mut cursor = 0;
        for hit in self.search.matches() {
            let MatchLocation::Text { line, offset, len } = *hit else {
                continue;
            };
            if line != index {
                continue;
            }
            let style = if current == Some(*hit) {
                Style::default()
                    .fg(theme.base())
                    .bg(theme.peach())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.base()).bg(theme.yellow())
            };
            spans.push(Span::raw(text[cursor..offset].to_string()));
            spans.push(Span::styled(text[offset..offset + len].to_string(), style));
            cursor = offset + len;
        }
        spans.push(Span::raw(text[cursor..].to_string()));
        Line::from(spans)
    }
}

impl Component for TextView {
    type Output = TextViewEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        let page = self.viewport.max(1);

        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.scroll = (self.scroll + 1).min(self.max_scroll());
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            self.scroll = self.scroll.saturating_sub(1);
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            self.scroll = (self.scroll + page).min(self.max_scroll());
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            self.scroll = self.scroll.saturating_sub(page);
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            self.scroll = 0;
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            self.scroll = self.max_scroll();
        } else if self.resolver.matches_search(&key, SearchAction::Next) {
            let location = self.search.next();
            self.reveal(location);
        } else if self.resolver.matches_search(&key, SearchAction::Prev) {
            let location = self.search.prev();
            self.reveal(location);
        } else if self.resolver.matches_resource(&key, ResourceAction::Copy) {
            if self.yank.press() {
                return Ok(TextViewEvent::Yanked.into());
            }
        } else if self.resolver.matches_resource(&key, ResourceAction::Edit) {
            return Ok(TextViewEvent::Edit.into());
        } else {
            return Ok(EventResult::Ignored);
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let (text_area, search_area) = if self.search.is_active() {
            let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()))
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            );
        self.viewport = usize::from(block.inner(text_area).height);

        let end = (self.scroll + self.viewport).min(self.lines.len());
        let lines: Vec<Line> = (self.scroll..end)
            .map(|i| self.styled_line(i, theme))
            .collect();

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(theme.text()))
            .block(block);
        frame.render_widget(paragraph, text_area);

        if let Some(search_area) = search_area {
            frame.render_widget(search_footer(&self.search, theme), search_area);
        }
    }
}
