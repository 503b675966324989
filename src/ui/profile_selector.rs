use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, ListItem, Paragraph};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, SearchAction};
use crate::search::Matcher;
use crate::ui::{Component, EventResult, List, ListEvent, ListRow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfileEntry {
    name: String,
    current: bool,
}

impl ListRow for ProfileEntry {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        let marker = if self.current { "● " } else { "  " };
        ListItem::new(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.green())),
            Span::styled(self.name.clone(), Style::default().fg(theme.text())),
        ]))
    }
}

pub enum ProfileEvent {
    Selected(String),
    Cancelled,
}

/// Popup listing the profiles in the credential store, with fuzzy filter.
pub struct ProfileSelector {
    profiles: Vec<ProfileEntry>,
    list: List<ProfileEntry>,
    filter: String,
    filtering: bool,
    matcher: Matcher,
    resolver: Arc<KeyResolver>,
}

impl ProfileSelector {
    pub fn new(names: Vec<String>, current: &str, resolver: Arc<KeyResolver>) -> Self {
        let profiles: Vec<ProfileEntry> = names
            .into_iter()
            .map(|name| ProfileEntry {
                current: name == current,
                name,
            })
            .collect();
        let mut list = List::new(profiles.clone(), Arc::clone(&resolver));
        if let Some(i) = profiles.iter().position(|p| p.current) {
            list.select(i);
        }
        Self {
            profiles,
            list,
            filter: String::new(),
            filtering: false,
            matcher: Matcher::new(),
            resolver,
        }
    }

    fn refilter(&mut self) {
        let mut scored: Vec<(i64, &ProfileEntry)> = self
            .profiles
            .iter()
            .filter_map(|p| {
                if self.filter.is_empty() {
                    Some((0, p))
                } else {
                    self.matcher.score(&p.name, &self.filter).map(|s| (s, p))
                }
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        self.list
            .set_items(scored.into_iter().map(|(_, p)| p.clone()).collect());
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> EventResult<ProfileEvent> {
        match key.code {
            KeyCode::Esc => {
                self.filtering = false;
                self.filter.clear();
                self.refilter();
            }
            KeyCode::Enter => self.filtering = false,
            KeyCode::Backspace => {
                self.filter.pop();
                self.refilter();
            }
            KeyCode::Char(c) => {
                self.filter.push(c);
                self.refilter();
            }
            _ => {}
        }
        EventResult::Consumed
    }
}

impl Component for ProfileSelector {
    type Output = ProfileEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.filtering {
            return Ok(self.handle_filter_key(key));
        }
        if self.resolver.matches_search(&key, SearchAction::Start) {
            self.filtering = true;
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_global(&key, GlobalAction::Back) {
            return Ok(ProfileEvent::Cancelled.into());
        }

        Ok(match self.list.handle_key(key)? {
            EventResult::Event(ListEvent::Activated(entry)) => {
                ProfileEvent::Selected(entry.name).into()
            }
            EventResult::Consumed | EventResult::Ignored => EventResult::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(40), Constraint::Percentage(50));
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Switch Profile (Enter to select, / to filter, Esc to cancel) ")
            .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        if self.filtering || !self.filter.is_empty() {
            let [list_area, filter_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
            self.list.render(frame, list_area, theme);
            let cursor = if self.filtering { "_" } else { "" };
            frame.render_widget(
                Paragraph::new(format!("/{}{cursor}", self.filter))
                    .style(Style::default().fg(theme.yellow())),
                filter_area,
            );
        } else {
            self.list.render(frame, inner, theme);
        }
    }
}
