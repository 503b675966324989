use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;

/// The three mode-line segments: profile, page hint and OSS page info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeLine {
    pub profile: String,
    pub hint: String,
    pub page_info: Option<String>,
}

impl ModeLine {
    pub fn profile_segment(&self) -> String {
        format!(" Profile: {} | Press 'O' to switch profile ", self.profile)
    }
}

/// Bottom bar rendering the [`ModeLine`].
pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme, mode: &ModeLine) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.surface1()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let profile = mode.profile_segment();
        let page_info = mode.page_info.clone().unwrap_or_default();
        let chunks = Layout::horizontal([
            Constraint::Length(u16::try_from(profile.chars().count()).unwrap_or(u16::MAX)),
            Constraint::Min(10),
            Constraint::Length(u16::try_from(page_info.chars().count() + 1).unwrap_or(u16::MAX)),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                profile,
                Style::default()
                    .fg(theme.base())
                    .bg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(mode.hint.as_str(), Style::default().fg(theme.subtext0())),
            ])),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                page_info,
                Style::default().fg(theme.peach()).add_modifier(Modifier::BOLD),
            )),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_segment() {
        let mode = ModeLine {
            profile: "prod".into(),
            ..ModeLine::default()
        };
        assert_eq!(
            mode.profile_segment(),
            " Profile: prod | Press 'O' to switch profile "
        );
    }
}
