//! Reusable widgets and app-level overlays.

pub mod components;
pub mod widgets;

mod error_dialog;
mod help;
mod profile_selector;
mod status_bar;
mod toast;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

pub use color_eyre::Result;

use crate::Theme;
use crate::search::SearchState;

pub use components::{List, ListEvent, ListRow, Table, TableEvent, TableRow, TextInput, TextInputEvent, TextView, TextViewEvent};
pub use error_dialog::{ErrorDialog, ErrorDialogEvent};
pub use help::{HelpEvent, HelpView, Keybinding, KeybindingSection};
pub use profile_selector::{ProfileEvent, ProfileSelector};
pub use status_bar::{ModeLine, StatusBar};
pub use toast::{Toast, ToastManager, ToastType};
pub use widgets::Spinner;

/// Result of handling an input event.
///
/// - `Ignored` - the handler didn't recognize this input
/// - `Consumed` - handled without producing anything
/// - `Event(E)` - handled and produced an output for the parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    Ignored,
    Consumed,
    Event(E),
}

impl<E> EventResult<E> {
    pub fn map<U>(self, f: impl FnOnce(E) -> U) -> EventResult<U> {
        match self {
            Self::Ignored => EventResult::Ignored,
            Self::Consumed => EventResult::Consumed,
            Self::Event(e) => EventResult::Event(f(e)),
        }
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
///
/// Components handle key events and hand typed outputs to their parent.
pub trait Component {
    type Output;

    /// Handle a key event.
    ///
    /// Returns `Ignored` when the parent should process the key instead.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for animations and time-based updates.
    fn handle_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// Shared search footer: `/query (2/5)`.
fn search_footer(search: &SearchState, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(search.summary()).style(Style::default().fg(theme.yellow()))
}
