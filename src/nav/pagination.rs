//! Marker-based pagination for OSS object listings.

use crate::config::PageAction;
use crate::model::ObjectPage;

/// Cursor over a marker-paginated listing.
///
/// `history` holds the markers of every earlier page, so
/// `history.len() == page - 1` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorStack {
    marker: String,
    history: Vec<String>,
    page: usize,
    has_next: bool,
    next_marker: String,
    page_size: u32,
}

impl CursorStack {
    pub const fn new(page_size: u32) -> Self {
        Self {
            marker: String::new(),
            history: Vec::new(),
            page: 1,
            has_next: false,
            next_marker: String::new(),
            page_size,
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    pub const fn has_next(&self) -> bool {
        self.has_next && !self.next_marker.is_empty()
    }

    pub const fn has_prev(&self) -> bool {
        !self.history.is_empty()
    }

    /// Move to the next page. Returns `false` when there is none.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        let next = std::mem::take(&mut self.next_marker);
        self.history.push(std::mem::replace(&mut self.marker, next));
        self.page += 1;
        self.has_next = false;
        true
    }

    /// Move to the previous page. Returns `false` on the first page.
    pub fn prev(&mut self) -> bool {
        let Some(marker) = self.history.pop() else {
            return false;
        };
        self.marker = marker;
        self.page -= 1;
        self.has_next = false;
        self.next_marker.clear();
        true
    }

    pub fn first(&mut self) {
        self.marker.clear();
        self.history.clear();
        self.page = 1;
        self.has_next = false;
        self.next_marker.clear();
    }

    /// Apply a pagination key. Returns whether the cursor moved.
    pub fn apply(&mut self, action: PageAction) -> bool {
        match action {
            PageAction::Next => self.next(),
            PageAction::Prev => self.prev(),
            PageAction::First => {
                self.first();
                true
            }
        }
    }

    /// Remember what the listing reported for the current page.
    pub fn record_page(&mut self, page: &ObjectPage) {
        self.has_next = page.is_truncated;
        self.next_marker.clone_from(&page.next_marker);
    }

    /// Mode line text, e.g. `Page 2+`.
    pub fn page_info(&self) -> String {
        if self.has_next() {
            format!("Page {}+", self.page)
        } else {
            format!("Page {}", self.page)
        }
    }
}

impl Default for CursorStack {
    fn default() -> Self {
        Self::new(20)
    }
}
