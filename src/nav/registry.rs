//! Page widgets keyed by [`PageId`], plus the front-page pointer.

use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::debug;

use super::PageId;
use super::menu::MainMenu;
use crate::Theme;
use crate::config::{KeyResolver, PageAction, ResourceAction};
use crate::model::Resource;
use crate::ui::{Component, EventResult, Result, Table, TableEvent, TableRow, TextView, TextViewEvent};

const SUB_RESOURCE_ACTIONS: [ResourceAction; 5] = [
    ResourceAction::Databases,
    ResourceAction::Accounts,
    ResourceAction::Listeners,
    ResourceAction::Topics,
    ResourceAction::Groups,
];

const PAGE_ACTIONS: [PageAction; 3] = [PageAction::Next, PageAction::Prev, PageAction::First];

/// What a page asks the navigation controller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Open(PageId),
    Quit,
    Activated(Resource),
    SubResource(ResourceAction, Resource),
    Copy(Resource),
    Edit(Resource),
    Paginate(PageAction),
}

impl TableRow for Resource {
    fn cells(&self) -> Vec<String> {
        Self::cells(self)
    }
}

/// A resource list.
pub struct TablePage {
    id: PageId,
    table: Table<Resource>,
    resolver: Arc<KeyResolver>,
}

impl TablePage {
    pub fn new(id: PageId, table: Table<Resource>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            id,
            table,
            resolver,
        }
    }

    pub fn table(&self) -> &Table<Resource> {
        &self.table
    }

    fn selected(&self) -> Option<Resource> {
        self.table.selected_item().cloned()
    }
}

impl Component for TablePage {
    type Output = PageEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        // Page-specific keys first: `G` is both End and RocketMQ groups.
        for action in SUB_RESOURCE_ACTIONS {
            if self.id.sub_page(action).is_some() && self.resolver.matches_resource(&key, action) {
                return Ok(self
                    .selected()
                    .map_or(EventResult::Consumed, |r| PageEvent::SubResource(action, r).into()));
            }
        }
        if self.id.is_paginated() {
            for action in PAGE_ACTIONS {
                if self.resolver.matches_page(&key, action) {
                    return Ok(PageEvent::Paginate(action).into());
                }
            }
        }

        Ok(match self.table.handle_key(key)? {
            EventResult::Event(TableEvent::Activated(r)) => PageEvent::Activated(r).into(),
            EventResult::Event(TableEvent::Yanked(r)) => PageEvent::Copy(r).into(),
            EventResult::Consumed => EventResult::Consumed,
            EventResult::Ignored => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.table.render(frame, area, theme);
    }
}

/// Pretty JSON of a single resource.
pub struct DetailPage {
    resource: Resource,
    view: TextView,
}

impl DetailPage {
    pub fn new(resource: Resource, json: &str, resolver: Arc<KeyResolver>) -> Self {
        Self {
            view: TextView::new(resource.detail_title(), json, resolver),
            resource,
        }
    }

    pub fn view(&self) -> &TextView {
        &self.view
    }
}

impl Component for DetailPage {
    type Output = PageEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        let resource = self.resource.clone();
        Ok(self.view.handle_key(key)?.map(|event| match event {
            TextViewEvent::Yanked => PageEvent::Copy(resource),
            TextViewEvent::Edit => PageEvent::Edit(resource),
        }))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.view.render(frame, area, theme);
    }
}

pub enum Page {
    Menu(MainMenu),
    Table(TablePage),
    Detail(DetailPage),
}

impl Page {
    /// Run a committed search. Empty queries clear it.
    pub fn apply_search(&mut self, query: &str) {
        match self {
            Self::Menu(_) => {}
            Self::Table(page) if query.is_empty() => page.table.clear_search(),
            Self::Table(page) => page.table.apply_search(query),
            Self::Detail(page) if query.is_empty() => page.view.clear_search(),
            Self::Detail(page) => page.view.apply_search(query),
        }
    }

    pub const fn is_searchable(&self) -> bool {
        !matches!(self, Self::Menu(_))
    }
}

impl Component for Page {
    type Output = PageEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        match self {
            Self::Menu(menu) => menu.handle_key(key),
            Self::Table(page) => page.handle_key(key),
            Self::Detail(page) => page.handle_key(key),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self {
            Self::Menu(menu) => menu.render(frame, area, theme),
            Self::Table(page) => page.render(frame, area, theme),
            Self::Detail(page) => page.render(frame, area, theme),
        }
    }
}

/// Owns every built page. The main menu is always registered.
pub struct PageRegistry {
    pages: HashMap<PageId, Page>,
    front: PageId,
}

impl PageRegistry {
    pub fn new(menu: MainMenu) -> Self {
        let mut pages = HashMap::new();
        pages.insert(PageId::MainMenu, Page::Menu(menu));
        Self {
            pages,
            front: PageId::MainMenu,
        }
    }

    /// Add or replace a page without showing it.
    pub fn register(&mut self, id: PageId, page: Page) {
        debug!(page = %id, "Registering page");
        self.pages.insert(id, page);
    }

    pub fn contains(&self, id: PageId) -> bool {
        self.pages.contains_key(&id)
    }

    /// Bring a registered page to the front. Returns `false` if unknown.
    pub fn switch_to(&mut self, id: PageId) -> bool {
        if !self.pages.contains_key(&id) {
            return false;
        }
        self.front = id;
        true
    }

    pub const fn front(&self) -> PageId {
        self.front
    }

    pub fn front_page(&self) -> Option<&Page> {
        self.pages.get(&self.front)
    }

    pub fn front_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.get_mut(&self.front)
    }

    /// Drop every page except the main menu and show it.
    pub fn reset_to_home(&mut self) {
        self.pages.retain(|id, _| *id == PageId::MainMenu);
        self.front = PageId::MainMenu;
    }
}
