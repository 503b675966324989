//! Navigation controller: which page is in front, how keys move between
//! pages, and what side effects a transition needs.

mod menu;
mod page;
mod pagination;
mod registry;
mod yank;

use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

pub use menu::MainMenu;
pub use page::PageId;
pub use pagination::CursorStack;
pub use registry::{DetailPage, Page, PageEvent, PageRegistry, TablePage};
pub use yank::YankTracker;

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, PageAction, ResourceAction, SearchAction};
use crate::model::{Bucket, Resource, into_resources};
use crate::service::{FetchRequest, Fetched};
use crate::ui::{Component, EventResult, ModeLine, Table, TextInput, TextInputEvent};

pub const ROW_COPIED: &str = "Row data copied to clipboard!";
pub const DETAIL_COPIED: &str = "Copied!";

/// Side effect requested by a key press or a finished fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Fetch { generation: u64, request: FetchRequest },
    Copy { text: String, message: &'static str },
    Edit { text: String },
    OpenProfiles,
    ShowHelp,
    Error(String),
}

/// Top-level lists fetched at most once per profile.
#[derive(Debug, Default)]
pub struct ResourceCache {
    lists: HashMap<PageId, Vec<Resource>>,
}

impl ResourceCache {
    pub fn get(&self, page: PageId) -> Option<&[Resource]> {
        self.lists.get(&page).map(Vec::as_slice)
    }

    pub fn store(&mut self, page: PageId, items: Vec<Resource>) {
        self.lists.insert(page, items);
    }

    pub fn clear(&mut self) {
        self.lists.clear();
    }
}

/// Page that shows the result of `request`.
pub const fn target_page(request: &FetchRequest) -> PageId {
    match request {
        FetchRequest::EcsInstances => PageId::EcsList,
        FetchRequest::Domains => PageId::DnsDomains,
        FetchRequest::DomainRecords { .. } => PageId::DnsRecords,
        FetchRequest::LoadBalancers => PageId::SlbList,
        FetchRequest::Listeners { .. } => PageId::SlbListeners,
        FetchRequest::Buckets => PageId::OssBuckets,
        FetchRequest::Objects { .. } => PageId::OssObjects,
        FetchRequest::DbInstances => PageId::RdsList,
        FetchRequest::Databases { .. } => PageId::RdsDatabases,
        FetchRequest::DbAccounts { .. } => PageId::RdsAccounts,
        FetchRequest::CacheInstances => PageId::RedisList,
        FetchRequest::CacheAccounts { .. } => PageId::RedisAccounts,
        FetchRequest::MqInstances => PageId::RocketMqList,
        FetchRequest::MqTopics { .. } => PageId::RocketMqTopics,
        FetchRequest::MqGroups { .. } => PageId::RocketMqGroups,
    }
}

fn list_request(page: PageId) -> Option<FetchRequest> {
    Some(match page {
        PageId::EcsList => FetchRequest::EcsInstances,
        PageId::DnsDomains => FetchRequest::Domains,
        PageId::SlbList => FetchRequest::LoadBalancers,
        PageId::OssBuckets => FetchRequest::Buckets,
        PageId::RdsList => FetchRequest::DbInstances,
        PageId::RedisList => FetchRequest::CacheInstances,
        PageId::RocketMqList => FetchRequest::MqInstances,
        _ => return None,
    })
}

fn sub_resource_request(action: ResourceAction, resource: &Resource) -> Option<FetchRequest> {
    let instance_id = resource.identity().to_string();
    Some(match (action, resource) {
        (ResourceAction::Databases, Resource::DbInstance(_)) => FetchRequest::Databases { instance_id },
        (ResourceAction::Accounts, Resource::DbInstance(_)) => FetchRequest::DbAccounts { instance_id },
        (ResourceAction::Accounts, Resource::CacheInstance(_)) => {
            FetchRequest::CacheAccounts { instance_id }
        }
        (ResourceAction::Listeners, Resource::LoadBalancer(_)) => FetchRequest::Listeners {
            load_balancer_id: instance_id,
        },
        (ResourceAction::Topics, Resource::MqInstance(_)) => FetchRequest::MqTopics { instance_id },
        (ResourceAction::Groups, Resource::MqInstance(_)) => FetchRequest::MqGroups { instance_id },
        _ => return None,
    })
}

fn table_title(request: &FetchRequest) -> String {
    match request {
        FetchRequest::EcsInstances => "ECS Instances".to_string(),
        FetchRequest::Domains => "DNS Domains".to_string(),
        FetchRequest::DomainRecords { domain } => format!("DNS Records for {domain}"),
        FetchRequest::LoadBalancers => "SLB Instances".to_string(),
        FetchRequest::Listeners { load_balancer_id } => format!("Listeners for {load_balancer_id}"),
        FetchRequest::Buckets => "OSS Buckets".to_string(),
        FetchRequest::Objects { bucket, .. } => format!("Objects in {}", bucket.name),
        FetchRequest::DbInstances => "RDS Instances".to_string(),
        FetchRequest::Databases { instance_id } => format!("Databases for RDS Instance: {instance_id}"),
        FetchRequest::DbAccounts { instance_id } => format!("Accounts for RDS Instance: {instance_id}"),
        FetchRequest::CacheInstances => "Redis Instances".to_string(),
        FetchRequest::CacheAccounts { instance_id } => {
            format!("Accounts for Redis Instance: {instance_id}")
        }
        FetchRequest::MqInstances => "RocketMQ Instances".to_string(),
        FetchRequest::MqTopics { .. } => "RocketMQ Topics".to_string(),
        FetchRequest::MqGroups { .. } => "RocketMQ Consumer Groups".to_string(),
    }
}

/// Owns every page, the caches and the OSS cursor for one session.
pub struct NavigationContext {
    registry: PageRegistry,
    cache: ResourceCache,
    cursor: CursorStack,
    /// Cursor transition awaiting its fetch.
    pending_cursor: Option<CursorStack>,
    bucket: Option<Bucket>,
    page_size: u32,
    mode_line: ModeLine,
    generation: u64,
    pending: Option<FetchRequest>,
    search_input: Option<TextInput>,
    resolver: Arc<KeyResolver>,
}

impl NavigationContext {
    pub fn new(profile: impl Into<String>, page_size: u32, resolver: Arc<KeyResolver>) -> Self {
        let mut nav = Self {
            registry: PageRegistry::new(MainMenu::new(Arc::clone(&resolver))),
            cache: ResourceCache::default(),
            cursor: CursorStack::new(page_size),
            pending_cursor: None,
            bucket: None,
            page_size,
            mode_line: ModeLine {
                profile: profile.into(),
                ..ModeLine::default()
            },
            generation: 0,
            pending: None,
            search_input: None,
            resolver,
        };
        nav.refresh_mode_line();
        nav
    }

    pub const fn front(&self) -> PageId {
        self.registry.front()
    }

    pub const fn mode_line(&self) -> &ModeLine {
        &self.mode_line
    }

    /// The request currently blocking input, if any.
    pub const fn pending(&self) -> Option<&FetchRequest> {
        self.pending.as_ref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> color_eyre::Result<Effect> {
        if KeyResolver::is_interrupt(&key) {
            return Ok(self.quit());
        }

        if self.pending.is_some() {
            if self.resolver.matches_global(&key, GlobalAction::Quit) {
                return Ok(self.quit());
            }
            return Ok(Effect::None);
        }

        if let Some(input) = self.search_input.as_mut() {
            match input.handle_key(key)? {
                EventResult::Event(TextInputEvent::Submitted(query)) => {
                    self.search_input = None;
                    if let Some(page) = self.registry.front_page_mut() {
                        page.apply_search(query.trim());
                    }
                }
                EventResult::Event(TextInputEvent::Cancelled) => self.search_input = None,
                EventResult::Consumed | EventResult::Ignored => {}
            }
            return Ok(Effect::None);
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            return Ok(self.quit());
        }
        if self.resolver.matches_global(&key, GlobalAction::Back) {
            self.go_back();
            return Ok(Effect::None);
        }
        if self.resolver.matches_global(&key, GlobalAction::Profiles) {
            return Ok(Effect::OpenProfiles);
        }
        if self.resolver.matches_global(&key, GlobalAction::Help) {
            return Ok(Effect::ShowHelp);
        }
        if self.resolver.matches_search(&key, SearchAction::Start) {
            if self.registry.front_page().is_some_and(Page::is_searchable) {
                if let Some(page) = self.registry.front_page_mut() {
                    page.apply_search("");
                }
                self.search_input = Some(TextInput::new("Search").with_placeholder("text to find"));
            }
            return Ok(Effect::None);
        }

        let event = match self.registry.front_page_mut() {
            Some(page) => page.handle_key(key)?,
            None => EventResult::Ignored,
        };
        Ok(match event {
            EventResult::Event(event) => self.handle_page_event(event),
            EventResult::Consumed | EventResult::Ignored => Effect::None,
        })
    }

    /// Quit is unconditional: it ignores pending fetches and open inputs.
    pub fn quit(&self) -> Effect {
        info!(page = %self.front(), "Quit requested");
        Effect::Quit
    }

    pub fn handle_page_event(&mut self, event: PageEvent) -> Effect {
        match event {
            PageEvent::Open(page) => self.open_list(page),
            PageEvent::Quit => self.quit(),
            PageEvent::Activated(resource) => self.activate(resource),
            PageEvent::SubResource(action, resource) => {
                match sub_resource_request(action, &resource) {
                    Some(request) => self.start_fetch(request),
                    None => Effect::None,
                }
            }
            PageEvent::Copy(resource) => {
                let message = if self.front().is_detail() {
                    DETAIL_COPIED
                } else {
                    ROW_COPIED
                };
                match resource.to_pretty_json() {
                    Ok(text) => Effect::Copy { text, message },
                    Err(err) => Effect::Error(format!("Failed to serialize resource: {err}")),
                }
            }
            PageEvent::Edit(resource) => match resource.to_pretty_json() {
                Ok(text) => Effect::Edit { text },
                Err(err) => Effect::Error(format!("Failed to serialize resource: {err}")),
            },
            PageEvent::Paginate(action) => self.paginate(action),
        }
    }

    fn open_list(&mut self, page: PageId) -> Effect {
        if let Some(items) = self.cache.get(page) {
            debug!(page = %page, "Showing cached list");
            if self.registry.contains(page) {
                self.switch_to(page);
            } else if let Some(request) = list_request(page) {
                let items = items.to_vec();
                self.show_table(&request, items);
            }
            return Effect::None;
        }
        list_request(page).map_or(Effect::None, |request| self.start_fetch(request))
    }

    fn activate(&mut self, resource: Resource) -> Effect {
        match resource {
            Resource::Domain(domain) => self.start_fetch(FetchRequest::DomainRecords {
                domain: domain.domain_name,
            }),
            Resource::Bucket(bucket) => {
                self.pending_cursor = Some(CursorStack::new(self.page_size));
                self.bucket = Some(bucket.clone());
                self.start_fetch(FetchRequest::Objects {
                    bucket,
                    marker: String::new(),
                    max_keys: self.page_size,
                })
            }
            resource => {
                let Some(detail) = self.front().drill_in() else {
                    return Effect::None;
                };
                self.show_detail(detail, resource)
            }
        }
    }

    fn paginate(&mut self, action: PageAction) -> Effect {
        let Some(bucket) = self.bucket.clone() else {
            return Effect::None;
        };
        let mut next = self.cursor.clone();
        if !next.apply(action) {
            debug!(
                ?action,
                page = self.cursor.page(),
                has_next = self.cursor.has_next(),
                has_prev = self.cursor.has_prev(),
                "Pagination not possible"
            );
            return Effect::None;
        }
        let request = FetchRequest::Objects {
            bucket,
            marker: next.marker().to_string(),
            max_keys: next.page_size(),
        };
        self.pending_cursor = Some(next);
        self.start_fetch(request)
    }

    fn start_fetch(&mut self, request: FetchRequest) -> Effect {
        debug!(?request, generation = self.generation, "Starting fetch");
        self.pending = Some(request.clone());
        Effect::Fetch {
            generation: self.generation,
            request,
        }
    }

    /// Apply a finished fetch. Results from an older generation are dropped.
    pub fn complete(
        &mut self,
        generation: u64,
        request: FetchRequest,
        outcome: Result<Fetched, String>,
    ) -> Effect {
        if generation != self.generation {
            debug!(generation, current = self.generation, ?request, "Dropping stale fetch result");
            return Effect::None;
        }
        self.pending = None;

        match outcome {
            Ok(Fetched::List(items)) => {
                let page = target_page(&request);
                if page.is_cached_list() {
                    self.cache.store(page, items.clone());
                }
                self.show_table(&request, items);
                Effect::None
            }
            Ok(Fetched::Objects(listing)) => {
                let mut cursor = self.pending_cursor.take().unwrap_or_else(|| self.cursor.clone());
                cursor.record_page(&listing);
                self.cursor = cursor;
                self.show_table(&request, into_resources(listing.objects));
                Effect::None
            }
            Err(message) => {
                self.pending_cursor = None;
                warn!(?request, %message, "Fetch failed");
                Effect::Error(format!("{} failed: {message}", request.describe().trim_end_matches('.')))
            }
        }
    }

    fn show_table(&mut self, request: &FetchRequest, items: Vec<Resource>) {
        let page = target_page(request);
        let Some(kind) = page.row_kind() else {
            return;
        };
        let table = Table::new(items, kind.headers(), Arc::clone(&self.resolver))
            .with_title(table_title(request))
            .with_empty_message(kind.empty_message());
        self.registry.register(
            page,
            Page::Table(TablePage::new(page, table, Arc::clone(&self.resolver))),
        );
        self.switch_to(page);
    }

    fn show_detail(&mut self, page: PageId, resource: Resource) -> Effect {
        match resource.to_pretty_json() {
            Ok(json) => {
                let detail = DetailPage::new(resource, &json, Arc::clone(&self.resolver));
                self.registry.register(page, Page::Detail(detail));
                self.switch_to(page);
                Effect::None
            }
            Err(err) => Effect::Error(format!("Failed to serialize resource: {err}")),
        }
    }

    fn switch_to(&mut self, page: PageId) {
        if self.registry.switch_to(page) {
            self.refresh_mode_line();
        }
    }

    /// Show the parent page. The main menu has no parent and stays put.
    pub fn go_back(&mut self) {
        let front = self.front();
        let Some(parent) = front.parent() else {
            return;
        };
        if !self.registry.switch_to(parent) {
            warn!(page = %front, parent = %parent, "Back target not registered, returning to main menu");
            self.registry.switch_to(PageId::MainMenu);
        }
        self.refresh_mode_line();
    }

    fn refresh_mode_line(&mut self) {
        let front = self.front();
        self.mode_line.hint = front.help().to_string();
        self.mode_line.page_info = front.is_paginated().then(|| self.cursor.page_info());
    }

    /// Forget everything tied to the previous profile and go home.
    pub fn reset_for_profile(&mut self, profile: impl Into<String>) {
        self.cache.clear();
        self.registry.reset_to_home();
        self.cursor = CursorStack::new(self.page_size);
        self.pending_cursor = None;
        self.bucket = None;
        self.pending = None;
        self.search_input = None;
        self.generation += 1;
        self.mode_line.profile = profile.into();
        self.refresh_mode_line();
        info!(profile = %self.mode_line.profile, generation = self.generation, "Navigation reset");
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(page) = self.registry.front_page_mut() {
            page.render(frame, area, theme);
        }
        if let Some(input) = self.search_input.as_mut() {
            input.render(frame, area, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DbInstance, Domain, EcsInstance, MqInstance, ObjectPage, ObjectSummary};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn nav() -> NavigationContext {
        NavigationContext::new("default", 20, Arc::new(KeyResolver::default()))
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_c() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
    }

    fn press(nav: &mut NavigationContext, event: KeyEvent) -> Effect {
        nav.handle_key(event).unwrap()
    }

    fn ecs(id: &str) -> Resource {
        EcsInstance {
            instance_id: id.into(),
            status: "Running".into(),
            ..EcsInstance::default()
        }
        .into()
    }

    /// Complete whatever fetch the last effect started.
    fn finish(nav: &mut NavigationContext, effect: Effect, outcome: Result<Fetched, String>) {
        let Effect::Fetch { generation, request } = effect else {
            panic!("expected a fetch, got {effect:?}");
        };
        assert_eq!(nav.complete(generation, request, outcome), Effect::None);
    }

    fn open_ecs(nav: &mut NavigationContext) {
        let effect = press(nav, key('1'));
        finish(nav, effect, Ok(Fetched::List(vec![ecs("i-1"), ecs("i-2")])));
        assert_eq!(nav.front(), PageId::EcsList);
    }

    fn listing(total: usize, marker: &str, max_keys: u32) -> ObjectPage {
        let keys: Vec<String> = (1..=total).map(|i| format!("obj-{i:02}")).collect();
        let start = keys.iter().position(|k| k.as_str() > marker).unwrap_or(keys.len());
        let end = (start + max_keys as usize).min(keys.len());
        let is_truncated = end < keys.len();
        ObjectPage {
            objects: keys[start..end]
                .iter()
                .map(|key| ObjectSummary {
                    key: key.clone(),
                    ..ObjectSummary::default()
                })
                .collect(),
            is_truncated,
            next_marker: if is_truncated { keys[end - 1].clone() } else { String::new() },
        }
    }

    fn serve_objects(nav: &mut NavigationContext, effect: Effect, total: usize) {
        let Effect::Fetch { generation, request } = effect else {
            panic!("expected a fetch, got {effect:?}");
        };
        let FetchRequest::Objects { marker, max_keys, .. } = &request else {
            panic!("expected an object listing, got {request:?}");
        };
        let page = listing(total, marker, *max_keys);
        nav.complete(generation, request, Ok(Fetched::Objects(page)));
    }

    fn visible_keys(nav: &NavigationContext) -> Vec<String> {
        match nav.registry.front_page() {
            Some(Page::Table(page)) => page
                .table()
                .items()
                .iter()
                .map(|r| r.identity().to_string())
                .collect(),
            _ => panic!("front page is not a table"),
        }
    }

    fn open_bucket(nav: &mut NavigationContext, total: usize) {
        let bucket = Bucket {
            name: "photos".into(),
            location: "oss-cn-hangzhou".into(),
            ..Bucket::default()
        };
        let effect = press(nav, key('4'));
        finish(nav, effect, Ok(Fetched::List(vec![bucket.into()])));
        let effect = press(nav, code(KeyCode::Enter));
        serve_objects(nav, effect, total);
        assert_eq!(nav.front(), PageId::OssObjects);
    }

    #[test]
    fn test_back_on_root_is_noop() {
        let mut nav = nav();
        for event in [key('q'), code(KeyCode::Esc)] {
            assert_eq!(press(&mut nav, event), Effect::None);
            assert_eq!(nav.front(), PageId::MainMenu);
        }
    }

    /// Register an empty table or a detail page for `page` and bring it up.
    fn show_page(nav: &mut NavigationContext, page: PageId) {
        if page.is_detail() {
            assert_eq!(nav.show_detail(page, ecs("i-1")), Effect::None);
        } else if let Some(kind) = page.row_kind() {
            let table = Table::new(Vec::new(), kind.headers(), Arc::clone(&nav.resolver));
            let resolver = Arc::clone(&nav.resolver);
            nav.registry
                .register(page, Page::Table(TablePage::new(page, table, resolver)));
            nav.switch_to(page);
        }
        assert_eq!(nav.front(), page);
    }

    #[test]
    fn test_quit_from_every_registered_page() {
        for page in PageId::ALL {
            let mut nav = nav();
            show_page(&mut nav, page);
            assert_eq!(press(&mut nav, key('Q')), Effect::Quit, "{page}");

            if nav.registry.front_page().is_some_and(Page::is_searchable) {
                press(&mut nav, key('/'));
                assert!(nav.search_input.is_some(), "{page}");
                assert_eq!(press(&mut nav, ctrl_c()), Effect::Quit, "{page}");
            }
        }
    }

    #[test]
    fn test_quit_from_every_state() {
        let mut nav = nav();
        open_ecs(&mut nav);
        press(&mut nav, code(KeyCode::Enter));
        assert_eq!(nav.front(), PageId::EcsDetail);

        press(&mut nav, key('/'));
        assert!(nav.search_input.is_some());
        assert_eq!(press(&mut nav, key('Q')), Effect::None);
        assert_eq!(press(&mut nav, ctrl_c()), Effect::Quit);

        let mut nav = self::nav();
        open_bucket(&mut nav, 45);
        assert!(matches!(press(&mut nav, key(']')), Effect::Fetch { .. }));
        assert_eq!(press(&mut nav, key('Q')), Effect::Quit);
    }

    #[test]
    fn test_pending_fetch_swallows_keys() {
        let mut nav = nav();
        assert!(matches!(press(&mut nav, key('1')), Effect::Fetch { .. }));
        assert!(nav.pending().is_some());
        assert_eq!(press(&mut nav, key('2')), Effect::None);
        assert_eq!(press(&mut nav, key('O')), Effect::None);
        assert_eq!(nav.front(), PageId::MainMenu);
    }

    #[test]
    fn test_back_walks_parent_chain() {
        let mut nav = nav();
        open_ecs(&mut nav);
        press(&mut nav, code(KeyCode::Enter));
        assert_eq!(nav.front(), PageId::EcsDetail);
        assert!(nav.mode_line().hint.contains("yy"));
        press(&mut nav, key('q'));
        assert_eq!(nav.front(), PageId::EcsList);
        press(&mut nav, code(KeyCode::Esc));
        assert_eq!(nav.front(), PageId::MainMenu);
    }

    #[test]
    fn test_unregistered_parent_falls_back_home() {
        let mut nav = nav();
        let request = FetchRequest::Databases {
            instance_id: "rm-1".into(),
        };
        nav.complete(0, request, Ok(Fetched::List(Vec::new())));
        assert_eq!(nav.front(), PageId::RdsDatabases);
        press(&mut nav, key('q'));
        assert_eq!(nav.front(), PageId::MainMenu);
    }

    #[test]
    fn test_cached_list_skips_fetch_and_keeps_selection() {
        let mut nav = nav();
        open_ecs(&mut nav);
        press(&mut nav, key('j'));
        press(&mut nav, key('q'));
        assert_eq!(press(&mut nav, key('1')), Effect::None);
        assert_eq!(nav.front(), PageId::EcsList);
        let Some(Page::Table(page)) = nav.registry.front_page() else {
            panic!("expected table");
        };
        assert_eq!(page.table().selected_index(), Some(1));
    }

    #[test]
    fn test_profile_switch_clears_caches() {
        let mut nav = nav();
        open_ecs(&mut nav);
        press(&mut nav, key('q'));
        open_bucket(&mut nav, 45);
        assert!(!nav.cache.lists.is_empty());

        nav.reset_for_profile("prod");
        assert!(nav.cache.lists.is_empty());
        assert_eq!(nav.front(), PageId::MainMenu);
        assert_eq!(nav.cursor.page(), 1);
        assert_eq!(nav.mode_line().profile, "prod");
        assert!(matches!(press(&mut nav, key('1')), Effect::Fetch { .. }));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut nav = nav();
        let Effect::Fetch { generation, request } = press(&mut nav, key('1')) else {
            panic!("expected fetch");
        };
        nav.reset_for_profile("prod");
        nav.complete(generation, request, Ok(Fetched::List(vec![ecs("i-old")])));
        assert_eq!(nav.front(), PageId::MainMenu);
        assert!(nav.cache.lists.is_empty());
    }

    #[test]
    fn test_fetch_error_surfaces() {
        let mut nav = nav();
        let Effect::Fetch { generation, request } = press(&mut nav, key('2')) else {
            panic!("expected fetch");
        };
        let effect = nav.complete(generation, request, Err("Forbidden.RAM".into()));
        assert!(matches!(effect, Effect::Error(msg) if msg.contains("Forbidden.RAM")));
        assert!(nav.pending().is_none());
        assert_eq!(nav.front(), PageId::MainMenu);
    }

    #[test]
    fn test_domain_opens_records() {
        let mut nav = nav();
        let domain = Domain {
            domain_name: "example.com".into(),
            ..Domain::default()
        };
        let effect = press(&mut nav, key('2'));
        finish(&mut nav, effect, Ok(Fetched::List(vec![domain.into()])));
        let effect = press(&mut nav, code(KeyCode::Enter));
        assert!(matches!(
            &effect,
            Effect::Fetch { request: FetchRequest::DomainRecords { domain }, .. } if domain == "example.com"
        ));
        finish(&mut nav, effect, Ok(Fetched::List(Vec::new())));
        assert_eq!(nav.front(), PageId::DnsRecords);
        press(&mut nav, key('q'));
        assert_eq!(nav.front(), PageId::DnsDomains);
    }

    #[test]
    fn test_sub_resource_keys_are_per_page() {
        let mut nav = nav();
        let rds = DbInstance {
            db_instance_id: "rm-1".into(),
            ..DbInstance::default()
        };
        let effect = press(&mut nav, key('5'));
        finish(&mut nav, effect, Ok(Fetched::List(vec![rds.into()])));
        assert_eq!(press(&mut nav, key('T')), Effect::None);
        assert!(matches!(
            press(&mut nav, key('A')),
            Effect::Fetch { request: FetchRequest::DbAccounts { .. }, .. }
        ));
    }

    #[test]
    fn test_groups_key_wins_over_end_on_rocketmq() {
        let mut nav = nav();
        let mq = MqInstance {
            instance_id: "MQ_INST_1".into(),
            ..MqInstance::default()
        };
        let effect = press(&mut nav, key('7'));
        finish(&mut nav, effect, Ok(Fetched::List(vec![mq.into()])));
        let effect = press(&mut nav, key('G'));
        assert!(matches!(
            &effect,
            Effect::Fetch { request: FetchRequest::MqGroups { instance_id }, .. } if instance_id == "MQ_INST_1"
        ));
        finish(&mut nav, effect, Ok(Fetched::List(Vec::new())));
        assert_eq!(nav.front(), PageId::RocketMqGroups);
    }

    #[test]
    fn test_forty_five_objects_through_controller() {
        let mut nav = nav();
        open_bucket(&mut nav, 45);
        assert_eq!(visible_keys(&nav).len(), 20);
        assert_eq!(visible_keys(&nav)[0], "obj-01");
        assert_eq!(nav.mode_line().page_info.as_deref(), Some("Page 1+"));
        assert_eq!(press(&mut nav, key('[')), Effect::None);

        let effect = press(&mut nav, key(']'));
        serve_objects(&mut nav, effect, 45);
        let effect = press(&mut nav, key(']'));
        serve_objects(&mut nav, effect, 45);
        assert_eq!(visible_keys(&nav), (41..=45).map(|i| format!("obj-{i:02}")).collect::<Vec<_>>());
        assert_eq!(nav.mode_line().page_info.as_deref(), Some("Page 3"));
        assert_eq!(press(&mut nav, key(']')), Effect::None);

        let effect = press(&mut nav, key('['));
        serve_objects(&mut nav, effect, 45);
        assert_eq!(visible_keys(&nav)[0], "obj-21");
        assert_eq!(visible_keys(&nav).len(), 20);
        assert_eq!(nav.mode_line().page_info.as_deref(), Some("Page 2+"));
    }

    #[test]
    fn test_failed_page_fetch_keeps_cursor() {
        let mut nav = nav();
        open_bucket(&mut nav, 45);
        let Effect::Fetch { generation, request } = press(&mut nav, key(']')) else {
            panic!("expected fetch");
        };
        assert!(matches!(nav.complete(generation, request, Err("timeout".into())), Effect::Error(_)));
        assert_eq!(nav.cursor.page(), 1);
        assert_eq!(visible_keys(&nav)[0], "obj-01");
        assert_eq!(nav.mode_line().page_info.as_deref(), Some("Page 1+"));
    }

    #[test]
    fn test_reopening_bucket_starts_on_first_page() {
        let mut nav = nav();
        open_bucket(&mut nav, 45);
        let effect = press(&mut nav, key(']'));
        serve_objects(&mut nav, effect, 45);
        assert_eq!(nav.cursor.page(), 2);

        press(&mut nav, key('q'));
        let effect = press(&mut nav, code(KeyCode::Enter));
        serve_objects(&mut nav, effect, 45);
        assert_eq!(nav.cursor.page(), 1);
        assert_eq!(visible_keys(&nav)[0], "obj-01");
    }

    #[test]
    fn test_copy_messages_depend_on_view() {
        let mut nav = nav();
        open_ecs(&mut nav);
        press(&mut nav, key('y'));
        match press(&mut nav, key('y')) {
            Effect::Copy { text, message } => {
                assert_eq!(message, ROW_COPIED);
                assert!(text.contains("\"InstanceId\": \"i-1\""));
            }
            other => panic!("expected copy, got {other:?}"),
        }

        press(&mut nav, code(KeyCode::Enter));
        press(&mut nav, key('y'));
        assert!(matches!(
            press(&mut nav, key('y')),
            Effect::Copy { message: DETAIL_COPIED, .. }
        ));
        assert!(matches!(press(&mut nav, key('e')), Effect::Edit { .. }));
    }

    #[test]
    fn test_search_session() {
        let mut nav = nav();
        open_ecs(&mut nav);
        press(&mut nav, key('/'));
        for c in "i-2Q".chars() {
            assert_eq!(press(&mut nav, key(c)), Effect::None);
        }
        press(&mut nav, code(KeyCode::Backspace));
        press(&mut nav, code(KeyCode::Enter));
        assert!(!nav.search_input.is_some());

        let Some(Page::Table(page)) = nav.registry.front_page() else {
            panic!("expected table");
        };
        assert_eq!(page.table().search().len(), 1);
        assert_eq!(page.table().selected_index(), Some(1));

        press(&mut nav, key('/'));
        press(&mut nav, code(KeyCode::Enter));
        let Some(Page::Table(page)) = nav.registry.front_page() else {
            panic!("expected table");
        };
        assert!(!page.table().search().is_active());
    }

    #[test]
    fn test_search_is_not_offered_on_menu() {
        let mut nav = nav();
        press(&mut nav, key('/'));
        assert!(!nav.search_input.is_some());
    }

    #[test]
    fn test_global_overlays() {
        let mut nav = nav();
        assert_eq!(press(&mut nav, key('O')), Effect::OpenProfiles);
        assert_eq!(press(&mut nav, key('?')), Effect::ShowHelp);
    }
}
