use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Clear};
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

use crate::Theme;
use crate::commands::{Command, CommandEnv, CopyToClipboardCmd, EditorCommand, FetchCmd, open_in_editor};
use crate::config::{
    AppConfig, GlobalAction, KeyResolver, NavAction, PageAction, ProfileStore, ResourceAction,
    SearchAction,
};
use crate::nav::{Effect, NavigationContext};
use crate::service::{FetchRequest, Fetched, Services};
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, ErrorDialog, ErrorDialogEvent, EventResult, HelpEvent, HelpView, Keybinding,
    KeybindingSection, ProfileEvent, ProfileSelector, Spinner, StatusBar, Toast, ToastManager,
    ToastType,
};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 8.0;
const STATUS_BAR_HEIGHT: u16 = 3;

/// Messages posted to the event loop by background commands.
#[derive(Debug)]
pub enum AppMessage {
    ShowToast {
        message: String,
        toast_type: ToastType,
    },
    Fetched {
        generation: u64,
        request: FetchRequest,
        outcome: Result<Fetched, String>,
    },
    DisplayError(String),
}

/// Modal popups drawn over the page. At most one is open.
enum Overlay {
    Error(ErrorDialog),
    Help(HelpView),
    Profiles(ProfileSelector),
}

pub struct App {
    nav: NavigationContext,
    profiles: ProfileStore,
    services: Arc<Services>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    overlay: Option<Overlay>,
    toasts: ToastManager,
    spinner: Spinner,
    env: CommandEnv,
    app_rx: UnboundedReceiver<AppMessage>,
    /// Resource JSON waiting to be opened in the editor.
    pending_edit: Option<String>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(
        config: &AppConfig,
        resolver: Arc<KeyResolver>,
        theme: Theme,
        profiles: ProfileStore,
        services: Services,
        profile_name: &str,
    ) -> Self {
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        Self {
            nav: NavigationContext::new(profile_name, config.oss.page_size, Arc::clone(&resolver)),
            profiles,
            services: Arc::new(services),
            resolver,
            theme,
            overlay: None,
            toasts: ToastManager::default(),
            spinner: Spinner::default(),
            env: CommandEnv::new(app_tx),
            app_rx,
            pending_edit: None,
            should_quit: false,
            should_suspend: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        while let Some(event) = tui.next_event().await {
            self.handle_event(&mut tui, event)?;
            self.drain_messages();

            if let Some(text) = self.pending_edit.take() {
                self.edit(&mut tui, &text);
            }
            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.resume()?;
            }
            if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        info!("Event loop finished");
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> color_eyre::Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Suspend => self.should_suspend = true,
            Event::Tick => {
                self.spinner.handle_tick();
                self.toasts.handle_tick();
            }
            Event::Render => {
                tui.draw(|frame| self.render(frame))?;
            }
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                tui.draw(|frame| self.render(frame))?;
            }
            Event::Error(message) => warn!(%message, "Terminal event error"),
            Event::Key(key) => self.handle_key(key)?,
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        if KeyResolver::is_interrupt(&key) {
            self.should_quit = true;
            return Ok(());
        }

        if let Some(overlay) = self.overlay.as_mut() {
            match overlay {
                Overlay::Error(dialog) => {
                    if let EventResult::Event(ErrorDialogEvent::Dismissed) = dialog.handle_key(key)? {
                        self.overlay = None;
                    }
                }
                Overlay::Help(help) => {
                    if let EventResult::Event(HelpEvent::Close) = help.handle_key(key)? {
                        self.overlay = None;
                    }
                }
                Overlay::Profiles(selector) => match selector.handle_key(key)? {
                    EventResult::Event(ProfileEvent::Selected(name)) => {
                        self.overlay = None;
                        self.switch_profile(&name);
                    }
                    EventResult::Event(ProfileEvent::Cancelled) => self.overlay = None,
                    EventResult::Consumed | EventResult::Ignored => {}
                },
            }
            return Ok(());
        }

        let effect = self.nav.handle_key(key)?;
        self.apply_effect(effect);
        Ok(())
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Quit => self.should_quit = true,
            Effect::Fetch {
                generation,
                request,
            } => {
                self.spinner.set_label(request.describe());
                self.spawn(Box::new(FetchCmd::new(
                    Arc::clone(&self.services),
                    generation,
                    request,
                    self.env.sender(),
                )));
            }
            Effect::Copy { text, message } => {
                self.spawn(Box::new(CopyToClipboardCmd::new(self.env.clone(), text, message)));
            }
            Effect::Edit { text } => self.pending_edit = Some(text),
            Effect::OpenProfiles => {
                let current = self.nav.mode_line().profile.clone();
                self.overlay = Some(Overlay::Profiles(ProfileSelector::new(
                    self.profiles.profile_names(),
                    &current,
                    Arc::clone(&self.resolver),
                )));
            }
            Effect::ShowHelp => {
                self.overlay = Some(Overlay::Help(HelpView::new(
                    help_sections(&self.resolver),
                    Arc::clone(&self.resolver),
                )));
            }
            Effect::Error(message) => self.show_error(message),
        }
    }

    fn spawn(&self, command: Box<dyn Command>) {
        let name = command.name();
        let app_tx = self.env.sender();
        debug!(command = %name, "Spawning command");
        tokio::spawn(async move {
            if let Err(err) = command.execute().await {
                error!(command = %name, error = %err, "Command failed");
                let _ = app_tx.send(AppMessage::DisplayError(format!("{name} failed: {err}")));
            }
        });
    }

    fn drain_messages(&mut self) {
        while let Ok(message) = self.app_rx.try_recv() {
            match message {
                AppMessage::ShowToast {
                    message,
                    toast_type,
                } => self.toasts.show(Toast::new(message, toast_type)),
                AppMessage::Fetched {
                    generation,
                    request,
                    outcome,
                } => {
                    let effect = self.nav.complete(generation, request, outcome);
                    self.apply_effect(effect);
                }
                AppMessage::DisplayError(message) => self.show_error(message),
            }
        }
    }

    fn edit(&mut self, tui: &mut Tui, text: &str) {
        let result = EditorCommand::parse(&self.profiles.editor())
            .and_then(|editor| open_in_editor(tui, &editor, text));
        if let Err(err) = result {
            error!(error = %err, "Editor handoff failed");
            self.show_error(format!("Failed to open editor: {err}"));
        }
    }

    fn switch_profile(&mut self, name: &str) {
        if self.nav.mode_line().profile == name {
            self.toasts
                .show(Toast::info(format!("Already using profile: {name}")));
            return;
        }

        match self.profiles.switch_profile(name, |profile| {
            Services::new(profile).map_err(color_eyre::Report::from)
        }) {
            Ok(services) => {
                self.services = Arc::new(services);
                self.nav.reset_for_profile(name);
                self.toasts.show(Toast::success(format!(
                    "Successfully switched to profile: {name}"
                )));
            }
            Err(err) => self.show_error(format!("Failed to switch profile: {err}")),
        }
    }

    fn show_error(&mut self, message: impl Into<String>) {
        self.overlay = Some(Overlay::Error(ErrorDialog::new(
            message,
            Arc::clone(&self.resolver),
        )));
    }

    fn render(&mut self, frame: &mut Frame) {
        let theme = self.theme;
        let [content, status] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(frame.area());

        self.nav.render(frame, content, &theme);
        if self.nav.pending().is_some() {
            let area = content.centered(Constraint::Percentage(50), Constraint::Length(3));
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border()));
            let inner = block.inner(area);
            frame.render_widget(Clear, area);
            frame.render_widget(block, area);
            self.spinner.render(frame, inner, &theme);
        }
        StatusBar::render(frame, status, &theme, self.nav.mode_line());

        match self.overlay.as_mut() {
            Some(Overlay::Error(dialog)) => dialog.render(frame, content, &theme),
            Some(Overlay::Help(help)) => help.render(frame, content, &theme),
            Some(Overlay::Profiles(selector)) => selector.render(frame, content, &theme),
            None => {}
        }
        self.toasts.render(frame, content, &theme);
    }
}

/// Help overlay contents, built from the live bindings.
fn help_sections(resolver: &KeyResolver) -> Vec<KeybindingSection> {
    let global = |action, description: &'static str| Keybinding::new(resolver.display_global(action), description);
    let nav = |action, description: &'static str| Keybinding::new(resolver.display_nav(action), description);
    let search = |action, description: &'static str| Keybinding::new(resolver.display_search(action), description);
    let resource = |action, description: &'static str| Keybinding::new(resolver.display_resource(action), description);
    let page = |action, description: &'static str| Keybinding::new(resolver.display_page(action), description);

    vec![
        KeybindingSection::new(
            "Global",
            vec![
                global(GlobalAction::Quit, "Quit"),
                Keybinding::new("Ctrl+C", "Quit from anywhere"),
                global(GlobalAction::Back, "Back"),
                global(GlobalAction::Profiles, "Switch profile"),
                global(GlobalAction::Help, "Toggle help"),
            ],
        ),
        KeybindingSection::new(
            "Navigation",
            vec![
                nav(NavAction::Up, "Move up"),
                nav(NavAction::Down, "Move down"),
                nav(NavAction::PageUp, "Page up"),
                nav(NavAction::PageDown, "Page down"),
                nav(NavAction::Home, "Go to top"),
                nav(NavAction::End, "Go to bottom"),
                nav(NavAction::Select, "Open"),
            ],
        ),
        KeybindingSection::new(
            "Search",
            vec![
                search(SearchAction::Start, "Search"),
                search(SearchAction::Next, "Next match"),
                search(SearchAction::Prev, "Previous match"),
            ],
        ),
        KeybindingSection::new(
            "Resources",
            vec![
                resource(ResourceAction::Copy, "Copy JSON (press twice)"),
                resource(ResourceAction::Edit, "Open JSON in editor"),
                resource(ResourceAction::Databases, "RDS databases"),
                resource(ResourceAction::Accounts, "RDS / Redis accounts"),
                resource(ResourceAction::Listeners, "SLB listeners"),
                resource(ResourceAction::Topics, "RocketMQ topics"),
                resource(ResourceAction::Groups, "RocketMQ groups"),
            ],
        ),
        KeybindingSection::new(
            "OSS Objects",
            vec![
                page(PageAction::Next, "Next page"),
                page(PageAction::Prev, "Previous page"),
                page(PageAction::First, "First page"),
            ],
        ),
    ]
}
