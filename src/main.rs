use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::{KeyResolver, ProfileStore};
use crate::service::Services;

mod aliyun;
mod app;
mod cli;
mod commands;
mod config;
mod model;
mod nav;
mod search;
mod service;
mod theme;
mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting tali");

    let args = cli::Args::parse();

    let mut config = config::load()?;
    if let Some(page_size) = args.page_size {
        config.oss.page_size = page_size;
    }
    if let Some(theme) = args.theme {
        config.theme.name = theme;
    }
    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));
    let theme = theme::theme_from_name(&config.theme.name);

    let mut profiles = ProfileStore::open(ProfileStore::default_path()?)?;
    if let Some(name) = args.profile.as_deref() {
        profiles.select(name)?;
    }
    let profile = profiles.active()?;
    let services = Services::new(&profile)?;
    info!(profile = %profile.name, region = %profile.region_id, page_size = config.oss.page_size, "Profile loaded");

    let mut app = App::new(&config, resolver, theme, profiles, services, &profile.name);
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("tali").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "tali.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
