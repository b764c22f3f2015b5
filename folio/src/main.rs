//! Folio: a personal portfolio in the terminal.

mod app;
mod config;
mod content;
mod document;
mod filters;
mod form;
mod logging;
mod menu;
mod pages;
mod theme;
mod video;

use crate::app::{Shell, ShellOptions};
use crate::config::ConfigLoader;
use crate::content::Portfolio;
use crate::theme::{system_prefers_dark, ThemePreference};
use anyhow::Result;
use clap::Parser;
use folio_nexus::{Application, JsonFileStore, KeyValueStore, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "A personal portfolio for the terminal")]
#[command(version)]
struct Cli {
    /// Config file to use instead of searching for one
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Portfolio content (JSON) to show instead of the built-in one
    #[arg(long)]
    content: Option<PathBuf>,

    /// Route to open, e.g. /projects
    #[arg(short, long)]
    path: Option<String>,

    /// File the theme preference is saved in
    #[arg(long)]
    theme_store: Option<PathBuf>,

    /// Log file (default: per-process file in the user state directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn open_store(path: Option<PathBuf>) -> Box<dyn KeyValueStore> {
    let Some(path) = path else {
        tracing::warn!("no data directory, theme preference will not be saved");
        return Box::new(MemoryStore::new());
    };
    match JsonFileStore::open(path.clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "preferences unreadable, not saving theme");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.with_config_override(path);
    }
    if let Some(content) = cli.content {
        loader = loader.with_content_override(content);
    }
    if let Some(path) = cli.path {
        loader = loader.with_path_override(path);
    }
    if let Some(store) = cli.theme_store {
        loader = loader.with_theme_store_override(store);
    }
    if let Some(log_file) = cli.log_file {
        loader = loader.with_log_file_override(log_file);
    }
    if cli.verbose {
        loader = loader.with_log_level_override("debug".to_string());
    }
    let (config, source) = loader.load()?;

    let log_path = config.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, &config.log_level)?;
    tracing::info!(config = ?source, log = %log_path.display(), "folio starting");

    let portfolio = match &config.content {
        Some(path) => Portfolio::load(path)?,
        None => Portfolio::embedded()?,
    };
    let theme = ThemePreference::load(open_store(config.theme_store_path()), system_prefers_dark());

    let options = ShellOptions {
        start_path: config.start_path.clone(),
        compact_width: config.compact_width,
        tick: config.tick(),
    };
    let portfolio = Arc::new(portfolio);

    Application::new().run(move |cx| {
        cx.set_root(Shell::new(portfolio, theme, options))?;
        Ok(())
    })
}
