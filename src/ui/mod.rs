//! UI module for syncpanel
//!
//! This module handles terminal setup, the event loop, rendering and key
//! handling. Panel behaviour itself lives in [`crate::panel`].

pub mod app;
pub mod components;
pub mod core;

pub use app::App;

use crate::config::Config;
use crate::logger::Logger;
use crate::model::{LocalProject, ProjectAsset, Simulation};
use anyhow::{Context, Result};
use crossterm::{
    event::KeyEventKind,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tokio::time::Duration;

use self::core::{EventHandler, EventType};

/// Load the project, set up the terminal and run until the user quits.
pub async fn run_app(config: &Config, logger: Logger) -> Result<()> {
    let asset = match &config.simulation.asset_path {
        Some(path) if path.exists() => ProjectAsset::load(path).context("Failed to load project asset")?,
        Some(path) => {
            info!("No project asset at {}, starting from the sample", path.display());
            ProjectAsset::sample()
        }
        None => ProjectAsset::sample(),
    };
    let project = LocalProject::new(asset, Simulation::from_config(config));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(project, config, logger);
    let mut events = EventHandler::new(Duration::from_millis(config.ui.tick_rate_ms));
    let res = run_ui(&mut terminal, &mut app, &mut events).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_ui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, events: &mut EventHandler) -> Result<()> {
    terminal.draw(|f| app.render(f))?;

    loop {
        match events.next_event().await? {
            EventType::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            EventType::Tick => app.on_tick(),
            EventType::Resize(_, _) => {}
            _ => continue,
        }

        if app.should_quit() {
            return Ok(());
        }
        terminal.draw(|f| app.render(f))?;
    }
}
