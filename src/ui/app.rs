//! Application state: the project model, the panel and the logs dialog, wired
//! to one scheduler that the UI tick drives.

use crate::config::Config;
use crate::logger::Logger;
use crate::model::{LocalProject, LocaleRef};
use crate::panel::{IndicatorFactory, PanelLayout, ProgressRegistry, SyncPanel, TickScheduler};
use crate::ui::components::{LogsDialog, PanelComponent};
use crate::ui::core::{Action, Component};
use crossterm::event::KeyEvent;
use log::{info, warn};
use ratatui::Frame;
use std::rc::Rc;
use tokio::time::{Duration, Instant};

pub struct App {
    project: LocalProject,
    panel: PanelComponent,
    logs: LogsDialog,
    scheduler: Rc<TickScheduler>,
    last_tick: Instant,
    should_quit: bool,
}

impl App {
    /// Build the panel over `project`, attach it and populate its view.
    pub fn new(mut project: LocalProject, config: &Config, logger: Logger) -> Self {
        let scheduler = Rc::new(TickScheduler::new());
        let factory = IndicatorFactory::new(scheduler.clone(), Duration::from_millis(config.ui.poll_interval_ms));
        let mut panel = SyncPanel::new(PanelLayout::complete(ProgressRegistry::new(factory)));

        panel.on_enable(&mut project);
        panel.create_view(&project);

        Self {
            project,
            panel: PanelComponent::new(panel),
            logs: LogsDialog::new(logger),
            scheduler,
            last_tick: Instant::now(),
            should_quit: false,
        }
    }

    pub fn project(&self) -> &LocalProject {
        &self.project
    }

    pub fn panel(&self) -> &PanelComponent {
        &self.panel
    }

    pub fn logs(&self) -> &LogsDialog {
        &self.logs
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route a key to the dialog when it is open, to the panel otherwise.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = if self.logs.is_visible() {
            self.logs.handle_key_events(key)
        } else {
            self.panel.handle_key_events(key)
        };
        self.handle_action(action);
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::SyncProject => {
                // Refusals are logged by the panel and reflected in its buttons
                let _ = self.panel.panel_mut().press_sync_project(&mut self.project);
            }
            Action::SyncContainers => {
                let _ = self.panel.panel_mut().press_sync_containers(&mut self.project);
            }
            Action::TogglePanel => self.toggle_panel(),
            Action::CycleLocale => self.cycle_selected_locale(),
            Action::ClearLocale => self.set_selected_locale(None),
            Action::ShowLogs(_) | Action::LogsScrollUp | Action::LogsScrollDown => {
                self.logs.update(action);
            }
            Action::SelectNextLocale | Action::SelectPreviousLocale => {
                self.panel.update(action);
            }
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
    }

    /// Advance everything by the time elapsed since the previous tick.
    ///
    /// Order matters: finished operations are applied to the model first, the
    /// notifications they raise are dispatched next, and polling runs last so
    /// indicators read the settled handles.
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.tick(elapsed);
    }

    /// [`on_tick`](Self::on_tick) with an explicit elapsed time.
    pub fn tick(&mut self, elapsed: Duration) {
        self.project.process_background_events();
        self.panel.panel_mut().process_notifications(&self.project);
        self.scheduler.advance(elapsed);
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.panel.render(f, area);
        self.logs.render(f, area);
    }

    /// Detach from the model before the app goes away.
    pub fn shutdown(&mut self) {
        self.panel.panel_mut().on_disable(&mut self.project);
    }

    fn toggle_panel(&mut self) {
        if self.panel.is_visible() {
            self.panel.panel_mut().on_disable(&mut self.project);
            self.panel.set_visible(false);
            info!("Panel hidden");
        } else {
            let panel = self.panel.panel_mut();
            panel.on_enable(&mut self.project);
            // Anything that changed while hidden was not listened to
            panel.create_view(&self.project);
            self.panel.set_visible(true);
            info!("Panel shown");
        }
    }

    fn cycle_selected_locale(&mut self) {
        let Some(field) = self.panel.selected_field() else {
            return;
        };
        let next = next_locale(self.project.available_locales(), field.value.as_ref());
        self.set_selected_locale(next);
    }

    fn set_selected_locale(&mut self, value: Option<LocaleRef>) {
        let Some(row) = self.panel.selected_locale() else {
            return;
        };
        if let Err(e) = self.panel.panel_mut().edit_locale(&mut self.project, row, value) {
            warn!("Locale edit rejected: {}", e);
        }
    }
}

/// The locale after `current` in `available`, wrapping through `None`.
pub fn next_locale(available: &[LocaleRef], current: Option<&LocaleRef>) -> Option<LocaleRef> {
    let next_index = match current {
        None => 0,
        Some(current) => match available.iter().position(|l| l.code == current.code) {
            Some(i) => i + 1,
            None => 0,
        },
    };
    available.get(next_index).cloned()
}
