use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::rc::Rc;
use std::time::Duration;
use syncpanel::logger::Logger;
use syncpanel::panel::{IndicatorFactory, PanelLayout, ProgressRegistry, SyncPanel, TickScheduler};
use syncpanel::ui::components::{LogsDialog, PanelComponent};
use syncpanel::ui::core::{Action, Component};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn panel_component() -> PanelComponent {
    let scheduler = Rc::new(TickScheduler::new());
    let factory = IndicatorFactory::new(scheduler, Duration::from_millis(100));
    PanelComponent::new(SyncPanel::new(PanelLayout::complete(ProgressRegistry::new(factory))))
}

#[test]
fn test_panel_key_mapping() {
    let mut panel = panel_component();

    assert_eq!(panel.handle_key_events(key(KeyCode::Char('p'))), Action::SyncProject);
    assert_eq!(panel.handle_key_events(key(KeyCode::Char('c'))), Action::SyncContainers);
    assert_eq!(panel.handle_key_events(key(KeyCode::Char('v'))), Action::TogglePanel);
    assert_eq!(panel.handle_key_events(key(KeyCode::Down)), Action::SelectNextLocale);
    assert_eq!(panel.handle_key_events(key(KeyCode::Up)), Action::SelectPreviousLocale);
    assert_eq!(panel.handle_key_events(key(KeyCode::Enter)), Action::CycleLocale);
    assert_eq!(panel.handle_key_events(key(KeyCode::Backspace)), Action::ClearLocale);
    assert_eq!(panel.handle_key_events(key(KeyCode::Char('G'))), Action::ShowLogs(true));
    assert_eq!(panel.handle_key_events(key(KeyCode::Char('q'))), Action::Quit);
    assert_eq!(
        panel.handle_key_events(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Action::Quit
    );
}

#[test]
fn test_hidden_panel_ignores_sync_keys() {
    let mut panel = panel_component();
    panel.set_visible(false);

    assert_eq!(panel.handle_key_events(key(KeyCode::Char('p'))), Action::None);
    assert_eq!(panel.handle_key_events(key(KeyCode::Enter)), Action::None);
    assert_eq!(panel.handle_key_events(key(KeyCode::Char('v'))), Action::TogglePanel);
}

#[test]
fn test_selection_without_locales() {
    let mut panel = panel_component();
    panel.select_next_locale();
    assert_eq!(panel.selected_locale(), None);
    assert!(panel.selected_field().is_none());
}

#[test]
fn test_logs_dialog_visibility_and_scroll() {
    let logger = Logger::new();
    for i in 0..3 {
        logger.log(format!("entry {i}"));
    }
    let mut dialog = LogsDialog::new(logger);
    assert!(!dialog.is_visible());

    assert_eq!(dialog.update(Action::ShowLogs(true)), Action::None);
    assert!(dialog.is_visible());

    for _ in 0..5 {
        let action = dialog.handle_key_events(key(KeyCode::Down));
        dialog.update(action);
    }
    assert_eq!(dialog.scroll_offset(), 2);

    let action = dialog.handle_key_events(key(KeyCode::Up));
    dialog.update(action);
    assert_eq!(dialog.scroll_offset(), 1);

    assert_eq!(dialog.handle_key_events(key(KeyCode::Esc)), Action::ShowLogs(false));
    dialog.update(Action::ShowLogs(false));
    assert!(!dialog.is_visible());
    assert_eq!(dialog.scroll_offset(), 0);
}

#[test]
fn test_logs_dialog_ctrl_c_quits() {
    let mut dialog = LogsDialog::new(Logger::new());
    dialog.update(Action::ShowLogs(true));

    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(dialog.handle_key_events(ctrl_c), Action::Quit);
    assert_eq!(dialog.handle_key_events(key(KeyCode::Char('c'))), Action::None);
}

#[test]
fn test_update_passes_unhandled_actions_through() {
    let mut panel = panel_component();
    assert_eq!(panel.update(Action::SyncProject), Action::SyncProject);
    assert_eq!(panel.update(Action::SelectNextLocale), Action::None);
}
