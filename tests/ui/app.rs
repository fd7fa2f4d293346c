use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::Duration;
use syncpanel::config::Config;
use syncpanel::logger::Logger;
use syncpanel::model::{LocalProject, LocaleRef, ProjectAsset, ProjectModel, Simulation};
use syncpanel::ui::app::next_locale;
use syncpanel::ui::App;

const TICK: Duration = Duration::from_millis(100);

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn fast_app() -> App {
    let simulation = Simulation {
        step: Duration::from_millis(1),
        progress_step: 0.5,
        failure_rate: 0.0,
        default_tag: "fast".to_string(),
        timestamp_format: "%Y-%m-%d".to_string(),
        asset_path: None,
    };
    App::new(
        LocalProject::new(ProjectAsset::sample(), simulation),
        &Config::default(),
        Logger::new(),
    )
}

fn screen(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

async fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) {
    for _ in 0..500 {
        app.tick(TICK);
        if done(app) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("app did not settle in time");
}

fn titles(app: &App) -> Vec<String> {
    app.panel()
        .panel()
        .layout()
        .progress
        .as_ref()
        .map(|r| r.iter().map(|(_, i)| i.view().title().to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn test_next_locale_cycles_through_none() {
    let available = vec![LocaleRef::new("en", "English"), LocaleRef::new("fr", "French")];

    let first = next_locale(&available, None);
    assert_eq!(first, Some(available[0].clone()));
    let second = next_locale(&available, first.as_ref());
    assert_eq!(second, Some(available[1].clone()));
    assert_eq!(next_locale(&available, second.as_ref()), None);
    assert_eq!(next_locale(&[], None), None);
}

#[test]
fn test_initial_screen() {
    let mut app = fast_app();
    let text = screen(&mut app);

    assert!(text.contains("No Project Synced"));
    assert!(text.contains("Sync Project"));
    assert!(text.contains("Sync Containers"));
    assert!(text.contains("English (en)"));
    assert_eq!(app.project().listener_count(), 3);
}

#[test]
fn test_toggle_panel_detaches_and_reattaches() {
    let mut app = fast_app();

    app.handle_key(key('v'));
    assert!(!app.panel().is_visible());
    assert_eq!(app.project().listener_count(), 0);
    assert!(screen(&mut app).contains("Panel hidden"));

    app.handle_key(key('v'));
    assert!(app.panel().is_visible());
    assert_eq!(app.project().listener_count(), 3);

    app.shutdown();
    assert_eq!(app.project().listener_count(), 0);
}

#[test]
fn test_locale_edit_through_keys() {
    let mut app = fast_app();

    // Row 2 is "de", persisted and unset in the sample project
    for _ in 0..3 {
        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    }
    assert_eq!(app.panel().selected_locale(), Some(2));

    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    assert_eq!(
        app.project().locale_bindings()[2].locale(),
        Some(&LocaleRef::new("en", "English"))
    );

    app.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
    assert_eq!(app.project().locale_bindings()[2].locale(), None);
}

#[test]
fn test_logs_dialog_captures_keys() {
    let mut app = fast_app();
    app.handle_key(key('G'));
    assert!(app.logs().is_visible());

    // 'q' closes the dialog instead of quitting
    app.handle_key(key('q'));
    assert!(!app.logs().is_visible());
    assert!(!app.should_quit());

    app.handle_key(key('q'));
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_project_sync_end_to_end() {
    let mut app = fast_app();

    app.handle_key(key('p'));
    assert_eq!(app.panel().panel().layout().triggers.is_enabled(), Some(false));
    assert_eq!(titles(&app), vec!["Syncing Project Data"]);

    tick_until(&mut app, |app| !app.project().is_fetching_project()).await;

    assert_eq!(titles(&app), vec!["Syncing Project Data Done"]);
    assert_eq!(app.panel().panel().layout().triggers.is_enabled(), Some(true));
    let text = screen(&mut app);
    assert!(text.contains("Project Tag: fast"));
    assert!(text.contains("Last Synced at: "));
}

#[tokio::test]
async fn test_container_sync_end_to_end() {
    let mut app = fast_app();

    app.handle_key(key('c'));
    assert_eq!(titles(&app).len(), 3);

    tick_until(&mut app, |app| !app.project().is_syncing_any_container()).await;

    assert_eq!(
        titles(&app),
        vec![
            "Syncing UI Strings Done",
            "Syncing Dialogue Done",
            "Syncing Item Descriptions Failed"
        ]
    );
    assert_eq!(app.scheduler().pending(), 0);
}
