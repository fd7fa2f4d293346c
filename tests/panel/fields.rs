use crate::support::FakeProject;
use pretty_assertions::assert_eq;
use syncpanel::model::{LocaleRef, PropertyPath};
use syncpanel::panel::fields::{self, name_text, timestamp_text};
use syncpanel::panel::{FieldBinding, LocaleList, TextLabel};

#[test]
fn test_name_text() {
    assert_eq!(name_text(""), "No Project Synced");
    assert_eq!(name_text("   "), "No Project Synced");
    assert_eq!(name_text("demo-project"), "Project Tag: demo-project");
}

#[test]
fn test_timestamp_text() {
    assert_eq!(timestamp_text(""), "");
    assert_eq!(timestamp_text(" "), "");
    assert_eq!(timestamp_text("2024-05-01 10:00:00"), "Last Synced at: 2024-05-01 10:00:00");
}

#[test]
fn test_label_refreshes_read_model() {
    let mut project = FakeProject::new();
    let mut name = TextLabel::new();
    let mut timestamp = TextLabel::new();

    fields::refresh_name_label(Some(&mut name), &project);
    fields::refresh_timestamp_label(Some(&mut timestamp), &project);
    assert_eq!(name.text(), "No Project Synced");
    assert_eq!(timestamp.text(), "");

    project.tag = "game".to_string();
    project.last_sync = "yesterday".to_string();
    fields::refresh_name_label(Some(&mut name), &project);
    fields::refresh_timestamp_label(Some(&mut timestamp), &project);
    assert_eq!(name.text(), "Project Tag: game");
    assert_eq!(timestamp.text(), "Last Synced at: yesterday");
}

#[test]
fn test_missing_slots_are_skipped() {
    let project = FakeProject::with_locales(&["en"], &[0]);
    fields::refresh_name_label(None, &project);
    fields::refresh_timestamp_label(None, &project);
    fields::refresh_locales(None, &project);
}

#[test]
fn test_locale_list_binds_persisted_rows_and_falls_back_to_write_back() {
    let mut project = FakeProject::with_locales(&["en", "fr", "de"], &[0, 2]);
    project.locales[1].set_locale(Some(LocaleRef::new("fr", "French")));

    let mut list = LocaleList::new();
    fields::refresh_locales(Some(&mut list), &project);

    let bindings: Vec<FieldBinding> = list.fields().iter().map(|f| f.binding.clone()).collect();
    assert_eq!(
        bindings,
        vec![
            FieldBinding::Persisted(PropertyPath::locale_at(0)),
            FieldBinding::WriteBack(1),
            FieldBinding::Persisted(PropertyPath::locale_at(2)),
        ]
    );
    let labels: Vec<&str> = list.fields().iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["en", "fr", "de"]);
    assert_eq!(list.fields()[1].value, Some(LocaleRef::new("fr", "French")));
}

#[test]
fn test_locale_list_is_rebuilt_not_appended() {
    let mut project = FakeProject::with_locales(&["en", "fr"], &[]);
    let mut list = LocaleList::new();

    fields::refresh_locales(Some(&mut list), &project);
    let first = list.clone();
    fields::refresh_locales(Some(&mut list), &project);
    assert_eq!(list, first);

    project.locales.pop();
    fields::refresh_locales(Some(&mut list), &project);
    assert_eq!(list.len(), 1);
}
