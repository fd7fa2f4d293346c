use syncpanel::model::{ContainerId, LocaleBinding, LocaleRef, ModelError, PropertyPath};

#[test]
fn test_property_path_round_trip() {
    let path = PropertyPath::locale_at(3);
    assert_eq!(path.as_str(), "locales[3].locale");
    assert_eq!(path.locale_index(), Some(3));

    assert_eq!(PropertyPath::new("tag").locale_index(), None);
    assert_eq!(PropertyPath::new("locales[x].locale").locale_index(), None);
}

#[test]
fn test_locale_binding_keeps_code() {
    let mut binding = LocaleBinding::new("fr", None);
    binding.set_locale(Some(LocaleRef::new("fr", "French")));
    assert_eq!(binding.code(), "fr");
    assert_eq!(binding.locale().map(|l| l.to_string()).as_deref(), Some("French (fr)"));
}

#[test]
fn test_container_ids_are_unique() {
    let a = ContainerId::new();
    assert_ne!(a, ContainerId::new());
    assert_eq!(ContainerId::from_uuid(a.as_uuid()), a);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ModelError::Busy("project fetch").to_string(),
        "Cannot start project fetch: another operation is in progress"
    );
    assert_eq!(
        ModelError::LocaleIndexOutOfRange { index: 4, len: 2 }.to_string(),
        "Locale index 4 out of range (project has 2 locales)"
    );
}
