use crate::support::FakeProject;
use syncpanel::model::OperationHandle;
use syncpanel::panel::{SyncTriggers, TriggerButton};

fn triggers() -> SyncTriggers {
    SyncTriggers::new(Some(TriggerButton::new("Sync Project")), Some(TriggerButton::new("Sync Containers")))
}

fn buttons_enabled(triggers: &SyncTriggers) -> (bool, bool) {
    (
        triggers.project_button().unwrap().is_enabled(),
        triggers.containers_button().unwrap().is_enabled(),
    )
}

#[test]
fn test_disabled_iff_any_operation_runs() {
    for (fetching, syncing) in [(false, false), (true, false), (false, true), (true, true)] {
        let mut project = FakeProject::with_containers(&["A"]);
        project.fetching = fetching;
        if syncing {
            project.containers[0].operation = Some(OperationHandle::new());
        }

        let mut triggers = triggers();
        let enabled = triggers.refresh_enablement(&project);

        let expected = !(fetching || syncing);
        assert_eq!(enabled, expected, "fetching={fetching} syncing={syncing}");
        assert_eq!(buttons_enabled(&triggers), (expected, expected));
        assert_eq!(triggers.is_enabled(), Some(expected));
    }
}

#[test]
fn test_state_follows_model_not_previous_refresh() {
    let mut project = FakeProject::new();
    let mut triggers = triggers();
    assert_eq!(triggers.is_enabled(), None);

    triggers.refresh_enablement(&project);
    project.fetching = true;
    triggers.refresh_enablement(&project);
    triggers.refresh_enablement(&project);
    project.fetching = false;
    triggers.refresh_enablement(&project);

    assert_eq!(buttons_enabled(&triggers), (true, true));
    assert_eq!(triggers.transition_count(), 2);
}

#[test]
fn test_missing_buttons_are_skipped() {
    let mut project = FakeProject::new();
    project.fetching = true;

    let mut triggers = SyncTriggers::new(None, Some(TriggerButton::new("Sync Containers")));
    assert!(!triggers.refresh_enablement(&project));
    assert!(triggers.project_button().is_none());
    assert!(!triggers.containers_button().unwrap().is_enabled());

    let mut empty = SyncTriggers::default();
    assert!(!empty.refresh_enablement(&project));
}
