use crate::support::{factory, scheduler, POLL};
use pretty_assertions::assert_eq;
use syncpanel::model::OperationHandle;
use syncpanel::panel::Outcome;

#[test]
fn test_indicator_starts_at_current_progress_without_title() {
    let scheduler = scheduler();
    let handle = OperationHandle::new();
    handle.set_progress(0.25);

    let indicator = factory(&scheduler).create(&handle);

    assert_eq!(indicator.view().value(), 0.25);
    assert_eq!(indicator.view().title(), "");
    assert_eq!(indicator.operation_id(), handle.id());
    assert!(indicator.is_polling());
}

#[test]
fn test_poll_copies_progress() {
    let scheduler = scheduler();
    let handle = OperationHandle::new();
    let indicator = factory(&scheduler).create(&handle);

    handle.set_progress(0.4);
    assert_eq!(indicator.view().value(), 0.0);

    scheduler.advance(POLL);
    assert_eq!(indicator.view().value(), 0.4);
    assert_eq!(indicator.view().outcome(), None);
}

#[test]
fn test_success_appends_done_and_stops_polling() {
    let scheduler = scheduler();
    let handle = OperationHandle::new();
    let indicator = factory(&scheduler).create(&handle);
    indicator.set_title("Syncing Dialogue");

    handle.finish(true);
    scheduler.advance(POLL);

    assert_eq!(indicator.view().title(), "Syncing Dialogue Done");
    assert_eq!(indicator.view().outcome(), Some(Outcome::Done));
    assert_eq!(indicator.view().value(), 1.0);
    assert!(!indicator.is_polling());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_failure_appends_failed() {
    let scheduler = scheduler();
    let handle = OperationHandle::new();
    let indicator = factory(&scheduler).create(&handle);
    indicator.set_title("Syncing Dialogue");

    handle.set_progress(0.5);
    handle.finish(false);
    scheduler.advance(POLL);

    assert_eq!(indicator.view().title(), "Syncing Dialogue Failed");
    assert_eq!(indicator.view().outcome(), Some(Outcome::Failed));
    assert_eq!(indicator.view().value(), 0.5);
}

#[test]
fn test_terminal_suffix_is_appended_once() {
    let scheduler = scheduler();
    let handle = OperationHandle::new();
    let indicator = factory(&scheduler).create(&handle);
    indicator.set_title("Syncing Project Data");

    handle.finish(true);
    for _ in 0..5 {
        scheduler.advance(POLL);
    }
    // A late contradicting finish is ignored by the handle
    handle.finish(false);
    scheduler.advance(POLL);

    assert_eq!(indicator.view().title(), "Syncing Project Data Done");
}

#[test]
fn test_poll_survives_model_dropping_its_handle() {
    let scheduler = scheduler();
    let handle = OperationHandle::new();
    let indicator = factory(&scheduler).create(&handle);
    indicator.set_title("Syncing Project Data");

    let worker = handle.clone();
    drop(handle);
    worker.finish(true);
    drop(worker);
    scheduler.advance(POLL);

    assert_eq!(indicator.view().title(), "Syncing Project Data Done");
}
