//! Progress indicators bound to an [`OperationHandle`].

use super::scheduler::{Schedule, ScheduledTask};
use crate::constants::{OUTCOME_DONE, OUTCOME_FAILED};
use crate::model::OperationHandle;
use log::{debug, info};
use std::cell::{Ref, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Duration;
use uuid::Uuid;

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Done => OUTCOME_DONE,
            Outcome::Failed => OUTCOME_FAILED,
        }
    }
}

/// What a progress bar shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    title: String,
    value: f32,
    outcome: Option<Outcome>,
}

impl ProgressView {
    fn new(value: f32) -> Self {
        Self {
            title: String::new(),
            value,
            outcome: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Progress fraction in [0, 1].
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Append the terminal suffix. Only the first call has any effect.
    fn finish(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.title = format!("{} {}", self.title, outcome.label());
        self.outcome = Some(outcome);
        true
    }
}

/// A progress view plus the recurring poll that keeps it current.
pub struct Indicator {
    view: Rc<RefCell<ProgressView>>,
    poll: ScheduledTask,
    operation_id: Uuid,
}

impl Indicator {
    pub fn view(&self) -> Ref<'_, ProgressView> {
        self.view.borrow()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.view.borrow_mut().title = title.into();
    }

    /// Whether the poll is still running, i.e. the operation has not been seen finished.
    pub fn is_polling(&self) -> bool {
        self.poll.is_active()
    }

    pub fn operation_id(&self) -> Uuid {
        self.operation_id
    }
}

/// Creates indicators that poll their operation on the injected scheduler.
pub struct IndicatorFactory {
    scheduler: Rc<dyn Schedule>,
    poll_interval: Duration,
}

impl IndicatorFactory {
    pub fn new(scheduler: Rc<dyn Schedule>, poll_interval: Duration) -> Self {
        Self {
            scheduler,
            poll_interval,
        }
    }

    /// Build an indicator starting at the operation's current progress.
    ///
    /// Each poll copies the progress fraction into the view. The first poll
    /// that sees the operation finished appends " Done" or " Failed" to the
    /// title and stops polling. The title is left empty for the caller.
    pub fn create(&self, handle: &OperationHandle) -> Indicator {
        let view = Rc::new(RefCell::new(ProgressView::new(handle.progress())));
        let operation_id = handle.id();

        let poll_view = Rc::clone(&view);
        let poll_handle = handle.clone();
        let poll = self.scheduler.schedule_every(
            self.poll_interval,
            Box::new(move || {
                let Ok(mut view) = poll_view.try_borrow_mut() else {
                    return ControlFlow::Continue(());
                };
                view.value = poll_handle.progress();
                if !poll_handle.is_finished() {
                    return ControlFlow::Continue(());
                }

                let outcome = if poll_handle.is_finished_successfully() {
                    Outcome::Done
                } else {
                    Outcome::Failed
                };
                if view.finish(outcome) {
                    info!("Indicator: '{}'", view.title);
                }
                ControlFlow::Break(())
            }),
        );
        debug!("Indicator: polling operation {} (task {})", operation_id, poll.id());

        Indicator {
            view,
            poll,
            operation_id,
        }
    }
}
