//! Recurring callbacks driven by the host's UI tick.
//!
//! Nothing here owns a clock. The host (or a test) advances time explicitly
//! with [`TickScheduler::advance`], and every task that has become due runs
//! once, on the caller's thread.

use log::trace;
use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Duration;

/// A recurring task. Returning [`ControlFlow::Break`] removes it for good.
pub type RecurringTask = Box<dyn FnMut() -> ControlFlow<()>>;

/// Capability to run a callback on a recurring schedule.
pub trait Schedule {
    fn schedule_every(&self, interval: Duration, task: RecurringTask) -> ScheduledTask;
}

/// Handle onto a scheduled task.
///
/// Dropping the handle does not cancel the task.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    id: u64,
    stopped: Rc<Cell<bool>>,
}

impl ScheduledTask {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// `false` once the task stopped itself or was cancelled.
    pub fn is_active(&self) -> bool {
        !self.stopped.get()
    }

    /// Stop the task before its next run.
    pub fn cancel(&self) {
        self.stopped.set(true);
    }
}

struct Entry {
    id: u64,
    interval: Duration,
    next_due: Duration,
    stopped: Rc<Cell<bool>>,
    task: RecurringTask,
}

/// Manual-clock scheduler.
///
/// The UI loop calls [`advance`](Self::advance) with the time elapsed since
/// the previous tick; tests call it with whatever step they need.
#[derive(Default)]
pub struct TickScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    tasks: RefCell<Vec<Entry>>,
    /// Tasks scheduled while `advance` is running
    incoming: RefCell<Vec<Entry>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on this scheduler's clock.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of tasks still scheduled.
    pub fn pending(&self) -> usize {
        let live = |entries: &Vec<Entry>| entries.iter().filter(|entry| !entry.stopped.get()).count();
        live(&self.tasks.borrow()) + live(&self.incoming.borrow())
    }

    /// Move the clock forward by `elapsed` and run every task that became due.
    ///
    /// A task runs at most once per call, however many intervals elapsed.
    /// Returns the number of task runs.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let now = self.now.get() + elapsed;
        self.now.set(now);

        let mut tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        tasks.append(&mut self.incoming.borrow_mut());

        let mut runs = 0;
        for entry in tasks.iter_mut() {
            if entry.stopped.get() || entry.next_due > now {
                continue;
            }
            runs += 1;
            if (entry.task)().is_break() {
                trace!("TickScheduler: task {} finished", entry.id);
                entry.stopped.set(true);
            } else {
                entry.next_due = now + entry.interval;
            }
        }
        tasks.retain(|entry| !entry.stopped.get());

        // Tasks scheduled from inside a running task wait for the next advance
        tasks.append(&mut self.incoming.borrow_mut());
        *self.tasks.borrow_mut() = tasks;
        runs
    }
}

impl Schedule for TickScheduler {
    fn schedule_every(&self, interval: Duration, task: RecurringTask) -> ScheduledTask {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let stopped = Rc::new(Cell::new(false));

        self.incoming.borrow_mut().push(Entry {
            id,
            interval,
            next_due: self.now.get() + interval,
            stopped: stopped.clone(),
            task,
        });
        trace!("TickScheduler: scheduled task {} every {:?}", id, interval);

        ScheduledTask { id, stopped }
    }
}
