//! Deferred work on the event loop.

use std::cell::RefCell;
use std::collections::VecDeque;

/// A task to run after control returns to the event loop
pub type Task = Box<dyn FnOnce()>;

/// Schedules a task for a *subsequent* event-loop turn, never synchronously
pub trait Scheduler {
    fn defer(&self, task: Task);
}

/// FIFO of deferred tasks, drained explicitly.
///
/// Stands in for `setTimeout(fn, 0)` off the browser: each
/// [`run_pending`](ManualScheduler::run_pending) call is one tick.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<Task>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run the tasks queued before this call. Tasks they schedule wait for the next tick.
    pub fn run_pending(&self) -> usize {
        let batch: Vec<Task> = self.queue.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn defer(&self, task: Task) {
        self.queue.borrow_mut().push_back(task);
    }
}
