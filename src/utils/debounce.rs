//! Debounce
//!
//! Collapses bursts of calls into a single deferred call carrying the last
//! arguments. Timers are abstracted behind [`Scheduler`] so the handle type
//! decides cancellation: dropping a handle must cancel its task.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Something that can run a task after a delay
pub trait Scheduler {
    /// Cancels the task when dropped
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser `setTimeout` scheduler
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// A debounced callable. Clones share the same pending call.
pub struct Debounced<A: 'static, S: Scheduler + 'static = TimeoutScheduler> {
    inner: Rc<Inner<A, S>>,
}

struct Inner<A, S: Scheduler> {
    func: RefCell<Box<dyn FnMut(A)>>,
    wait_ms: u32,
    scheduler: S,
    pending: RefCell<Option<S::Handle>>,
}

/// Debounce `func` on browser timers
pub fn debounce<A: 'static>(func: impl FnMut(A) + 'static, wait_ms: u32) -> Debounced<A> {
    Debounced::with_scheduler(func, wait_ms, TimeoutScheduler)
}

impl<A: 'static, S: Scheduler + 'static> Debounced<A, S> {
    pub fn with_scheduler(func: impl FnMut(A) + 'static, wait_ms: u32, scheduler: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                func: RefCell::new(Box::new(func)),
                wait_ms,
                scheduler,
                pending: RefCell::new(None),
            }),
        }
    }

    /// Schedule `func(args)` after the wait, replacing any pending call
    pub fn call(&self, args: A) {
        let weak = Rc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(
            self.inner.wait_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire(args);
                }
            }),
        );
        // Dropping the previous handle cancels it.
        let previous = self.inner.pending.replace(Some(handle));
        drop(previous);
    }

    /// Drop the pending call, if any
    pub fn cancel(&self) {
        let pending = self.inner.pending.take();
        drop(pending);
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    pub fn wait_ms(&self) -> u32 {
        self.inner.wait_ms
    }
}

impl<A: 'static, S: Scheduler + 'static> Clone for Debounced<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A, S: Scheduler> Inner<A, S> {
    fn fire(&self, args: A) {
        let finished = self.pending.take();
        let mut func = self.func.borrow_mut();
        (*func)(args);
        drop(finished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Virtual-time scheduler; tasks run only from `advance`
    #[derive(Clone, Default)]
    struct ManualScheduler {
        state: Rc<RefCell<ManualState>>,
    }

    #[derive(Default)]
    struct ManualState {
        now: u64,
        next_id: u64,
        tasks: Vec<ScheduledTask>,
    }

    struct ScheduledTask {
        due: u64,
        id: u64,
        cancelled: Rc<Cell<bool>>,
        task: Box<dyn FnOnce()>,
    }

    struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            let mut state = self.state.borrow_mut();
            let cancelled = Rc::new(Cell::new(false));
            let id = state.next_id;
            state.next_id += 1;
            let due = state.now + u64::from(delay_ms);
            state.tasks.push(ScheduledTask {
                due,
                id,
                cancelled: Rc::clone(&cancelled),
                task,
            });
            ManualHandle { cancelled }
        }
    }

    impl ManualScheduler {
        fn now(&self) -> u64 {
            self.state.borrow().now
        }

        fn advance(&self, ms: u64) {
            let target = self.now() + ms;
            loop {
                let next = {
                    let mut state = self.state.borrow_mut();
                    state.tasks.retain(|t| !t.cancelled.get());
                    let index = state
                        .tasks
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| t.due <= target)
                        .min_by_key(|(_, t)| (t.due, t.id))
                        .map(|(i, _)| i);
                    index.map(|i| {
                        let task = state.tasks.remove(i);
                        state.now = task.due;
                        task
                    })
                };
                match next {
                    Some(task) => (task.task)(),
                    None => break,
                }
            }
            self.state.borrow_mut().now = target;
        }
    }

    fn recorder(
        scheduler: &ManualScheduler,
        wait_ms: u32,
    ) -> (Debounced<&'static str, ManualScheduler>, Rc<RefCell<Vec<(u64, &'static str)>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let clock = scheduler.clone();
        let sink = Rc::clone(&calls);
        let debounced = Debounced::with_scheduler(
            move |arg| sink.borrow_mut().push((clock.now(), arg)),
            wait_ms,
            scheduler.clone(),
        );
        (debounced, calls)
    }

    #[test]
    fn test_burst_collapses_to_last_call() {
        let scheduler = ManualScheduler::default();
        let (debounced, calls) = recorder(&scheduler, 300);

        debounced.call("a");
        scheduler.advance(100);
        debounced.call("b");
        scheduler.advance(100);
        debounced.call("c");

        scheduler.advance(299);
        assert!(calls.borrow().is_empty());
        assert!(debounced.is_pending());

        scheduler.advance(1);
        assert_eq!(*calls.borrow(), vec![(500, "c")]);
        assert!(!debounced.is_pending());

        scheduler.advance(1_000);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_spaced_calls_each_fire() {
        let scheduler = ManualScheduler::default();
        let (debounced, calls) = recorder(&scheduler, 50);

        debounced.call("first");
        scheduler.advance(60);
        debounced.call("second");
        scheduler.advance(60);

        assert_eq!(*calls.borrow(), vec![(50, "first"), (110, "second")]);
    }

    #[test]
    fn test_cancel_drops_pending_call() {
        let scheduler = ManualScheduler::default();
        let (debounced, calls) = recorder(&scheduler, 100);

        debounced.call("never");
        debounced.cancel();
        scheduler.advance(500);

        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_dropping_last_clone_cancels() {
        let scheduler = ManualScheduler::default();
        let (debounced, calls) = recorder(&scheduler, 100);

        let clone = debounced.clone();
        clone.call("via clone");
        drop(clone);
        assert!(debounced.is_pending());
        drop(debounced);

        scheduler.advance(500);
        assert!(calls.borrow().is_empty());
    }
}
