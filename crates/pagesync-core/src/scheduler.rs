//! Virtual-clock timer queue.
//!
//! The embedding event loop owns the notion of "now": it calls
//! [`Scheduler::advance_to`] with the current loop time and sleeps until
//! [`Scheduler::next_due_ms`]. Tests advance the clock by hand.
//!
//! Timers run in `(due, scheduling order)` order, each in its own turn, and
//! never inside the `set_timeout` call that armed them, even with a zero
//! delay.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{trace, warn};

use crate::platform::{TimerId, Timers};

/// Upper bound on tasks run by a single [`Scheduler::flush`].
const FLUSH_STEP_LIMIT: usize = 10_000;

type Task = Box<dyn FnOnce()>;

struct SchedulerState {
    now_ms: u64,
    next_order: u64,
    queue: BTreeMap<(u64, u64), Task>,
}

pub struct Scheduler {
    state: RefCell<SchedulerState>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(SchedulerState {
                now_ms: 0,
                next_order: 0,
                queue: BTreeMap::new(),
            }),
        }
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Due time of the earliest armed timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.state
            .borrow()
            .queue
            .first_key_value()
            .map(|(&(due, _), _)| due)
    }

    pub fn advance_by(&self, delta: Duration) -> usize {
        let target = self.now_ms().saturating_add(duration_ms(delta));
        self.advance_to(target)
    }

    /// Move the clock to `target_ms`, running every timer due at or before
    /// it. The clock never moves backwards. Returns the number of timers run.
    pub fn advance_to(&self, target_ms: u64) -> usize {
        let mut ran = 0;
        while let Some(task) = self.pop_due(Some(target_ms)) {
            task();
            ran += 1;
        }

        let mut state = self.state.borrow_mut();
        state.now_ms = state.now_ms.max(target_ms);
        if ran > 0 {
            trace!(now_ms = state.now_ms, ran, "timers run");
        }
        ran
    }

    /// Run every armed timer, including ones armed along the way, moving the
    /// clock to each timer's due time.
    pub fn flush(&self) -> usize {
        let mut ran = 0;
        while ran < FLUSH_STEP_LIMIT {
            let Some(task) = self.pop_due(None) else {
                return ran;
            };
            task();
            ran += 1;
        }
        warn!(
            limit = FLUSH_STEP_LIMIT,
            pending = self.pending(),
            "flush stopped at step limit"
        );
        ran
    }

    /// Remove the next task due by `limit` (any task when `None`), moving the
    /// clock to its due time. The borrow is released before the task runs.
    fn pop_due(&self, limit: Option<u64>) -> Option<Task> {
        let mut state = self.state.borrow_mut();
        let (&key, _) = state.queue.first_key_value()?;
        if limit.is_some_and(|limit| key.0 > limit) {
            return None;
        }
        state.now_ms = state.now_ms.max(key.0);
        state.queue.remove(&key)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Timers for Scheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let mut state = self.state.borrow_mut();
        let order = state.next_order;
        state.next_order += 1;
        let due = state.now_ms.saturating_add(duration_ms(delay));
        state.queue.insert((due, order), task);
        TimerId(order)
    }

    fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn log_task(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Box<dyn FnOnce()> {
        let log = log.clone();
        Box::new(move || log.borrow_mut().push(name))
    }

    #[test]
    fn fires_no_earlier_than_delay() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.set_timeout(Duration::from_millis(200), log_task(&log, "t"));

        assert_eq!(scheduler.advance_to(199), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.advance_to(200), 1);
        assert_eq!(*log.borrow(), vec!["t"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn fires_in_expiry_order_then_scheduling_order() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.set_timeout(Duration::from_millis(300), log_task(&log, "late"));
        scheduler.set_timeout(Duration::from_millis(100), log_task(&log, "early-a"));
        scheduler.set_timeout(Duration::from_millis(100), log_task(&log, "early-b"));

        assert_eq!(scheduler.advance_by(Duration::from_secs(1)), 3);
        assert_eq!(*log.borrow(), vec!["early-a", "early-b", "late"]);
        assert_eq!(scheduler.now_ms(), 1000);
    }

    #[test]
    fn zero_delay_never_runs_synchronously() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.set_timeout(Duration::ZERO, log_task(&log, "now"));

        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.advance_to(0), 1);
        assert_eq!(*log.borrow(), vec!["now"]);
    }

    #[test]
    fn task_sees_its_due_time_as_now() {
        let scheduler = Rc::new(Scheduler::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = scheduler.clone();
        let out = seen.clone();
        scheduler.set_timeout(
            Duration::from_millis(50),
            Box::new(move || out.borrow_mut().push(s.now_ms())),
        );

        scheduler.advance_to(500);
        assert_eq!(*seen.borrow(), vec![50]);
        assert_eq!(scheduler.now_ms(), 500);
    }

    #[test]
    fn timers_armed_by_timers_run_when_due() {
        let scheduler = Rc::new(Scheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let s = scheduler.clone();
        let l = log.clone();
        scheduler.set_timeout(
            Duration::from_millis(10),
            Box::new(move || {
                l.borrow_mut().push("outer");
                let l2 = l.clone();
                s.set_timeout(
                    Duration::from_millis(10),
                    Box::new(move || l2.borrow_mut().push("inner")),
                );
            }),
        );

        assert_eq!(scheduler.advance_to(15), 1);
        assert_eq!(scheduler.next_due_ms(), Some(20));
        assert_eq!(scheduler.advance_to(20), 1);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let scheduler = Scheduler::new();
        scheduler.advance_to(100);
        scheduler.advance_to(40);
        assert_eq!(scheduler.now_ms(), 100);
    }

    #[test]
    fn flush_runs_everything() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.set_timeout(Duration::from_secs(5), log_task(&log, "a"));
        scheduler.set_timeout(Duration::from_secs(1), log_task(&log, "b"));

        assert_eq!(scheduler.flush(), 2);
        assert_eq!(*log.borrow(), vec!["b", "a"]);
        assert_eq!(scheduler.now_ms(), 5000);
        assert_eq!(scheduler.next_due_ms(), None);
    }
}
