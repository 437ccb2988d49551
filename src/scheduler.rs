//! One-shot, cancellable timers that deliver events instead of running
//! closures.
//!
//! Every delayed behaviour of the site (toast expiry, the consent banner
//! delay, the fake scan, the demo animation ticks) goes through a
//! [`Scheduler`]. In the browser [`BrowserScheduler`] backs it with
//! `gloo-timers`; [`ManualScheduler`] keeps a virtual clock so tests can
//! fast-forward.

use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

pub trait Scheduler<E> {
    /// Delivers `event` once `delay` has elapsed, unless cancelled first.
    fn schedule(&mut self, delay: Duration, event: E) -> TaskId;

    /// Cancelling an unknown or already delivered task is a no-op.
    fn cancel(&mut self, task: TaskId);

    /// Wall clock in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

struct Pending<E> {
    id: TaskId,
    due: Duration,
    event: E,
}

/// Virtual-time scheduler. Nothing fires until the owner pulls due events
/// with [`ManualScheduler::next_due`].
pub struct ManualScheduler<E> {
    epoch_ms: i64,
    elapsed: Duration,
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> ManualScheduler<E> {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(epoch_ms: i64) -> Self {
        Self {
            epoch_ms,
            elapsed: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pops the earliest event due at or before `deadline` and moves the
    /// clock to its due time. Ties resolve in scheduling order.
    pub fn next_due(&mut self, deadline: Duration) -> Option<E> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due <= deadline)
            .min_by_key(|(_, pending)| (pending.due, pending.id))
            .map(|(index, _)| index)?;
        let pending = self.pending.remove(index);
        if pending.due > self.elapsed {
            self.elapsed = pending.due;
        }
        Some(pending.event)
    }

    /// Moves the clock forward without delivering anything.
    pub fn settle(&mut self, deadline: Duration) {
        if deadline > self.elapsed {
            self.elapsed = deadline;
        }
    }
}

impl<E> Default for ManualScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> for ManualScheduler<E> {
    fn schedule(&mut self, delay: Duration, event: E) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.elapsed + delay,
            event,
        });
        id
    }

    fn cancel(&mut self, task: TaskId) {
        self.pending.retain(|pending| pending.id != task);
    }

    fn now_ms(&self) -> i64 {
        self.epoch_ms + self.elapsed.as_millis() as i64
    }
}

/// Late-bound delivery target for browser timers. The scheduler has to exist
/// before the state that receives its events, so the receiver is connected
/// afterwards.
#[cfg(target_arch = "wasm32")]
pub struct EventSink<E> {
    target: Rc<RefCell<Option<Rc<dyn Fn(E)>>>>,
}

#[cfg(target_arch = "wasm32")]
impl<E> Clone for EventSink<E> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl<E> Default for EventSink<E> {
    fn default() -> Self {
        Self {
            target: Rc::new(RefCell::new(None)),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl<E> EventSink<E> {
    pub fn connect(&self, target: impl Fn(E) + 'static) {
        *self.target.borrow_mut() = Some(Rc::new(target));
    }

    fn emit(&self, event: E) {
        let target = self.target.borrow().clone();
        match target {
            Some(target) => target(event),
            None => tracing::warn!("scheduler: event dropped, no receiver connected"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserScheduler<E> {
    sink: EventSink<E>,
    next_id: u64,
    timers: HashMap<TaskId, gloo_timers::callback::Timeout>,
    fired: Rc<RefCell<Vec<TaskId>>>,
}

#[cfg(target_arch = "wasm32")]
impl<E> BrowserScheduler<E> {
    pub fn new(sink: EventSink<E>) -> Self {
        Self {
            sink,
            next_id: 0,
            timers: HashMap::new(),
            fired: Rc::new(RefCell::new(Vec::new())),
        }
    }

    // A timer is only recorded as fired after its callback returned, so its
    // closure is never dropped while running.
    fn collect_fired(&mut self) {
        let fired: Vec<TaskId> = self.fired.borrow_mut().drain(..).collect();
        for id in fired {
            self.timers.remove(&id);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl<E: 'static> Scheduler<E> for BrowserScheduler<E> {
    fn schedule(&mut self, delay: Duration, event: E) -> TaskId {
        self.collect_fired();
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let sink = self.sink.clone();
        let fired = self.fired.clone();
        let timeout = gloo_timers::callback::Timeout::new(millis, move || {
            sink.emit(event);
            fired.borrow_mut().push(id);
        });
        self.timers.insert(id, timeout);
        id
    }

    fn cancel(&mut self, task: TaskId) {
        self.collect_fired();
        // Dropping a gloo Timeout clears it.
        self.timers.remove(&task);
    }

    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}
