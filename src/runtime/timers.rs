use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::foundation::core::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identity of an armed timer. Orders by deadline, then by arming order.
pub struct TimerId {
    deadline: Millis,
    seq: u64,
}

impl TimerId {
    /// Instant the timer is due.
    pub fn deadline(self) -> Millis {
        self.deadline
    }
}

struct Queue<E> {
    now: Millis,
    next_seq: u64,
    pending: BTreeMap<TimerId, E>,
}

trait CancelTimer {
    fn cancel(&mut self, id: TimerId) -> bool;
}

impl<E> CancelTimer for Queue<E> {
    fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }
}

/// Single-threaded cooperative timer queue on a virtual clock.
///
/// Time only moves when the owner drains due timers with [`Scheduler::pop_due`]
/// or calls [`Scheduler::advance`]. At most one callback runs at a time, so a
/// handler that checks state and then transitions can never interleave with
/// another handler.
///
/// Determinism rule: timers due at the same instant fire in the order they
/// were armed.
pub struct Scheduler<E> {
    queue: Rc<RefCell<Queue<E>>>,
}

impl<E> Clone for Scheduler<E> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<E: 'static> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Scheduler<E> {
    /// Empty queue at [`Millis::ZERO`].
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Queue {
                now: Millis::ZERO,
                next_seq: 0,
                pending: BTreeMap::new(),
            })),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.queue.borrow().now
    }

    /// Arm `event` to fire `delay` from now.
    pub fn after(&self, delay: Millis, event: E) -> TimerHandle {
        let deadline = self.now().after(delay);
        self.at(deadline, event)
    }

    /// Arm `event` to fire at `deadline` (never earlier than now).
    pub fn at(&self, deadline: Millis, event: E) -> TimerHandle {
        let id = {
            let mut q = self.queue.borrow_mut();
            let id = TimerId {
                deadline: deadline.max(q.now),
                seq: q.next_seq,
            };
            q.next_seq += 1;
            q.pending.insert(id, event);
            id
        };
        let erased: Rc<RefCell<dyn CancelTimer>> = self.queue.clone();
        TimerHandle {
            id,
            queue: Rc::downgrade(&erased),
        }
    }

    /// Remove and return the earliest timer due no later than `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&self, until: Millis) -> Option<(Millis, E)> {
        let mut q = self.queue.borrow_mut();
        let (&id, _) = q.pending.first_key_value()?;
        if id.deadline > until {
            return None;
        }
        let event = q.pending.remove(&id)?;
        q.now = q.now.max(id.deadline);
        Some((id.deadline, event))
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn advance(&self, until: Millis) {
        let mut q = self.queue.borrow_mut();
        q.now = q.now.max(until);
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue
            .borrow()
            .pending
            .first_key_value()
            .map(|(id, _)| id.deadline)
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Whether the timer behind `handle` is still armed.
    pub fn is_armed(&self, handle: &TimerHandle) -> bool {
        self.queue.borrow().pending.contains_key(&handle.id)
    }
}

#[must_use = "dropping a TimerHandle cancels its timer"]
/// Ownership of an armed timer. Dropping the handle cancels the timer.
pub struct TimerHandle {
    id: TimerId,
    queue: Weak<RefCell<dyn CancelTimer>>,
}

impl TimerHandle {
    /// Identity of the timer.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Cancel now. Returns whether the timer was still pending.
    pub fn cancel(self) -> bool {
        self.cancel_inner()
    }

    fn cancel_inner(&self) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        match queue.try_borrow_mut() {
            Ok(mut q) => q.cancel(self.id),
            Err(_) => {
                tracing::warn!(id = ?self.id, "timer queue busy, timer left armed");
                false
            }
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").field("id", &self.id).finish()
    }
}

/// Keyed set of timer handles owned by one component.
///
/// Arming a key that is already held replaces (and cancels) the previous
/// timer. Dropping the scope cancels everything it still holds.
#[derive(Debug)]
pub struct Scope<K> {
    held: Vec<(K, TimerHandle)>,
}

impl<K> Default for Scope<K> {
    fn default() -> Self {
        Self { held: Vec::new() }
    }
}

impl<K: Copy + Eq + std::fmt::Debug> Scope<K> {
    /// Empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `handle` under `key`.
    pub fn hold(&mut self, key: K, handle: TimerHandle) {
        self.disarm(key);
        self.held.push((key, handle));
    }

    /// Cancel and forget the timer under `key`, if any.
    pub fn disarm(&mut self, key: K) -> bool {
        let Some(idx) = self.held.iter().position(|(k, _)| *k == key) else {
            return false;
        };
        let (_, handle) = self.held.swap_remove(idx);
        handle.cancel()
    }

    /// Whether a handle is held under `key`.
    pub fn holds(&self, key: K) -> bool {
        self.held.iter().any(|(k, _)| *k == key)
    }

    /// Number of handles held.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Cancel everything.
    pub fn dispose(&mut self) {
        for (key, handle) in self.held.drain(..) {
            if handle.cancel() {
                tracing::debug!(?key, "timer cancelled on dispose");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
