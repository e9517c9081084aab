/// Cancellable scheduled tasks.
///
/// Every "wait N ms, then do X" in a level is an entry here instead of a
/// free-running callback. A level owns its `Timers`, so:
///   - `cancel(id)` drops one pending action (e.g. a countdown tick)
///   - `cancel_all()` on restart/teardown guarantees nothing stale fires
///   - dropping the level drops every pending action with it
///
/// Time only moves through `advance(dt_ms)`, which the world calls once per
/// simulation tick. Tests drive it directly.

use log::trace;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<A> {
    id: TimerId,
    due_ms: u64,
    action: A,
}

#[derive(Debug)]
pub struct Timers<A> {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Timers<A> {
    pub fn new() -> Self {
        Timers { now_ms: 0, next_id: 0, pending: Vec::new() }
    }

    /// Milliseconds advanced since creation.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, due_ms: self.now_ms + delay_ms, action });
        id
    }

    /// Returns false if the task already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        before != self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            trace!("cancelling {} pending timer(s)", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock forward and return every action now due, earliest
    /// first; ties fire in scheduling order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<A> {
        self.now_ms += dt_ms;
        let now = self.now_ms;

        let mut due: Vec<Pending<A>> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_ms <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|p| (p.due_ms, p.id.0));
        due.into_iter().map(|p| p.action).collect()
    }

    /// Take the earliest task due at or before `until_ms`, moving the clock
    /// to its due time. Anything scheduled while draining is relative to
    /// that time, so a periodic task fires once per period even across a
    /// long step. Finish with `settle(until_ms)`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<A> {
        let idx = self.pending.iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.id.0))
            .map(|(i, _)| i)?;
        let task = self.pending.swap_remove(idx);
        self.now_ms = self.now_ms.max(task.due_ms);
        Some(task.action)
    }

    /// Move the clock to `until_ms` without firing anything.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_when_due_and_not_before() {
        let mut t = Timers::new();
        t.schedule(100, "a");
        assert!(t.advance(99).is_empty());
        assert_eq!(t.advance(1), vec!["a"]);
        assert!(t.is_empty());
    }

    #[test]
    fn fires_in_due_order_then_schedule_order() {
        let mut t = Timers::new();
        t.schedule(300, 3);
        t.schedule(100, 1);
        t.schedule(200, 2);
        t.schedule(100, 10);
        assert_eq!(t.advance(1000), vec![1, 10, 2, 3]);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut t = Timers::new();
        let id = t.schedule(50, "stale");
        t.schedule(50, "live");
        assert!(t.is_pending(id));
        assert!(t.cancel(id));
        assert!(!t.cancel(id));
        assert_eq!(t.advance(60), vec!["live"]);
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut t = Timers::new();
        t.schedule(10, 1);
        t.schedule(20, 2);
        t.cancel_all();
        assert!(t.advance(100).is_empty());
    }

    #[test]
    fn delays_are_relative_to_current_clock() {
        let mut t = Timers::new();
        t.advance(500);
        t.schedule(100, "x");
        assert!(t.advance(99).is_empty());
        assert_eq!(t.advance(1), vec!["x"]);
        assert_eq!(t.now_ms(), 600);
    }

    #[test]
    fn pop_due_lets_periodic_tasks_catch_up() {
        let mut t = Timers::new();
        t.schedule(1000, ());
        let until = t.now_ms() + 3500;
        let mut fired = Vec::new();
        while t.pop_due(until).is_some() {
            fired.push(t.now_ms());
            t.schedule(1000, ());
        }
        t.settle(until);
        assert_eq!(fired, vec![1000, 2000, 3000]);
        assert_eq!(t.now_ms(), 3500);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn fired_id_is_no_longer_pending() {
        let mut t = Timers::new();
        let id = t.schedule(0, ());
        assert_eq!(t.advance(0).len(), 1);
        assert!(!t.is_pending(id));
    }
}
