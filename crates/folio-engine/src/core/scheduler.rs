use crate::api::types::ElementId;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    owner: Option<ElementId>,
    deadline: f64,
    /// `Some` for repeating timers.
    period: Option<f64>,
    task: T,
}

/// Cancellable one-shot and repeating timers on a logical millisecond clock.
///
/// The host feeds the clock with `advance(now)` and arms a single real timeout
/// for `next_deadline()`. Timers may be tagged with the element they act on so
/// that everything touching a removed element can be cancelled in one call.
///
/// A repeating timer fires at most once per `advance`: if the clock jumped past
/// several periods (a throttled background tab), the missed ticks are dropped
/// and the next one is scheduled a full period from now.
#[derive(Debug)]
pub struct Scheduler<T> {
    timers: Vec<Timer<T>>,
    now: f64,
    next_id: u32,
}

/// Shortest allowed repeat period. Keeps a zero period from firing every advance.
const MIN_PERIOD_MS: f64 = 1.0;

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::with_capacity(16),
            now: 0.0,
            next_id: 1,
        }
    }

    /// Current logical time in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    fn next_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Run `task` once, `delay_ms` from now.
    pub fn after(&mut self, owner: Option<ElementId>, delay_ms: f64, task: T) -> TimerId {
        let id = self.next_id();
        self.timers.push(Timer {
            id,
            owner,
            deadline: self.now + delay_ms.max(0.0),
            period: None,
            task,
        });
        id
    }

    /// Run `task` every `period_ms`, first one period from now.
    pub fn every(&mut self, owner: Option<ElementId>, period_ms: f64, task: T) -> TimerId {
        let period = period_ms.max(MIN_PERIOD_MS);
        let id = self.next_id();
        self.timers.push(Timer {
            id,
            owner,
            deadline: self.now + period,
            period: Some(period),
            task,
        });
        id
    }

    /// Cancel a timer. Unknown or already-fired ids are ignored.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer tagged with `owner`. Returns how many were cancelled.
    pub fn cancel_owner(&mut self, owner: ElementId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != Some(owner));
        before - self.timers.len()
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of live timers tagged with `owner`.
    pub fn owned_by(&self, owner: ElementId) -> usize {
        self.timers.iter().filter(|t| t.owner == Some(owner)).count()
    }

    /// Earliest pending deadline, if any timer is live.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers
            .iter()
            .map(|t| t.deadline)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Move the clock to `now_ms` and collect every due task in deadline order.
    /// The clock never runs backwards.
    pub fn advance(&mut self, now_ms: f64) -> Vec<(TimerId, T)> {
        if now_ms > self.now {
            self.now = now_ms;
        }
        let now = self.now;

        let mut due: Vec<(f64, TimerId, T)> = self
            .timers
            .iter()
            .filter(|t| t.deadline <= now)
            .map(|t| (t.deadline, t.id, t.task.clone()))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        self.timers.retain_mut(|t| {
            if t.deadline > now {
                return true;
            }
            match t.period {
                Some(period) => {
                    t.deadline += period;
                    if t.deadline <= now {
                        t.deadline = now + period;
                    }
                    true
                }
                None => false,
            }
        });

        due.into_iter().map(|(_, id, task)| (id, task)).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let mut s = Scheduler::new();
        s.after(None, 100.0, "a");
        assert!(s.advance(99.0).is_empty());
        assert_eq!(s.advance(100.0).len(), 1);
        assert!(s.advance(500.0).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn repeating_fires_each_period() {
        let mut s = Scheduler::new();
        s.every(None, 3000.0, 'm');
        let mut fired = 0;
        for step in 1..=4 {
            fired += s.advance(step as f64 * 3000.0).len();
        }
        assert_eq!(fired, 4);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn repeating_drops_missed_ticks() {
        let mut s = Scheduler::new();
        s.every(None, 100.0, ());
        assert_eq!(s.advance(1050.0).len(), 1);
        assert_eq!(s.next_deadline(), Some(1150.0));
    }

    #[test]
    fn due_tasks_come_out_in_deadline_order() {
        let mut s = Scheduler::new();
        s.after(None, 300.0, 3);
        s.after(None, 100.0, 1);
        s.after(None, 200.0, 2);
        let order: Vec<i32> = s.advance(1000.0).into_iter().map(|(_, t)| t).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn cancel_is_silent_on_unknown_ids() {
        let mut s = Scheduler::new();
        let id = s.after(None, 10.0, ());
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(!s.cancel(TimerId(999)));
        assert!(s.advance(100.0).is_empty());
    }

    #[test]
    fn cancel_owner_removes_only_that_element() {
        let mut s = Scheduler::new();
        let a = ElementId(1);
        let b = ElementId(2);
        s.after(Some(a), 10.0, ());
        s.every(Some(a), 10.0, ());
        s.after(Some(b), 10.0, ());
        assert_eq!(s.cancel_owner(a), 2);
        assert_eq!(s.owned_by(a), 0);
        assert_eq!(s.owned_by(b), 1);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.advance(500.0);
        s.advance(100.0);
        assert_eq!(s.now(), 500.0);
        s.after(None, 10.0, ());
        assert_eq!(s.next_deadline(), Some(510.0));
    }
}
