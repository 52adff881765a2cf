//! Host-clocked timers.
//!
//! Nothing in here sleeps. A component schedules keys against the host clock
//! and later asks which of them are due. Every queue is owned by exactly one
//! component, so dropping or resetting the component drops its timers with it.

/// Milliseconds on the host clock.
pub type Millis = u64;

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<K> {
    id: TimerId,
    deadline: Millis,
    key: K,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    entries: Vec<Entry<K>>,
    next_id: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Millis, delay: Millis, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline: now.saturating_add(delay),
            key,
        });
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) {
        self.entries.retain(|entry| !pred(&entry.key));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Remove and return every key due at `now`, earliest first.
    /// Timers sharing a deadline come out in scheduling order.
    pub fn pop_due(&mut self, now: Millis) -> Vec<K> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.deadline <= now);
        self.entries = rest;
        due.sort_by_key(|entry| (entry.deadline, entry.id));
        due.into_iter().map(|entry| entry.key).collect()
    }
}
