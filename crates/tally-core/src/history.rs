//! Bounded calculation history
//!
//! The log keeps the most recent successful calculations, newest first. When
//! an insertion pushes it past capacity the oldest entry is evicted. Entries
//! are never mutated; replay re-runs a stored request instead of pointing back
//! into the log.

use std::collections::VecDeque;
use std::fmt;

use tally_types::{CalculationRecord, RecordId, Result, TallyError};
use tracing::debug;

/// Number of entries kept when no capacity is configured
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Change notification delivered to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A record was inserted at the front, possibly evicting the oldest one
    Added { record: RecordId, evicted: Option<RecordId> },
    /// The log was emptied
    Cleared { removed: usize },
}

/// Receives a notification after every history mutation, typically to
/// re-render a history view.
pub trait HistoryObserver {
    fn on_history_changed(&self, event: HistoryEvent, history: &HistoryLog);
}

/// Fixed-capacity, newest-first log of calculation records
pub struct HistoryLog {
    entries: VecDeque<CalculationRecord>,
    capacity: usize,
    observers: Vec<Box<dyn HistoryObserver>>,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HistoryLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryLog")
            .field("entries", &self.entries)
            .field("capacity", &self.capacity)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY + 1),
            capacity: DEFAULT_HISTORY_CAPACITY,
            observers: Vec::new(),
        }
    }

    /// Creates a log holding at most `capacity` entries. Zero is rejected.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TallyError::configuration("history capacity must be at least 1"));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            observers: Vec::new(),
        })
    }

    pub fn subscribe(&mut self, observer: Box<dyn HistoryObserver>) {
        self.observers.push(observer);
    }

    /// Inserts `record` as the newest entry, evicting the oldest when full.
    pub fn add_entry(&mut self, record: CalculationRecord) {
        let id = record.id();
        self.entries.push_front(record);
        let evicted = if self.entries.len() > self.capacity {
            self.entries.pop_back().map(|old| old.id())
        } else {
            None
        };
        debug!(record = %id, evicted = ?evicted, len = self.entries.len(), "history entry added");
        self.notify(HistoryEvent::Added { record: id, evicted });
    }

    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        debug!(removed, "history cleared");
        self.notify(HistoryEvent::Cleared { removed });
    }

    /// Record at `index`, where 0 is the newest.
    pub fn entry_at(&self, index: usize) -> Result<&CalculationRecord> {
        self.entries
            .get(index)
            .ok_or(TallyError::IndexOutOfRange { index, len: self.entries.len() })
    }

    /// Entries newest-first
    pub fn iter(&self) -> impl Iterator<Item = &CalculationRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn notify(&self, event: HistoryEvent) {
        for observer in &self.observers {
            observer.on_history_changed(event, self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tally_types::{CalculationRequest, Operator};

    fn record(n: f64) -> CalculationRecord {
        CalculationRecord::new(CalculationRequest::new(n, Operator::Add, 0.0), n)
    }

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<(HistoryEvent, usize)>>>,
    }

    impl HistoryObserver for Recorder {
        fn on_history_changed(&self, event: HistoryEvent, history: &HistoryLog) {
            self.events.borrow_mut().push((event, history.len()));
        }
    }

    #[test]
    fn newest_entry_is_at_index_zero() {
        let mut history = HistoryLog::new();
        history.add_entry(record(1.0));
        history.add_entry(record(2.0));
        assert_eq!(history.entry_at(0).unwrap().left(), 2.0);
        assert_eq!(history.entry_at(1).unwrap().left(), 1.0);
    }

    #[test]
    fn eleventh_insert_evicts_the_first() {
        let mut history = HistoryLog::new();
        let first = record(1.0);
        let first_id = first.id();
        history.add_entry(first);
        for n in 2..=11 {
            history.add_entry(record(n as f64));
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(history.entry_at(0).unwrap().left(), 11.0);
        assert_eq!(history.entry_at(9).unwrap().left(), 2.0);
        assert!(history.iter().all(|r| r.id() != first_id));
    }

    #[test]
    fn clear_empties_and_lookup_fails() {
        let mut history = HistoryLog::new();
        history.add_entry(record(1.0));
        history.add_entry(record(2.0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.entry_at(0).unwrap_err(), TallyError::IndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn lookup_past_end_reports_length() {
        let mut history = HistoryLog::new();
        history.add_entry(record(1.0));
        assert_eq!(history.entry_at(1).unwrap_err(), TallyError::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = HistoryLog::with_capacity(0).unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn custom_capacity_bounds_the_log() {
        let mut history = HistoryLog::with_capacity(2).unwrap();
        for n in 0..5 {
            history.add_entry(record(n as f64));
        }
        let lefts: Vec<f64> = history.iter().map(|r| r.left()).collect();
        assert_eq!(lefts, vec![4.0, 3.0]);
        assert_eq!(history.capacity(), 2);
    }

    #[test]
    fn observers_see_every_mutation() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut history = HistoryLog::with_capacity(1).unwrap();
        history.subscribe(Box::new(Recorder { events: Rc::clone(&events) }));

        let a = record(1.0);
        let a_id = a.id();
        history.add_entry(a);
        let b = record(2.0);
        let b_id = b.id();
        history.add_entry(b);
        history.clear();

        let seen = events.borrow();
        assert_eq!(
            *seen,
            vec![
                (HistoryEvent::Added { record: a_id, evicted: None }, 1),
                (HistoryEvent::Added { record: b_id, evicted: Some(a_id) }, 1),
                (HistoryEvent::Cleared { removed: 1 }, 0),
            ]
        );
    }

    #[test]
    fn clearing_an_empty_log_still_notifies() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut history = HistoryLog::new();
        history.subscribe(Box::new(Recorder { events: Rc::clone(&events) }));
        history.clear();
        assert_eq!(*events.borrow(), vec![(HistoryEvent::Cleared { removed: 0 }, 0)]);
    }
}
