use foundation::time::Millis;

/// Deterministic queue of deferred tasks keyed by due time.
///
/// The queue never sleeps: the host wakes the owner (e.g. with
/// `setTimeout`) and calls [`Timers::pop_due`] with the current time.
///
/// Ordering contract: due tasks are returned by `(due, insertion_order)`,
/// so two tasks due at the same instant run in the order they were queued.
#[derive(Debug)]
pub struct Timers<T> {
    next_seq: u64,
    pending: Vec<(Millis, u64, T)>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, now: Millis, delay_ms: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push((now.after(delay_ms), seq, task));
    }

    /// Removes and returns every task due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Vec<T> {
        let mut due: Vec<(Millis, u64, T)> = Vec::new();
        let mut keep: Vec<(Millis, u64, T)> = Vec::with_capacity(self.pending.len());
        for entry in self.pending.drain(..) {
            if entry.0 <= now {
                due.push(entry);
            } else {
                keep.push(entry);
            }
        }
        self.pending = keep;
        due.sort_by(|(da, sa, _), (db, sb, _)| da.cmp(db).then_with(|| sa.cmp(sb)));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Timers;
    use foundation::time::Millis;

    #[test]
    fn pops_only_due_tasks_in_due_order() {
        let mut t = Timers::new();
        t.schedule(Millis(0), 300, "late");
        t.schedule(Millis(0), 100, "early");
        t.schedule(Millis(0), 100, "early-second");

        assert!(t.pop_due(Millis(99)).is_empty());
        assert_eq!(t.pop_due(Millis(100)), vec!["early", "early-second"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.pop_due(Millis(1_000)), vec!["late"]);
        assert!(t.is_empty());
    }

    #[test]
    fn later_schedule_can_fall_due_first() {
        let mut t = Timers::new();
        t.schedule(Millis(0), 3_000, "toast");
        t.schedule(Millis(500), 1_000, "order");
        assert_eq!(t.pop_due(Millis(1_500)), vec!["order"]);
        assert_eq!(t.pop_due(Millis(3_000)), vec!["toast"]);
    }
}
