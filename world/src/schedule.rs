use std::time::Duration;

/// Deferred action executed once the game clock reaches its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Task {
    /// Ends the invulnerability window numbered `window`.
    EndInvulnerability { window: u32 },
    /// Sheathes the sword swing numbered `swing`.
    SheatheSword { swing: u32 },
    DismissVictoryBanner,
    ReleaseTransitionGuard,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due: Duration,
    task: Task,
}

/// Deadline-ordered queue of deferred tasks.
///
/// Entries sharing a deadline run in the order they were scheduled.
#[derive(Clone, Debug, Default)]
pub(crate) struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schedule(&mut self, due: Duration, task: Task) {
        let index = self.entries.partition_point(|entry| entry.due <= due);
        self.entries.insert(index, Entry { due, task });
    }

    /// Removes and returns every task due at or before `now`.
    pub(crate) fn drain_due(&mut self, now: Duration) -> Vec<Task> {
        let ready = self.entries.partition_point(|entry| entry.due <= now);
        self.entries.drain(..ready).map(|entry| entry.task).collect()
    }

    pub(crate) fn cancel_where(&mut self, mut predicate: impl FnMut(&Task) -> bool) {
        self.entries.retain(|entry| !predicate(&entry.task));
    }
}
