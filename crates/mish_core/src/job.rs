//! Background job tracking for mish
//!
//! The job table is the set of background children that have been forked
//! and not yet reaped. Each pid enters once, when its background launch
//! succeeds, and leaves once, when the reaper collects it.

use mish_hal::{Pid, Signal};
use std::collections::HashSet;
use std::fmt;

/// Set of outstanding background process ids with a fixed capacity.
#[derive(Clone)]
pub struct JobTable {
    pids: HashSet<Pid>,
    capacity: usize,
}

impl fmt::Debug for JobTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobTable")
            .field("jobs", &self.pids.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl JobTable {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pids: HashSet::new(),
            capacity,
        }
    }

    /// Track `pid`. Returns `false`, leaving the table unchanged, when the
    /// table is full or already holds `pid`.
    pub fn insert(&mut self, pid: Pid) -> bool {
        if self.pids.len() >= self.capacity {
            crate::mish_log_debug!(%pid, capacity = self.capacity, "job table full, not tracking");
            return false;
        }
        self.pids.insert(pid)
    }

    /// Stop tracking `pid`. Returns `false` if it was not tracked.
    pub fn remove(&mut self, pid: Pid) -> bool {
        self.pids.remove(&pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.pids.contains(&pid)
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tracked pids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.pids.iter().copied()
    }

    pub fn for_each<F: FnMut(Pid)>(&self, f: F) {
        self.iter().for_each(f);
    }

    /// Send `signal` to every tracked job and return how many were
    /// delivered. Jobs that already exited but were not yet reaped are
    /// skipped silently.
    pub fn terminate_all(&self, signal: Signal) -> usize {
        let mut delivered = 0;
        self.for_each(|pid| match mish_hal::send_signal(pid, signal) {
            Ok(()) => {
                crate::mish_log_debug!(%pid, signal = signal.as_str(), "terminated background job");
                delivered += 1;
            }
            Err(e) => {
                crate::mish_log_debug!(%pid, error = %e, "could not signal background job");
            }
        });
        delivered
    }
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}
