// DayLog - platform/process.rs
//
// Process and thread identifiers written into every record.
//
// `std::thread::ThreadId` has no stable numeric form, so each thread is
// given a small integer the first time it logs. Ids start at 1, are never
// reused within a process, and stay fixed for the thread's lifetime.
//
// These are process-local counters, not kernel thread ids: the TID column
// does not match `gettid()`, `/proc/<pid>/task` or `ps -L` output.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// OS process id.
pub fn pid() -> u32 {
    std::process::id()
}

/// Numeric id of the calling thread.
pub fn thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_thread_id_is_stable_per_thread() {
        assert_eq!(thread_id(), thread_id());
    }

    #[test]
    fn test_thread_ids_are_distinct() {
        let ids: HashSet<u64> = (0..8)
            .map(|_| std::thread::spawn(thread_id))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 8);
        assert!(!ids.contains(&0));
    }

    #[test]
    fn test_pid_matches_std() {
        assert_eq!(pid(), std::process::id());
    }
}
