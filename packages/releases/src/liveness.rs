use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag telling async continuations whether their owner still exists.
///
/// A component creates one on mount and calls [`kill`](Liveness::kill) on
/// unmount. Code resuming after an `.await` checks
/// [`is_alive`](Liveness::is_alive) before touching component state.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn kill(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Run `f` only while alive. Returns `None` once killed.
    pub fn guard<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        self.is_alive().then(f)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let flag = Liveness::new();
        let held_by_task = flag.clone();
        assert!(held_by_task.is_alive());

        flag.kill();
        assert!(!held_by_task.is_alive());
        assert_eq!(held_by_task.guard(|| 1), None);
    }

    #[test]
    fn test_guard_runs_while_alive() {
        let flag = Liveness::default();
        assert_eq!(flag.guard(|| "written"), Some("written"));
    }
}
