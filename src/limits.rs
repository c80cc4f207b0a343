use crate::error::{Result, SearchError};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

// Bounds shared by every search routine. Searches poll the cancel flag at
// every node they expand and before every sampling attempt.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub max_states: Option<usize>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    pub fn unbounded() -> SearchLimits {
        SearchLimits::default()
    }

    pub fn with_max_states(mut self, max_states: usize) -> SearchLimits {
        self.max_states = Some(max_states);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> SearchLimits {
        self.cancel = Some(flag);
        self
    }

    // Create a fresh flag, attach it, and hand it back to the caller.
    pub fn cancellable(self) -> (SearchLimits, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (self.with_cancel_flag(flag.clone()), flag)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|x| x.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn check_states(&self, depth: u8, states: usize) -> Result<()> {
        match self.max_states {
            Some(limit) if states > limit => Err(SearchError::ResourceExhausted { depth, states }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn cancel_flag() {
        let (limits, flag) = SearchLimits::unbounded().cancellable();
        assert!(limits.check().is_ok());
        flag.store(true, Ordering::Relaxed);
        assert!(matches!(limits.check(), Err(SearchError::Cancelled)));
        assert!(limits.clone().is_cancelled());
    }

    #[test]
    fn state_limit() {
        let limits = SearchLimits::unbounded().with_max_states(10);
        assert!(limits.check_states(1, 10).is_ok());
        assert!(matches!(
            limits.check_states(2, 11),
            Err(SearchError::ResourceExhausted {
                depth: 2,
                states: 11
            })
        ));
        assert!(SearchLimits::unbounded().check_states(9, usize::MAX).is_ok());
    }
}
