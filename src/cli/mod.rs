pub mod distance;
pub mod generate;
pub mod scramble;

use cube_scrambler::SearchLimits;
use log::warn;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::{signal, spawn};

// Limits whose cancel flag is raised by Ctrl-C, so long searches stop at the
// next node with an error instead of being killed.
pub fn interruptible_limits(max_states: Option<usize>) -> SearchLimits {
    let mut limits = SearchLimits::unbounded();
    if let Some(x) = max_states {
        limits = limits.with_max_states(x);
    }
    let (limits, flag) = limits.cancellable();
    spawn(cancel_on_ctrl_c(flag));
    limits
}

async fn cancel_on_ctrl_c(flag: Arc<AtomicBool>) {
    if signal::ctrl_c().await.is_ok() {
        warn!("interrupted, stopping search...");
        flag.store(true, Ordering::Relaxed);
    }
}
