use std::collections::TryReserveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    // The table grew past the configured state limit.
    #[error("state table reached {states} entries while expanding depth {depth}")]
    ResourceExhausted { depth: u8, states: usize },

    // The allocator refused to grow the table or frontier.
    #[error("out of memory while expanding depth {depth}")]
    OutOfMemory {
        depth: u8,
        #[source]
        source: TryReserveError,
    },

    // Iterative deepening passed God's number without reaching the table.
    // Either the state is corrupt or the table is not exhaustive.
    #[error("no solution found within {ceiling} moves")]
    Unreachable { ceiling: u8 },

    #[error(
        "only found {found} of {wanted} samples at depth {depth} after {attempts} attempts"
    )]
    SampleStarvation {
        depth: u8,
        found: usize,
        wanted: usize,
        attempts: u64,
    },

    #[error("search cancelled")]
    Cancelled,
}
