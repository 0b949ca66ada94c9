//! Error types for the search driver.

use eniac_chess_core::{ApplyError, MemoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// `depth` asked for more recursion than the search stack's reserved
    /// cells (spec.md §3/§7) could ever hold. The default `SearchConfig`
    /// never triggers this — its depth of 4 sits well inside the budget —
    /// but the check exists because `SearchConfig::depth` is a public `u8`
    /// a caller could set arbitrarily high, and spec.md §7 asks that this
    /// invariant be checked rather than assumed.
    #[error("requested search depth {0} exceeds the {1}-cell search stack budget")]
    StackOverflow(u8, u8),
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}
