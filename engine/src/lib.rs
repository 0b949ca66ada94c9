//! The fixed-depth alpha-beta search driver over
//! [`eniac_chess_core`]'s 75-word memory, plus the host-facing
//! [`EngineSession`] that wires together position loading, one search
//! invocation, and cooperative cancellation.

pub mod config;
pub mod error;
pub mod search;
pub mod stop;

mod session;

pub use config::SearchConfig;
pub use error::SearchError;
pub use search::{search, SearchResult};
pub use session::{EngineSession, MoveToken};
pub use stop::StopHandle;
