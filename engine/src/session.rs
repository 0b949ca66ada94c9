//! [`EngineSession`]: the three host-facing operations from spec.md §6 —
//! bulk-load a position, run one fixed-depth search, and cooperatively
//! request early termination.

use std::fmt::{self, Display, Formatter};

use eniac_chess_core::{
    load_position_records, Board, LoadError, Memory, MemoryError, Move, PositionRecord, Square,
};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::search::{search, SearchResult};
use crate::stop::StopHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The move a search reports: either a concrete origin/destination pair, or
/// resignation when the side to move has no pseudo-legal move at all.
pub enum MoveToken {
    Move { from: Square, to: Square },
    Resign,
}

impl MoveToken {
    #[must_use]
    pub fn from_move(mv: Option<Move>) -> MoveToken {
        match mv {
            Some(mv) => MoveToken::Move { from: mv.from, to: mv.to },
            None => MoveToken::Resign,
        }
    }
}

impl Display for MoveToken {
    /// The exact `YXYX` / `0000` text from spec.md §6.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveToken::Move { from, to } => write!(f, "{:02}{:02}", from.yx(), to.yx()),
            MoveToken::Resign => write!(f, "0000"),
        }
    }
}

/// A single engine instance: one board, one stop flag, exposing exactly the
/// three operations spec.md §6 contracts a host driver to.
pub struct EngineSession {
    board: Board,
    stop: StopHandle,
}

impl EngineSession {
    #[must_use]
    pub fn new() -> EngineSession {
        EngineSession {
            board: Board::new(Memory::new()),
            stop: StopHandle::new(),
        }
    }

    /// Bulk-initialize memory from a position-record stream, replacing
    /// whatever position was loaded before. Cells not mentioned by a record
    /// reset to zero, and the stop signal is cleared so a fresh position
    /// always starts from a clean cancellation state.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a record addresses a cell outside `0..75` or
    /// carries a value outside `0..=99`.
    pub fn load_position(
        &mut self,
        records: impl IntoIterator<Item = PositionRecord>,
    ) -> Result<(), MemoryError> {
        self.board = load_position_records(records).map_err(|err| match err {
            LoadError::Memory(inner) => inner,
            other => unreachable!(
                "load_position_records only ever raises a Memory error, got {other:?}"
            ),
        })?;
        self.stop.reset();
        Ok(())
    }

    /// Run one fixed-depth search over the currently loaded position and
    /// report the chosen move, or [`MoveToken::Resign`] if the side to move
    /// has none.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchError`] from the underlying search.
    pub fn search(&mut self, config: SearchConfig) -> Result<MoveToken, SearchError> {
        let SearchResult { best_move, .. } = search(&mut self.board, config, &self.stop)?;
        Ok(MoveToken::from_move(best_move))
    }

    /// A handle callers can use to request early termination of whatever
    /// search is currently running (or about to run) on this session. This
    /// is the only way to cancel a search from another thread; the search
    /// loop checks it cooperatively once per move tried at each node, never
    /// at instruction granularity.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// The board this session currently holds, for callers that need to
    /// inspect state between searches (tests, the CLI's `perft` subcommand).
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl Default for EngineSession {
    fn default() -> EngineSession {
        EngineSession::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eniac_chess_core::load_fen;

    fn records_for(fen: &str) -> Vec<PositionRecord> {
        let board = load_fen(fen).unwrap();
        (0..eniac_chess_core::MEMORY_SIZE)
            .filter_map(|addr| {
                let value = board.memory().get(addr).unwrap();
                (value != 0).then_some(PositionRecord {
                    address: addr as u8,
                    value,
                    discriminator: 0,
                })
            })
            .collect()
    }

    #[test]
    fn move_token_formats_as_yxyx() {
        let from = Square::from_yx(25).unwrap();
        let to = Square::from_yx(45).unwrap();
        let token = MoveToken::Move { from, to };
        assert_eq!(token.to_string(), "2545");
    }

    #[test]
    fn resign_token_is_zero() {
        assert_eq!(MoveToken::Resign.to_string(), "0000");
    }

    #[test]
    fn session_searches_a_loaded_position() {
        let mut session = EngineSession::new();
        session
            .load_position(records_for("r6k/8/8/8/8/8/8/R6K w - - 0 1"))
            .unwrap();
        let token = session
            .search(SearchConfig { depth: 2, max_nodes: None })
            .unwrap();
        assert_eq!(token.to_string(), "1181");
    }

    #[test]
    fn loading_a_new_position_resets_the_stop_signal() {
        let mut session = EngineSession::new();
        session.stop_handle().stop();
        session
            .load_position(records_for("r6k/8/8/8/8/8/8/R6K w - - 0 1"))
            .unwrap();
        assert!(!session.stop_handle().is_stopped());
    }
}
