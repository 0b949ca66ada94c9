//! A cooperative stop signal: one `AtomicBool` shared between whoever is
//! driving the search and whoever wants to cut it short.
//!
//! The search loop checks this once per move tried at each ply, not once
//! per instruction — cheap enough not to matter, coarse enough that a
//! caller shouldn't expect the search to stop mid-move.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
/// A handle to a stop signal. Cloning shares the same underlying flag:
/// every clone sees every other clone's [`StopHandle::stop`] call.
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    #[must_use]
    pub fn new() -> StopHandle {
        StopHandle {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signal every holder of this handle to stop at the next check point.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Reset the flag so the same handle can back another search.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
