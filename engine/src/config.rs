//! Search configuration.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Tunable parameters for one search. `Copy` and cheap to construct, the
/// way the rest of this engine's state is, so a caller can build one fresh
/// per search without worrying about allocation.
pub struct SearchConfig {
    /// Number of plies to search before falling back to static evaluation.
    /// Four, per this engine's nominal fixed depth.
    pub depth: u8,
    /// Optional cap on the number of nodes visited, independent of the stop
    /// signal. `None` means unbounded (besides the depth cutoff itself).
    pub max_nodes: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            depth: 4,
            max_nodes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth_is_four() {
        assert_eq!(SearchConfig::default().depth, 4);
    }
}
