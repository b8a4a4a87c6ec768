//! # pb-store-memory
//!
//! In-memory implementation of the pb-core storage ports, seeded from
//! bundled JSON fixtures. This is the only storage plugin: all state
//! lives in process memory and is lost on restart.
//!
//! Each store owns its collection outright and hands out clones on every
//! read, so callers never observe later mutations through a previously
//! returned record. An optional per-store latency simulates a network
//! round-trip for demo realism; it defaults to zero so tests run at full
//! speed against a fresh store instance.

mod boards;
mod comments;
mod posts;

pub use boards::MemoryBoardCatalog;
pub use comments::MemoryCommentStore;
pub use posts::MemoryPostStore;

use std::time::Duration;

/// Pretend this call crossed a network. No-op at the zero default.
pub(crate) async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// Store-assigned ids: one past the current maximum, 1 for an empty
/// collection.
pub(crate) fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::next_id;

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(next_id([3_i64, 12, 7].into_iter()), 13);
    }

    #[test]
    fn next_id_on_empty_collection_is_one() {
        assert_eq!(next_id(std::iter::empty()), 1);
    }
}
