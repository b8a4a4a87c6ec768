//! Board catalog over the static board set. Read-only at runtime, so no
//! interior mutability is needed; reads still clone.

use std::time::Duration;

use async_trait::async_trait;
use pb_core::models::Board;
use pb_core::traits::BoardCatalog;

use crate::simulate_latency;

const BOARDS_SEED: &str = include_str!("../fixtures/boards.json");

/// Fixed slug→id table used for URL resolution. Unknown slugs resolve to
/// nothing rather than an error.
fn slug_to_id(slug: &str) -> Option<i64> {
    match slug {
        "feature-requests" => Some(1),
        "bug-reports" => Some(2),
        "general" => Some(3),
        _ => None,
    }
}

pub struct MemoryBoardCatalog {
    boards: Vec<Board>,
    latency: Duration,
}

impl MemoryBoardCatalog {
    pub fn new(seed: Vec<Board>) -> Self {
        Self { boards: seed, latency: Duration::ZERO }
    }

    /// Catalog over the bundled fixture set.
    pub fn seeded() -> anyhow::Result<Self> {
        let boards: Vec<Board> = serde_json::from_str(BOARDS_SEED)?;
        log::debug!("seeded board catalog with {} boards", boards.len());
        Ok(Self::new(boards))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl BoardCatalog for MemoryBoardCatalog {
    async fn list_boards(&self) -> anyhow::Result<Vec<Board>> {
        simulate_latency(self.latency).await;
        Ok(self.boards.clone())
    }

    async fn get_board(&self, id: i64) -> anyhow::Result<Option<Board>> {
        simulate_latency(self.latency).await;
        Ok(self.boards.iter().find(|b| b.id == id).cloned())
    }

    async fn get_board_by_slug(&self, slug: &str) -> anyhow::Result<Option<Board>> {
        simulate_latency(self.latency).await;
        let Some(id) = slug_to_id(slug) else {
            return Ok(None);
        };
        Ok(self.boards.iter().find(|b| b.id == id).cloned())
    }
}
