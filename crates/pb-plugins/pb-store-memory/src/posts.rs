//! Post store: creation, vote toggling, status updates and the search
//! operations behind the board, roadmap and changelog views.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use pb_core::models::{NewPost, Post, Status};
use pb_core::traits::PostStore;
use pb_core::view;
use tokio::sync::Mutex;

use crate::{next_id, simulate_latency};

const POSTS_SEED: &str = include_str!("../fixtures/posts.json");

pub struct MemoryPostStore {
    /// Most-recent-first: create prepends.
    posts: Mutex<Vec<Post>>,
    latency: Duration,
}

impl MemoryPostStore {
    pub fn new(seed: Vec<Post>) -> Self {
        Self { posts: Mutex::new(seed), latency: Duration::ZERO }
    }

    /// Store over the bundled fixture set.
    pub fn seeded() -> anyhow::Result<Self> {
        let posts: Vec<Post> = serde_json::from_str(POSTS_SEED)?;
        log::debug!("seeded post store with {} posts", posts.len());
        Ok(Self::new(posts))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list_posts(&self) -> anyhow::Result<Vec<Post>> {
        simulate_latency(self.latency).await;
        Ok(self.posts.lock().await.clone())
    }

    async fn get_post(&self, id: i64) -> anyhow::Result<Option<Post>> {
        simulate_latency(self.latency).await;
        Ok(self.posts.lock().await.iter().find(|p| p.id == id).cloned())
    }

    async fn list_posts_by_board(&self, slug: &str) -> anyhow::Result<Vec<Post>> {
        simulate_latency(self.latency).await;
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .filter(|p| p.board == slug)
            .cloned()
            .collect())
    }

    async fn create_post(&self, input: NewPost) -> anyhow::Result<Post> {
        simulate_latency(self.latency).await;
        let mut posts = self.posts.lock().await;
        let post = Post {
            id: next_id(posts.iter().map(|p| p.id)),
            title: input.title,
            description: input.description,
            board: input.board,
            status: Status::UnderReview,
            votes: 0,
            comment_count: 0,
            created_at: Utc::now(),
            user_voted: false,
        };
        posts.insert(0, post.clone());
        log::info!("created post {} on board {}", post.id, post.board);
        Ok(post)
    }

    async fn toggle_vote(&self, id: i64) -> anyhow::Result<Option<Post>> {
        simulate_latency(self.latency).await;
        let mut posts = self.posts.lock().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if post.user_voted {
            post.votes -= 1;
            post.user_voted = false;
        } else {
            post.votes += 1;
            post.user_voted = true;
        }
        Ok(Some(post.clone()))
    }

    async fn update_status(&self, id: i64, status: Status) -> anyhow::Result<Option<Post>> {
        simulate_latency(self.latency).await;
        let mut posts = self.posts.lock().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.status = status;
        log::info!("post {} status set to {}", id, status.as_str());
        Ok(Some(post.clone()))
    }

    async fn search_posts(
        &self,
        query: Option<&str>,
        board: Option<&str>,
        status: Option<Status>,
    ) -> anyhow::Result<Vec<Post>> {
        simulate_latency(self.latency).await;
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .filter(|p| board.map_or(true, |b| p.board == b))
            .filter(|p| status.map_or(true, |s| p.status == s))
            .filter(|p| view::matches_query(p, query))
            .cloned()
            .collect())
    }

    async fn completed_posts(&self) -> anyhow::Result<Vec<Post>> {
        simulate_latency(self.latency).await;
        let mut completed: Vec<Post> = self
            .posts
            .lock()
            .await
            .iter()
            .filter(|p| p.status == Status::Completed)
            .cloned()
            .collect();
        completed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryPostStore {
        MemoryPostStore::seeded().unwrap()
    }

    fn new_post(title: &str, board: &str) -> NewPost {
        NewPost {
            title: title.into(),
            description: "details".into(),
            board: board.into(),
        }
    }

    #[tokio::test]
    async fn create_forces_system_assigned_fields() {
        let store = store();
        let post = store.create_post(new_post("Offline mode", "feature-requests")).await.unwrap();

        assert_eq!(post.status, Status::UnderReview);
        assert_eq!(post.votes, 0);
        assert_eq!(post.comment_count, 0);
        assert!(!post.user_voted);
        assert_eq!(post.id, 13); // fixture max is 12

        // Prepended: the backing store is most-recent-first.
        let all = store.list_posts().await.unwrap();
        assert_eq!(all[0].id, post.id);
    }

    #[tokio::test]
    async fn create_on_empty_store_assigns_id_one() {
        let store = MemoryPostStore::new(vec![]);
        let post = store.create_post(new_post("First", "general")).await.unwrap();
        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn toggle_vote_is_involutive() {
        let store = store();
        let before = store.get_post(9).await.unwrap().unwrap();

        let voted = store.toggle_vote(9).await.unwrap().unwrap();
        assert!(voted.user_voted);
        assert_eq!(voted.votes, before.votes + 1);

        let unvoted = store.toggle_vote(9).await.unwrap().unwrap();
        assert!(!unvoted.user_voted);
        assert_eq!(unvoted.votes, before.votes);
    }

    #[tokio::test]
    async fn votes_stay_non_negative_from_zero() {
        let store = MemoryPostStore::new(vec![]);
        let post = store.create_post(new_post("Fresh", "general")).await.unwrap();
        for _ in 0..5 {
            let updated = store.toggle_vote(post.id).await.unwrap().unwrap();
            assert!(updated.votes >= 0);
        }
    }

    #[tokio::test]
    async fn toggle_vote_on_unknown_id_is_none() {
        let store = store();
        assert!(store.toggle_vote(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_by_board_filters_and_preserves_order() {
        let store = store();
        let bugs = store.list_posts_by_board("bug-reports").await.unwrap();
        assert!(!bugs.is_empty());
        assert!(bugs.iter().all(|p| p.board == "bug-reports"));
        // Relative order from the backing collection, no implicit sort.
        assert_eq!(bugs.iter().map(|p| p.id).collect::<Vec<_>>(), vec![10, 8, 5, 3]);
    }

    #[tokio::test]
    async fn update_status_allows_any_transition() {
        let store = store();
        // completed -> under-review: no transition graph is enforced.
        let post = store.update_status(1, Status::UnderReview).await.unwrap().unwrap();
        assert_eq!(post.status, Status::UnderReview);
        assert!(store.update_status(999, Status::Planned).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_matches_title_or_description_case_insensitively() {
        let store = store();
        // "crashes" only appears in post 10's description, not its title.
        let hits = store.search_posts(Some("CRASH"), None, None).await.unwrap();
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![10]);
    }

    #[tokio::test]
    async fn search_combines_board_and_status_filters() {
        let store = store();
        let hits = store
            .search_posts(None, Some("bug-reports"), Some(Status::Completed))
            .await
            .unwrap();
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5, 3]);
    }

    #[tokio::test]
    async fn empty_query_matches_everything() {
        let store = store();
        let hits = store.search_posts(Some(""), None, None).await.unwrap();
        assert_eq!(hits.len(), store.list_posts().await.unwrap().len());
    }

    #[tokio::test]
    async fn completed_posts_are_newest_first() {
        let store = store();
        let completed = store.completed_posts().await.unwrap();
        assert!(!completed.is_empty());
        assert!(completed.iter().all(|p| p.status == Status::Completed));
        for pair in completed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn returned_records_are_detached_copies() {
        let store = store();
        let snapshot = store.get_post(12).await.unwrap().unwrap();
        store.toggle_vote(12).await.unwrap().unwrap();
        // The earlier copy must not observe the mutation.
        assert!(!snapshot.user_voted);
        assert_eq!(store.get_post(12).await.unwrap().unwrap().votes, snapshot.votes + 1);
    }
}
