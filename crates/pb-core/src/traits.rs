//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.
//! Every method returns detached copies of the affected record(s); callers
//! never receive a live reference into a store's backing collection.
//! Id-keyed lookups and mutations signal "not found" with `Ok(None)`,
//! never with an error.

use async_trait::async_trait;

use crate::models::{Board, Comment, NewComment, NewPost, Post, Status};

/// Read-only catalog of boards. The board set is static at runtime.
#[async_trait]
pub trait BoardCatalog: Send + Sync {
    async fn list_boards(&self) -> anyhow::Result<Vec<Board>>;
    async fn get_board(&self, id: i64) -> anyhow::Result<Option<Board>>;
    /// Resolves through the fixed slug table; unknown slugs yield None.
    async fn get_board_by_slug(&self, slug: &str) -> anyhow::Result<Option<Board>>;
}

/// Persistence contract for posts and their vote/status lifecycle.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every post, insertion order.
    async fn list_posts(&self) -> anyhow::Result<Vec<Post>>;
    async fn get_post(&self, id: i64) -> anyhow::Result<Option<Post>>;
    /// Posts whose `board` equals the slug, insertion order preserved.
    async fn list_posts_by_board(&self, slug: &str) -> anyhow::Result<Vec<Post>>;
    /// Assigns the next id, forces system fields (status = under-review,
    /// zero votes/comments, now, not voted) and prepends to the collection.
    async fn create_post(&self, input: NewPost) -> anyhow::Result<Post>;
    /// Flips `user_voted` and moves `votes` by one in the matching
    /// direction. Calling twice restores the original record.
    async fn toggle_vote(&self, id: i64) -> anyhow::Result<Option<Post>>;
    /// Sets `status` unconditionally; any transition is legal.
    async fn update_status(&self, id: i64, status: Status) -> anyhow::Result<Option<Post>>;
    /// Case-insensitive substring match against title OR description,
    /// optionally pre-filtered by exact board and/or status. An empty or
    /// absent query matches everything.
    async fn search_posts(
        &self,
        query: Option<&str>,
        board: Option<&str>,
        status: Option<Status>,
    ) -> anyhow::Result<Vec<Post>>;
    /// Completed posts, newest first.
    async fn completed_posts(&self) -> anyhow::Result<Vec<Post>>;
}

/// Persistence contract for comments. Threading is reconstructed at read
/// time by [`crate::view::thread_comments`], not stored.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Full collection, insertion order.
    async fn list_comments(&self) -> anyhow::Result<Vec<Comment>>;
    /// All comments with a matching `post_id`, insertion order.
    async fn list_comments_for_post(&self, post_id: i64) -> anyhow::Result<Vec<Comment>>;
    /// Assigns the next id, defaults the user name, stamps the creation
    /// time and appends.
    async fn create_comment(&self, input: NewComment) -> anyhow::Result<Comment>;
}
