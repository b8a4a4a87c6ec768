//! Comment store. Comments are append-only and immutable once created;
//! the parent/reply structure is reconstructed at read time by
//! `pb_core::view::thread_comments`, not stored here.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use pb_core::models::{Comment, NewComment};
use pb_core::traits::CommentStore;
use tokio::sync::Mutex;

use crate::{next_id, simulate_latency};

const COMMENTS_SEED: &str = include_str!("../fixtures/comments.json");

const DEFAULT_USER_NAME: &str = "Anonymous User";

pub struct MemoryCommentStore {
    comments: Mutex<Vec<Comment>>,
    latency: Duration,
}

impl MemoryCommentStore {
    pub fn new(seed: Vec<Comment>) -> Self {
        Self { comments: Mutex::new(seed), latency: Duration::ZERO }
    }

    /// Store over the bundled fixture set.
    pub fn seeded() -> anyhow::Result<Self> {
        let comments: Vec<Comment> = serde_json::from_str(COMMENTS_SEED)?;
        log::debug!("seeded comment store with {} comments", comments.len());
        Ok(Self::new(comments))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn list_comments(&self) -> anyhow::Result<Vec<Comment>> {
        simulate_latency(self.latency).await;
        Ok(self.comments.lock().await.clone())
    }

    async fn list_comments_for_post(&self, post_id: i64) -> anyhow::Result<Vec<Comment>> {
        simulate_latency(self.latency).await;
        Ok(self
            .comments
            .lock()
            .await
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, input: NewComment) -> anyhow::Result<Comment> {
        simulate_latency(self.latency).await;
        let mut comments = self.comments.lock().await;
        let comment = Comment {
            id: next_id(comments.iter().map(|c| c.id)),
            post_id: input.post_id,
            parent_id: input.parent_id,
            text: input.text,
            user_name: input.user_name.unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            created_at: Utc::now(),
        };
        comments.push(comment.clone());
        log::info!("created comment {} on post {}", comment.id, comment.post_id);
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_comment(post_id: i64, parent_id: Option<i64>) -> NewComment {
        NewComment {
            post_id,
            parent_id,
            text: "nice".into(),
            user_name: None,
        }
    }

    #[tokio::test]
    async fn lists_only_the_posts_comments_in_insertion_order() {
        let store = MemoryCommentStore::seeded().unwrap();
        let comments = store.list_comments_for_post(12).await.unwrap();
        assert_eq!(comments.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(comments.iter().all(|c| c.post_id == 12));
    }

    #[tokio::test]
    async fn create_defaults_user_name_and_appends() {
        let store = MemoryCommentStore::seeded().unwrap();
        let comment = store.create_comment(new_comment(9, None)).await.unwrap();
        assert_eq!(comment.user_name, "Anonymous User");
        assert_eq!(comment.id, 13); // fixture max is 12

        let all = store.list_comments().await.unwrap();
        assert_eq!(all.last().unwrap().id, comment.id);
    }

    #[tokio::test]
    async fn create_keeps_supplied_user_name_and_parent() {
        let store = MemoryCommentStore::new(vec![]);
        let comment = store
            .create_comment(NewComment {
                post_id: 4,
                parent_id: Some(2),
                text: "reply".into(),
                user_name: Some("Maya R.".into()),
            })
            .await
            .unwrap();
        assert_eq!(comment.id, 1);
        assert_eq!(comment.user_name, "Maya R.");
        assert_eq!(comment.parent_id, Some(2));
    }
}
