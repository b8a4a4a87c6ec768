//! # Domain Models
//!
//! These structs represent the core entities of Pulse-Board.
//! Identifiers are plain integers assigned by the owning store
//! (`max(existing) + 1`, starting at 1 for an empty collection).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A topical feedback board (e.g., feature-requests, bug-reports).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: i64,
    /// The URL slug (e.g., "bug-reports")
    pub slug: String,
    pub name: String,
    pub description: String,
}

/// Workflow label attached to a post. There is no enforced transition
/// graph: any status may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    UnderReview,
    Planned,
    InProgress,
    Completed,
    Rejected,
}

impl Status {
    /// Wire/fixture representation, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::UnderReview => "under-review",
            Status::Planned => "planned",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = crate::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under-review" => Ok(Status::UnderReview),
            "planned" => Ok(Status::Planned),
            "in-progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "rejected" => Ok(Status::Rejected),
            other => Err(crate::error::AppError::Validation(format!(
                "unknown status '{other}'"
            ))),
        }
    }
}

/// A single feedback item on a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Slug of the board this post belongs to
    pub board: String,
    pub status: Status,
    /// Invariant: never negative. The vote toggle is the only mutation path.
    pub votes: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    /// Single-viewer flag: has *this* viewer upvoted the post
    pub user_voted: bool,
}

/// Caller-supplied fields for a new post. Everything else
/// (id, status, votes, comment count, timestamps, vote flag) is
/// system-assigned at creation, never accepted from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub board: String,
}

/// A comment on a post. Immutable after creation; there is no edit or
/// delete operation in this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    /// Id of the parent comment for replies, None for top-level
    pub parent_id: Option<i64>,
    pub text: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub text: String,
    /// Defaults to "Anonymous User" when absent
    pub user_name: Option<String>,
}
