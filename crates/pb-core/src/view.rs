//! # View Helpers
//!
//! Consumer-side contracts shared by the board, roadmap and detail views:
//! reconstructing the comment tree from a flat list, and the
//! filter/search/sort rules applied to a candidate set of posts.

use serde::{Deserialize, Serialize};

use crate::models::{Comment, Post, Status};

/// A top-level comment with its direct replies attached.
#[derive(Debug, Clone, Serialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Organizes a flat comment list into a two-level tree: top-level
/// comments (`parent_id == None`) each carry the replies whose
/// `parent_id` matches their id.
///
/// This is two-level only. A reply whose `parent_id` references another
/// reply rather than a top-level comment is silently dropped from the
/// result; deeper nesting is out of scope for the rendered view.
pub fn thread_comments(comments: Vec<Comment>) -> Vec<CommentThread> {
    let (top_level, replies): (Vec<Comment>, Vec<Comment>) =
        comments.into_iter().partition(|c| c.parent_id.is_none());

    top_level
        .into_iter()
        .map(|comment| {
            let replies = replies
                .iter()
                .filter(|r| r.parent_id == Some(comment.id))
                .cloned()
                .collect();
            CommentThread { comment, replies }
        })
        .collect()
}

/// Sort order for a post listing. `Recent` is the default everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Recent,
    Votes,
    Comments,
}

/// Filter and sort settings for a post listing.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive substring matched against title OR description;
    /// empty or absent matches everything.
    pub query: Option<String>,
    /// Exact status match when present.
    pub status: Option<Status>,
    pub sort: SortKey,
}

/// Applies search, status filter and sort to a candidate set.
///
/// All sort keys are descending and the sort is stable: posts that
/// compare equal keep their relative order from the input.
pub fn filter_and_sort(posts: Vec<Post>, filter: &PostFilter) -> Vec<Post> {
    let mut out: Vec<Post> = posts
        .into_iter()
        .filter(|p| matches_query(p, filter.query.as_deref()))
        .filter(|p| filter.status.map_or(true, |s| p.status == s))
        .collect();

    match filter.sort {
        SortKey::Recent => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Votes => out.sort_by(|a, b| b.votes.cmp(&a.votes)),
        SortKey::Comments => out.sort_by(|a, b| b.comment_count.cmp(&a.comment_count)),
    }
    out
}

/// Shared with the store-level search: lowercased substring against
/// title or description.
pub fn matches_query(post: &Post, query: Option<&str>) -> bool {
    match query {
        None => true,
        Some(q) if q.is_empty() => true,
        Some(q) => {
            let q = q.to_lowercase();
            post.title.to_lowercase().contains(&q)
                || post.description.to_lowercase().contains(&q)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn comment(id: i64, parent_id: Option<i64>) -> Comment {
        Comment {
            id,
            post_id: 10,
            parent_id,
            text: format!("comment {id}"),
            user_name: "Anonymous User".into(),
            created_at: Utc::now(),
        }
    }

    fn post(id: i64, votes: i64, comments: i64, age_mins: i64) -> Post {
        Post {
            id,
            title: format!("Post {id}"),
            description: "body".into(),
            board: "general".into(),
            status: Status::UnderReview,
            votes,
            comment_count: comments,
            created_at: Utc::now() - Duration::minutes(age_mins),
            user_voted: false,
        }
    }

    #[test]
    fn threading_attaches_direct_replies() {
        let threads = thread_comments(vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(4, None),
            comment(5, Some(1)),
        ]);
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].comment.id, 1);
        assert_eq!(
            threads[0].replies.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![2, 5]
        );
        assert!(threads[1].replies.is_empty());
    }

    #[test]
    fn threading_drops_replies_to_replies() {
        // id 3 replies to id 2, itself a reply: not re-nested, not shown.
        let threads = thread_comments(vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
        ]);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].replies.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let mut a = post(1, 0, 0, 0);
        a.title = "Bug in login".into();
        let mut b = post(2, 0, 0, 0);
        b.title = "Feature X".into();
        b.description = "unrelated".into();

        let filter = PostFilter { query: Some("BUG".into()), ..Default::default() };
        let hits = filter_and_sort(vec![a, b], &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn empty_query_matches_everything() {
        let filter = PostFilter { query: Some(String::new()), ..Default::default() };
        let hits = filter_and_sort(vec![post(1, 0, 0, 0), post(2, 0, 0, 0)], &filter);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn votes_sort_is_stable_on_ties() {
        let filter = PostFilter { sort: SortKey::Votes, ..Default::default() };
        let sorted = filter_and_sort(
            vec![post(1, 5, 0, 0), post(2, 9, 0, 0), post(3, 5, 0, 0)],
            &filter,
        );
        assert_eq!(sorted.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn recent_sort_puts_newest_first() {
        let filter = PostFilter::default();
        let sorted = filter_and_sort(
            vec![post(1, 0, 0, 30), post(2, 0, 0, 5), post(3, 0, 0, 60)],
            &filter,
        );
        assert_eq!(sorted.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn status_filter_is_exact_match() {
        let mut a = post(1, 0, 0, 0);
        a.status = Status::Planned;
        let b = post(2, 0, 0, 0);
        let filter = PostFilter { status: Some(Status::Planned), ..Default::default() };
        let hits = filter_and_sort(vec![a, b], &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }
}
