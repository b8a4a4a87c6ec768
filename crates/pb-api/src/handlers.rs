//! # pb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! storage ports. Absent records map to 404, boundary validation
//! failures to 400, and store failures to 500; the stores themselves
//! never raise for an unknown id.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use pb_core::error::AppError;
use pb_core::models::{NewComment, NewPost, Status};
use pb_core::traits::{BoardCatalog, CommentStore, PostStore};
use pb_core::view::{self, PostFilter, SortKey};

/// State shared across all Actix-web workers.
pub struct AppState {
    pub boards: Box<dyn BoardCatalog>,
    pub posts: Box<dyn PostStore>,
    pub comments: Box<dyn CommentStore>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn not_found(kind: &str, key: impl std::fmt::Display) -> HttpResponse {
    let err = AppError::NotFound(kind.into(), key.to_string());
    HttpResponse::NotFound().json(ErrorBody { error: err.to_string() })
}

fn bad_request(msg: impl Into<String>) -> HttpResponse {
    let err = AppError::Validation(msg.into());
    HttpResponse::BadRequest().json(ErrorBody { error: err.to_string() })
}

fn internal(err: anyhow::Error) -> HttpResponse {
    log::error!("{}", AppError::Storage(format!("{err:#}")));
    HttpResponse::InternalServerError().json(ErrorBody {
        error: "internal service error".into(),
    })
}

/// GET /api/boards
pub async fn list_boards(data: web::Data<AppState>) -> impl Responder {
    match data.boards.list_boards().await {
        Ok(boards) => HttpResponse::Ok().json(boards),
        Err(e) => internal(e),
    }
}

/// GET /api/boards/{key} — numeric keys look up by id, anything else by slug.
pub async fn get_board(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let key = path.into_inner();
    let lookup = match key.parse::<i64>() {
        Ok(id) => data.boards.get_board(id).await,
        Err(_) => data.boards.get_board_by_slug(&key).await,
    };
    match lookup {
        Ok(Some(board)) => HttpResponse::Ok().json(board),
        Ok(None) => not_found("board", key),
        Err(e) => internal(e),
    }
}

/// GET /api/boards/{slug}/posts
pub async fn list_board_posts(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let slug = path.into_inner();
    match data.boards.get_board_by_slug(&slug).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("board", slug),
        Err(e) => return internal(e),
    }
    match data.posts.list_posts_by_board(&slug).await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(e) => internal(e),
    }
}

/// POST /api/posts
///
/// Only title/description/board are accepted from the caller; status,
/// votes, comment count, timestamps and the vote flag are system-assigned.
pub async fn create_post(
    data: web::Data<AppState>,
    body: web::Json<NewPost>,
) -> impl Responder {
    let input = body.into_inner();
    if input.title.trim().is_empty() {
        return bad_request("title must not be blank");
    }
    if input.description.trim().is_empty() {
        return bad_request("description must not be blank");
    }
    match data.boards.get_board_by_slug(&input.board).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("board", &input.board),
        Err(e) => return internal(e),
    }
    match data.posts.create_post(input).await {
        Ok(post) => HttpResponse::Created().json(post),
        Err(e) => internal(e),
    }
}

/// GET /api/posts/{id}
pub async fn get_post(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match data.posts.get_post(id).await {
        Ok(Some(post)) => HttpResponse::Ok().json(post),
        Ok(None) => not_found("post", id),
        Err(e) => internal(e),
    }
}

/// POST /api/posts/{id}/vote
pub async fn toggle_vote(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match data.posts.toggle_vote(id).await {
        Ok(Some(post)) => HttpResponse::Ok().json(post),
        Ok(None) => not_found("post", id),
        Err(e) => internal(e),
    }
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: Status,
}

/// PUT /api/posts/{id}/status
///
/// Any valid status may replace any other; there is no transition graph.
/// Unknown status strings are rejected by deserialization before this
/// handler runs.
pub async fn update_status(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<StatusBody>,
) -> impl Responder {
    let id = path.into_inner();
    match data.posts.update_status(id, body.status).await {
        Ok(Some(post)) => HttpResponse::Ok().json(post),
        Ok(None) => not_found("post", id),
        Err(e) => internal(e),
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub board: Option<String>,
    pub status: Option<Status>,
    pub sort: Option<SortKey>,
}

/// GET /api/posts/search?q=&board=&status=&sort=
pub async fn search_posts(
    data: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    let hits = match data
        .posts
        .search_posts(params.q.as_deref(), params.board.as_deref(), params.status)
        .await
    {
        Ok(hits) => hits,
        Err(e) => return internal(e),
    };
    // Query and status were applied store-side; only the sort key remains.
    let filter = PostFilter {
        sort: params.sort.unwrap_or_default(),
        ..Default::default()
    };
    HttpResponse::Ok().json(view::filter_and_sort(hits, &filter))
}

#[derive(Serialize)]
pub struct RoadmapResponse {
    pub planned: Vec<pb_core::models::Post>,
    pub in_progress: Vec<pb_core::models::Post>,
    pub completed: Vec<pb_core::models::Post>,
}

/// GET /api/roadmap — posts grouped into the three roadmap columns.
/// Under-review and rejected posts do not appear on the roadmap.
pub async fn roadmap(data: web::Data<AppState>) -> impl Responder {
    let posts = match data.posts.list_posts().await {
        Ok(posts) => posts,
        Err(e) => return internal(e),
    };
    let mut columns = RoadmapResponse {
        planned: Vec::new(),
        in_progress: Vec::new(),
        completed: Vec::new(),
    };
    for post in posts {
        match post.status {
            Status::Planned => columns.planned.push(post),
            Status::InProgress => columns.in_progress.push(post),
            Status::Completed => columns.completed.push(post),
            Status::UnderReview | Status::Rejected => {}
        }
    }
    HttpResponse::Ok().json(columns)
}

/// GET /api/changelog — completed posts, newest first.
pub async fn changelog(data: web::Data<AppState>) -> impl Responder {
    match data.posts.completed_posts().await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(e) => internal(e),
    }
}

#[derive(Deserialize)]
pub struct CommentParams {
    pub threaded: Option<bool>,
}

/// GET /api/posts/{id}/comments — flat by default; `?threaded=true`
/// returns the two-level tree (replies-to-replies are not rendered).
pub async fn list_post_comments(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    params: web::Query<CommentParams>,
) -> impl Responder {
    let post_id = path.into_inner();
    match data.comments.list_comments_for_post(post_id).await {
        Ok(comments) if params.threaded.unwrap_or(false) => {
            HttpResponse::Ok().json(view::thread_comments(comments))
        }
        Ok(comments) => HttpResponse::Ok().json(comments),
        Err(e) => internal(e),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub parent_id: Option<i64>,
    pub text: String,
    pub user_name: Option<String>,
}

/// POST /api/posts/{id}/comments
pub async fn create_comment(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<CommentBody>,
) -> impl Responder {
    let post_id = path.into_inner();
    let body = body.into_inner();
    if body.text.trim().is_empty() {
        return bad_request("text must not be blank");
    }
    match data.posts.get_post(post_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("post", post_id),
        Err(e) => return internal(e),
    }
    let input = NewComment {
        post_id,
        parent_id: body.parent_id,
        text: body.text,
        user_name: body.user_name,
    };
    match data.comments.create_comment(input).await {
        Ok(comment) => HttpResponse::Created().json(comment),
        Err(e) => internal(e),
    }
}
