//! # pb-api
//!
//! The web routing and orchestration layer for Pulse-Board.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the feedback board.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed. `/posts/search` must be
/// registered before `/posts/{id}` so the literal segment wins.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/boards", web::get().to(handlers::list_boards))
            .route("/boards/{key}", web::get().to(handlers::get_board))
            .route("/boards/{slug}/posts", web::get().to(handlers::list_board_posts))
            .route("/posts", web::post().to(handlers::create_post))
            .route("/posts/search", web::get().to(handlers::search_posts))
            .route("/posts/{id}", web::get().to(handlers::get_post))
            .route("/posts/{id}/vote", web::post().to(handlers::toggle_vote))
            .route("/posts/{id}/status", web::put().to(handlers::update_status))
            .route("/posts/{id}/comments", web::get().to(handlers::list_post_comments))
            .route("/posts/{id}/comments", web::post().to(handlers::create_comment))
            .route("/roadmap", web::get().to(handlers::roadmap))
            .route("/changelog", web::get().to(handlers::changelog)),
    );
}
