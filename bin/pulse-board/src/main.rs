//! # Pulse-Board Binary
//!
//! The entry point that assembles the application based on compile-time
//! features. All state is in-memory and lost on restart.

use std::time::Duration;

use actix_web::{web, App, HttpServer};
use pb_api::handlers::AppState;
use pb_api::middleware;

#[cfg(feature = "store-memory")]
use pb_store_memory::{MemoryBoardCatalog, MemoryCommentStore, MemoryPostStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let bind = std::env::var("PB_BIND").unwrap_or_else(|_| "127.0.0.1:8080".into());

    // Artificial per-call delay for demo realism; zero disables it.
    let latency = std::env::var("PB_LATENCY_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO);

    #[cfg(feature = "store-memory")]
    let state = {
        let boards = MemoryBoardCatalog::seeded()
            .expect("Failed to load board fixtures")
            .with_latency(latency);
        let posts = MemoryPostStore::seeded()
            .expect("Failed to load post fixtures")
            .with_latency(latency);
        let comments = MemoryCommentStore::seeded()
            .expect("Failed to load comment fixtures")
            .with_latency(latency);

        web::Data::new(AppState {
            boards: Box::new(boards),
            posts: Box::new(posts),
            comments: Box::new(comments),
        })
    };

    log::info!("🚀 Pulse-Board starting on http://{bind} (latency {latency:?})");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(pb_api::configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
