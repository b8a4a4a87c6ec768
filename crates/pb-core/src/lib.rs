//! pulse-board/crates/pb-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Pulse-Board.

pub mod models;
pub mod traits;
pub mod error;
pub mod view;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;
