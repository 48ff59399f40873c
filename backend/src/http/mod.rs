//! HTTP server module for the forum backend.
//!
//! This module provides an axum-based HTTP server that exposes the post store
//! as a REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - JSON parsing, status codes                            │
//! │  - CORS, compression, error mapping                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db::services)                            │
//! │  - Submission validation                                 │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                  │
//! │  - LocalRepository / PostgresRepository                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Routes
//!
//! | Method | Path                            | Success |
//! |--------|---------------------------------|---------|
//! | GET    | `/api/posts`                    | 200     |
//! | POST   | `/api/posts`                    | 201     |
//! | POST   | `/api/posts/{post_id}/comments` | 201     |
//! | GET    | `/health`                       | 200     |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
