//! Repository trait definitions for the post store.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`post`]: Post collection operations (create, list, append comment)
//!
//! Handlers and services only ever see `dyn PostRepository`, so the in-memory
//! and Postgres backends are interchangeable at startup.

pub mod error;
pub mod post;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use post::PostRepository;
