//! # Forum Backend
//!
//! A minimal forum API: list posts, create posts, and attach comments to a post,
//! backed by a document-style post store.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Posts, comments, identifiers, and raw client submissions
//! - [`db`]: Repository pattern, store backends, and the service layer
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Each post is one document; its comments are embedded in it and only ever
//! appended to. Identifiers are random UUIDs generated by the store layer and
//! exposed to clients as strings.

// Allow large error types - RepositoryError carries context for logging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
