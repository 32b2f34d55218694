//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Object storage for uploaded PDFs and media
//! - Redis cache (rate limiting, health)

pub mod cache;
pub mod db;
pub mod repositories;
pub mod storage;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use storage::{DiskStorage, ObjectStorage};
