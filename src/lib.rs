//! Chronicle - student club newsletter backend
//!
//! A REST API for a student-club newsletter site: published issues and
//! department pages, a submission/moderation workflow, reactions and
//! feedback, and a double-opt-in subscription flow.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and the moderation state machine
//! - **services**: Application use cases (role resolution, moderation,
//!   aggregation queries, subscriptions)
//! - **infra**: Infrastructure concerns (database, object storage, cache)
//! - **api**: HTTP handlers, middleware, and routes
//! - **jobs**: Background email queue
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Start the email job worker
//! cargo run -- jobs work
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Caller, Role, Submission, SubmissionStatus};
pub use errors::{AppError, AppResult};
