//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Enum-like columns (status, role, category, reaction) are stored as
//! strings and parsed at the repository boundary.

pub mod account;
pub mod department;
pub mod department_issue;
pub mod feedback;
pub mod issue;
pub mod newsletter;
pub mod notice;
pub mod profile;
pub mod reaction;
pub mod submission;
pub mod subscriber;
pub mod user_role;
