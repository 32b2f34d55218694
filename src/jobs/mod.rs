//! Background jobs.
//!
//! Outbound email (subscription confirmations, password resets) is
//! dispatched through an apalis Postgres queue and processed by the
//! `jobs work` CLI command.

pub mod email_job;

pub use email_job::{email_job_handler, EmailJob, Mailer, QueueMailer};

#[cfg(test)]
pub use email_job::MockMailer;
