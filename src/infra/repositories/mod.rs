//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Each trait has a SeaORM-backed `*Store` implementation; raw driver
//! errors are translated into the application error taxonomy at this
//! boundary and never propagate upward.

pub(crate) mod entities;

mod account_repository;
mod department_repository;
mod engagement_repository;
mod issue_repository;
mod newsletter_repository;
mod notice_repository;
mod profile_repository;
mod role_repository;
mod submission_repository;
mod subscriber_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use department_repository::{DepartmentRepository, DepartmentStore};
pub use engagement_repository::{
    FeedbackRepository, FeedbackStore, ReactionRepository, ReactionStore,
};
pub use issue_repository::{
    DepartmentIssueRepository, DepartmentIssueStore, IssueRepository, IssueStore, UpsertDepartmentIssue,
    UpsertIssue,
};
pub use newsletter_repository::{NewsletterRepository, NewsletterStore};
pub use notice_repository::{NoticeRepository, NoticeStore};
pub use profile_repository::{ProfileRepository, ProfileStore};
pub use role_repository::{RoleRepository, RoleStore};
pub use submission_repository::{SubmissionFilter, SubmissionRepository, SubmissionStore};
pub use subscriber_repository::{SubscriberRepository, SubscriberStore};

// Export mocks for unit tests
#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
#[cfg(test)]
pub use engagement_repository::{MockFeedbackRepository, MockReactionRepository};
#[cfg(test)]
pub use issue_repository::{MockDepartmentIssueRepository, MockIssueRepository};
#[cfg(test)]
pub use newsletter_repository::MockNewsletterRepository;
#[cfg(test)]
pub use notice_repository::MockNoticeRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use role_repository::MockRoleRepository;
#[cfg(test)]
pub use submission_repository::MockSubmissionRepository;
#[cfg(test)]
pub use subscriber_repository::MockSubscriberRepository;
