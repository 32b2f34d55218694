//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, dashboard_handler, department_handler, engagement_handler, issue_handler,
    newsletter_handler, notice_handler, profile_handler, submission_handler, subscription_handler,
};
use crate::domain::{
    AccountResponse, ActivityItem, ActivityKind, Department, DepartmentCategory, DepartmentIssue,
    Feedback, Issue, ModerationDecision, NewFeedback, NewSubmission, Newsletter, Notice, Profile,
    RankedNewsletter, Reaction, ReactionCounts, Role, SubmissionStatus, SubscribeRequest,
    UpdateProfile,
};
use crate::services::{Stats, TokenResponse};

/// OpenAPI documentation for the Chronicle API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chronicle",
        version = "0.1.0",
        description = "Student club newsletter backend: issues, submissions, moderation, subscriptions",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::register,
        auth_handler::login,
        auth_handler::request_password_reset,
        // Profiles & roles
        profile_handler::my_profile,
        profile_handler::update_my_profile,
        profile_handler::get_profile,
        profile_handler::update_profile,
        profile_handler::assign_role,
        // Departments
        department_handler::list_departments,
        department_handler::get_department,
        // Issues
        issue_handler::list_issues,
        issue_handler::current_issue,
        issue_handler::list_department_issues,
        issue_handler::upload_global_issue,
        issue_handler::upload_department_issue,
        issue_handler::publish_issue,
        issue_handler::unpublish_issue,
        // Newsletters
        newsletter_handler::list_newsletters,
        newsletter_handler::set_published,
        // Submissions & moderation
        submission_handler::create_submission,
        submission_handler::upload_media,
        submission_handler::list_approved,
        submission_handler::list_for_moderation,
        submission_handler::moderate,
        submission_handler::toggle_pin,
        submission_handler::delete_submission,
        // Notices
        notice_handler::active_notices,
        // Engagement
        engagement_handler::react,
        engagement_handler::my_reaction,
        engagement_handler::reaction_counts,
        engagement_handler::submit_feedback,
        // Subscriptions
        subscription_handler::subscribe,
        subscription_handler::confirm,
        // Dashboard
        dashboard_handler::recent_activity,
        dashboard_handler::stats,
        dashboard_handler::trending,
        dashboard_handler::spotlight,
    ),
    components(
        schemas(
            // Domain types
            Role,
            AccountResponse,
            Profile,
            UpdateProfile,
            Department,
            DepartmentCategory,
            Issue,
            DepartmentIssue,
            Newsletter,
            RankedNewsletter,
            crate::domain::Submission,
            SubmissionStatus,
            ModerationDecision,
            NewSubmission,
            Notice,
            Reaction,
            ReactionCounts,
            crate::domain::EntityKind,
            crate::domain::ReactionKind,
            Feedback,
            NewFeedback,
            SubscribeRequest,
            ActivityItem,
            ActivityKind,
            Stats,
            TokenResponse,
            // Handler request/response types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::PasswordResetRequest,
            profile_handler::AssignRoleRequest,
            newsletter_handler::SetPublishedRequest,
            submission_handler::ModerateRequest,
            submission_handler::MediaUploadResponse,
            engagement_handler::ReactRequest,
            engagement_handler::ReactResponse,
            subscription_handler::ConfirmRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, password reset"),
        (name = "Profiles", description = "Profiles and role assignment"),
        (name = "Departments", description = "Department reference data"),
        (name = "Issues", description = "Global issues and department contributions"),
        (name = "Newsletters", description = "Newsletter archive"),
        (name = "Submissions", description = "Student showcase submissions"),
        (name = "Moderation", description = "Submission review workflow"),
        (name = "Notices", description = "Notice board"),
        (name = "Engagement", description = "Reactions and feedback"),
        (name = "Subscriptions", description = "Newsletter subscription opt-in"),
        (name = "Dashboard", description = "Aggregated read models")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
