//! Roles and the caller identity passed to every command.
//!
//! Roles are a closed set of independent tags, not a hierarchy: each
//! operation names the exact set it accepts. A contributor, for example,
//! holds department-scoped upload rights that neither rank above nor below
//! an editor's moderation rights.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Role tags assignable to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Contributor,
    President,
    Viewer,
}

/// Roles allowed to moderate submissions unconditionally.
/// Contributors join this set only when their department matches.
pub const MODERATOR_ROLES: [Role; 3] = [Role::Admin, Role::Editor, Role::President];

/// Roles allowed to publish, unpublish, and upload global issues.
pub const PUBLISHER_ROLES: [Role; 2] = [Role::Admin, Role::President];

impl Role {
    /// Parse a stored role string. Unknown values are rejected rather than
    /// defaulted, so a corrupt role row cannot silently grant or deny access.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "contributor" => Some(Role::Contributor),
            "president" => Some(Role::President),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Contributor => "contributor",
            Role::President => "president",
            Role::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity behind a command or query.
///
/// Commands take the caller explicitly instead of reading ambient session
/// state, which keeps authorization decisions deterministic and testable.
/// `role` is the effective role resolved at request time; `None` means the
/// user holds no role row (viewer-only capability).
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Option<Role>,
}

impl Caller {
    pub fn new(user_id: Uuid, role: Option<Role>) -> Self {
        Self { user_id, role }
    }

    /// True iff the caller's effective role is a member of `allowed`.
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.role.map(|r| allowed.contains(&r)).unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_all_roles() {
        for role in [
            Role::Admin,
            Role::Editor,
            Role::Contributor,
            Role::President,
            Role::Viewer,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn parse_rejects_unknown_role() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn caller_without_role_matches_nothing() {
        let caller = Caller::new(Uuid::new_v4(), None);
        assert!(!caller.has_role(&MODERATOR_ROLES));
        assert!(!caller.has_role(&[Role::Viewer]));
    }

    #[test]
    fn role_sets_are_membership_not_rank() {
        // President publishes but a lone editor does not.
        let president = Caller::new(Uuid::new_v4(), Some(Role::President));
        let editor = Caller::new(Uuid::new_v4(), Some(Role::Editor));
        assert!(president.has_role(&PUBLISHER_ROLES));
        assert!(!editor.has_role(&PUBLISHER_ROLES));
        assert!(editor.has_role(&MODERATOR_ROLES));
    }
}
