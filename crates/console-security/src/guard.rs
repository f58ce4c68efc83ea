//! Conditional rendering of permission-gated content

use console_core::services::PermissionEvaluator;
use console_core::{CodeSet, SessionState};
use console_shared::constants::{ALL_PERMISSION, SUPER_ADMIN_ROLE};
use tracing::debug;

use crate::error::GuardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    AnyPermission,
    AllPermissions,
    AnyRole,
    AllRoles,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::AnyPermission => "permission_any",
            Requirement::AllPermissions => "permission_all",
            Requirement::AnyRole => "role_any",
            Requirement::AllRoles => "role_all",
        }
    }

    fn is_role(&self) -> bool {
        matches!(self, Requirement::AnyRole | Requirement::AllRoles)
    }
}

/// Yields content only when the session satisfies its codes.
///
/// A guard always names at least one code; declaring one without codes is
/// a configuration error rather than a silent deny.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    requirement: Requirement,
    codes: Vec<String>,
    evaluator: PermissionEvaluator,
}

impl AccessGuard {
    pub fn permission_any<I, S>(codes: I) -> Result<Self, GuardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(Requirement::AnyPermission, codes)
    }

    pub fn permission_all<I, S>(codes: I) -> Result<Self, GuardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(Requirement::AllPermissions, codes)
    }

    pub fn role_any<I, S>(codes: I) -> Result<Self, GuardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(Requirement::AnyRole, codes)
    }

    pub fn role_all<I, S>(codes: I) -> Result<Self, GuardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(Requirement::AllRoles, codes)
    }

    fn build<I, S>(requirement: Requirement, codes: I) -> Result<Self, GuardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        if codes.is_empty() {
            let (kind, example) = if requirement.is_role() {
                ("role", SUPER_ADMIN_ROLE)
            } else {
                ("permission", ALL_PERMISSION)
            };
            return Err(GuardError::EmptyRequirement { kind, example });
        }

        let evaluator = if requirement.is_role() {
            PermissionEvaluator::roles()
        } else {
            PermissionEvaluator::permissions()
        };
        Ok(Self { requirement, codes, evaluator })
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn allows(&self, session: &SessionState) -> bool {
        let held: &CodeSet = if self.requirement.is_role() {
            &session.role_codes
        } else {
            &session.permission_codes
        };
        let allowed = match self.requirement {
            Requirement::AnyPermission | Requirement::AnyRole => self.evaluator.has_any(held, &self.codes),
            Requirement::AllPermissions | Requirement::AllRoles => self.evaluator.has_all(held, &self.codes),
        };
        if !allowed {
            debug!(guard = self.requirement.as_str(), codes = ?self.codes, "guarded content hidden");
        }
        allowed
    }

    pub fn render<T>(&self, session: &SessionState, content: T) -> Option<T> {
        self.allows(session).then_some(content)
    }

    /// Like [`render`](Self::render) but only builds the content when allowed.
    pub fn render_with<T, F>(&self, session: &SessionState, content: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        self.allows(session).then(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(perms: &[&str], roles: &[&str]) -> SessionState {
        SessionState::authenticated("t", perms.iter().copied(), roles.iter().copied())
    }

    #[test]
    fn test_empty_guard_is_rejected() {
        assert_eq!(
            AccessGuard::permission_any(Vec::<String>::new()),
            Err(GuardError::EmptyRequirement { kind: "permission", example: "*:*:*" })
        );
        assert_eq!(
            AccessGuard::role_all(Vec::<&str>::new()),
            Err(GuardError::EmptyRequirement { kind: "role", example: "admin" })
        );
    }

    #[test]
    fn test_permission_any_renders_content() {
        let guard = AccessGuard::permission_any(["system:user:add", "system:user:edit"]).unwrap();
        assert_eq!(guard.render(&session(&["system:user:edit"], &[]), "Edit"), Some("Edit"));
        assert_eq!(guard.render(&session(&["system:user:list"], &[]), "Edit"), None);
    }

    #[test]
    fn test_permission_all_needs_every_code() {
        let guard = AccessGuard::permission_all(["a:b:c", "d:e:f"]).unwrap();
        assert!(!guard.allows(&session(&["a:b:c"], &[])));
        assert!(guard.allows(&session(&["a:b:c", "d:e:f"], &[])));
        assert!(guard.allows(&session(&["*:*:*"], &[])));
    }

    #[test]
    fn test_role_guards_use_role_codes() {
        let any = AccessGuard::role_any(["editor"]).unwrap();
        assert!(!any.allows(&session(&["*:*:*"], &[])));
        assert!(any.allows(&session(&[], &["admin"])));

        let all = AccessGuard::role_all(["editor", "auditor"]).unwrap();
        assert!(!all.allows(&session(&[], &["editor"])));
        assert!(all.allows(&session(&[], &["auditor", "editor"])));
    }

    #[test]
    fn test_render_with_is_lazy() {
        let guard = AccessGuard::permission_any(["x:y:z"]).unwrap();
        let mut built = false;
        let rendered = guard.render_with(&SessionState::default(), || {
            built = true;
        });
        assert!(rendered.is_none());
        assert!(!built);
    }
}
