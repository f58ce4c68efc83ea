// ============================================================================
// Console Core - Permission Evaluator
// File: crates/console-core/src/services/permission.rs
// ============================================================================
//! Membership checks of held permission/role codes against requested codes

use console_shared::constants::{ALL_PERMISSION, SUPER_ADMIN_ROLE};
use tracing::warn;

use crate::domain::{CodeSet, SessionState};

/// Which code family an evaluator checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Permission,
    Role,
}

impl CodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeKind::Permission => "permission",
            CodeKind::Role => "role",
        }
    }
}

/// Pure predicates over a held code set.
///
/// A held wildcard satisfies every non-empty request. An empty request is
/// never satisfied: a route or element configured without codes is treated
/// as lacking proof of permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionEvaluator {
    kind: CodeKind,
    wildcard: String,
}

impl PermissionEvaluator {
    /// Evaluator for permission codes, wildcard `*:*:*`.
    pub fn permissions() -> Self {
        Self::with_wildcard(CodeKind::Permission, ALL_PERMISSION)
    }

    /// Evaluator for role codes, wildcard `admin`.
    pub fn roles() -> Self {
        Self::with_wildcard(CodeKind::Role, SUPER_ADMIN_ROLE)
    }

    pub fn with_wildcard(kind: CodeKind, wildcard: impl Into<String>) -> Self {
        Self { kind, wildcard: wildcard.into() }
    }

    pub fn kind(&self) -> CodeKind {
        self.kind
    }

    pub fn wildcard(&self) -> &str {
        &self.wildcard
    }

    /// True when `held` has the wildcard or shares at least one code with
    /// `requested`.
    pub fn has_any<I>(&self, held: &CodeSet, requested: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut requested = requested.into_iter().peekable();
        if requested.peek().is_none() {
            self.report_empty_request("has_any");
            return false;
        }
        if held.contains(&self.wildcard) {
            return true;
        }
        requested.any(|code| held.contains(code.as_ref()))
    }

    /// True when `held` has the wildcard or contains every requested code.
    pub fn has_all<I>(&self, held: &CodeSet, requested: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut requested = requested.into_iter().peekable();
        if requested.peek().is_none() {
            self.report_empty_request("has_all");
            return false;
        }
        if held.contains(&self.wildcard) {
            return true;
        }
        requested.all(|code| held.contains(code.as_ref()))
    }

    /// Single-code form of [`has_any`](Self::has_any).
    pub fn has(&self, held: &CodeSet, code: &str) -> bool {
        self.has_any(held, [code])
    }

    fn report_empty_request(&self, check: &str) {
        warn!(
            kind = self.kind.as_str(),
            check,
            "{} check called without any codes; denying",
            self.kind.as_str()
        );
    }
}

/// `has_any` over the session's permission codes.
pub fn check_permissions<I>(session: &SessionState, requested: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    PermissionEvaluator::permissions().has_any(&session.permission_codes, requested)
}

/// `has_any` over the session's role codes.
pub fn check_roles<I>(session: &SessionState, requested: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    PermissionEvaluator::roles().has_any(&session.role_codes, requested)
}
