//! Navigation requests and gate outcomes

use super::session::CodeSet;

/// One navigation attempt, built fresh per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target_path: String,
    pub required_permission_codes: CodeSet,
    pub requires_auth: bool,
    pub title: Option<String>,
}

impl NavigationRequest {
    /// Authenticated target with no permission requirement.
    pub fn new(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            required_permission_codes: CodeSet::new(),
            requires_auth: true,
            title: None,
        }
    }

    pub fn public(target_path: impl Into<String>) -> Self {
        Self { requires_auth: false, ..Self::new(target_path) }
    }

    pub fn with_permissions<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.required_permission_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Terminal state of a gate decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Allowed,
    Redirected { to: String },
    /// Navigation is cancelled; `notice` is shown to the user.
    Denied { notice: String },
}

impl NavigationOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, NavigationOutcome::Allowed)
    }
}
