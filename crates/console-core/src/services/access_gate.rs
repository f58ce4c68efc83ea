// ============================================================================
// Console Core - Access Gate
// File: crates/console-core/src/services/access_gate.rs
// ============================================================================
//! Per-navigation allow / redirect / deny decision

use console_shared::config::{AppSettings, RoutingSettings};
use console_shared::constants::DEFAULT_TITLE_SUFFIX;
use tracing::{debug, info, warn};

use crate::domain::{NavigationOutcome, NavigationRequest};
use crate::repositories::SessionContext;
use crate::services::permission::PermissionEvaluator;
use crate::services::route_table::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub login_path: String,
    pub landing_path: String,
    pub denied_message: String,
    pub title_suffix: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::from_settings(&RoutingSettings::default(), DEFAULT_TITLE_SUFFIX)
    }
}

impl GateConfig {
    pub fn from_settings(routing: &RoutingSettings, title_suffix: &str) -> Self {
        Self {
            login_path: normalize_path(&routing.login_path),
            landing_path: normalize_path(&routing.landing_path),
            denied_message: routing.denied_message.clone(),
            title_suffix: title_suffix.to_string(),
        }
    }

    pub fn from_app(app: &AppSettings, routing: &RoutingSettings) -> Self {
        Self::from_settings(routing, &app.title_suffix)
    }
}

/// Decides a single navigation attempt.
///
/// The only side effect is clearing an unauthenticated session before
/// redirecting to login; running the same decision twice yields the same
/// outcome.
#[derive(Debug, Clone)]
pub struct AccessGate {
    config: GateConfig,
    permissions: PermissionEvaluator,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

impl AccessGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config, permissions: PermissionEvaluator::permissions() }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn decide<S>(&self, request: &NavigationRequest, session: &mut S) -> NavigationOutcome
    where
        S: SessionContext + ?Sized,
    {
        let target = normalize_path(&request.target_path);
        let is_login_target = target == self.config.login_path;
        let authenticated = session.state().is_authenticated();

        if is_login_target && authenticated {
            debug!(path = %target, "already signed in; redirecting to landing page");
            return NavigationOutcome::Redirected { to: self.config.landing_path.clone() };
        }

        if request.requires_auth && !is_login_target && !authenticated {
            session.clear_session();
            info!(path = %target, "navigation requires sign-in; redirecting to login");
            return NavigationOutcome::Redirected { to: self.config.login_path.clone() };
        }

        if !request.required_permission_codes.is_empty() {
            let held = &session.state().permission_codes;
            if !self.permissions.has_any(held, &request.required_permission_codes) {
                warn!(
                    path = %target,
                    required = ?request.required_permission_codes,
                    "navigation denied: missing permission"
                );
                return NavigationOutcome::Denied { notice: self.config.denied_message.clone() };
            }
        }

        NavigationOutcome::Allowed
    }

    /// `"{title} - {suffix}"` for targets that carry a title.
    pub fn document_title(&self, request: &NavigationRequest) -> Option<String> {
        request
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|title| format!("{} - {}", title, self.config.title_suffix))
    }
}
