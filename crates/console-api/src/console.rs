// ============================================================================
// Console API - Console Orchestrator
// File: crates/console-api/src/console.rs
// Description: Sign-in, menu loading and gated navigation for one user
// ============================================================================

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use console_core::repositories::SessionContext;
use console_core::services::route_table::normalize_path;
use console_core::services::{AccessGate, MenuService, MenuTree, MenuTreeBuilder, RouteTable};
use console_core::{NavigationOutcome, NavigationRequest, ViewId};
use console_security::SessionStore;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::endpoints::auth::{CaptchaInfo, LoginForm};
use crate::error::ApiError;

/// Result of one navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path after redirects and normalization.
    pub path: String,
    pub outcome: NavigationOutcome,
    /// Browser title, when the target has one.
    pub title: Option<String>,
    /// View to mount; `None` for paths no route knows about.
    pub view: Option<ViewId>,
    pub params: BTreeMap<String, String>,
}

/// Owns the session of a single signed-in user and every state change that
/// follows from API traffic: login, logout, menu refresh and an expired
/// token reported by any call.
pub struct Console {
    client: Arc<ApiClient>,
    session: SessionStore,
    gate: AccessGate,
    routes: &'static RouteTable,
    menus: MenuService<ApiClient>,
    menu_tree: MenuTree,
}

impl Console {
    /// Picks up a rehydrated session, token and cached menus included.
    pub fn new(client: Arc<ApiClient>, session: SessionStore, gate: AccessGate) -> Self {
        if let Some(token) = session.token() {
            client.set_token(token);
        }
        let menu_tree = if session.menus().is_empty() {
            MenuTree::default()
        } else {
            MenuTree::from_records(&MenuTreeBuilder::default(), session.menus().to_vec())
        };

        Self {
            menus: MenuService::new(client.clone()),
            client,
            session,
            gate,
            routes: RouteTable::builtin(),
            menu_tree,
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn menu_tree(&self) -> &MenuTree {
        &self.menu_tree
    }

    pub async fn captcha(&self) -> Result<CaptchaInfo, ApiError> {
        self.client.auth().captcha().await
    }

    /// Signs in, then loads the menus. A menu failure other than an
    /// expired session falls back to the built-in menu set.
    pub async fn login(&mut self, form: &LoginForm) -> Result<&MenuTree, ApiError> {
        let result = self.client.auth().login(form).await?;
        self.session.establish(result.into_grant())?;
        if let Some(token) = self.session.token() {
            self.client.set_token(token);
        }
        info!(username = %form.username, "signed in");
        self.refresh_menus().await
    }

    /// Calls the backend when signed in, then clears local state no matter
    /// how that call went.
    pub async fn logout(&mut self) {
        if self.session.is_authenticated() {
            if let Err(e) = self.client.auth().logout().await {
                warn!("Logout request failed, clearing local session anyway: {}", e);
            }
        }
        self.reset();
        info!("signed out");
    }

    pub async fn refresh_menus(&mut self) -> Result<&MenuTree, ApiError> {
        let tree = match self.menus.load_or_default().await {
            Ok(tree) => tree,
            Err(e) => return Err(self.absorb(e.into())),
        };

        if !tree.fallback {
            if let Err(e) = self.session.set_menus(tree.records.clone()) {
                warn!("Failed to persist menus: {}", e);
            }
        }
        self.menu_tree = tree;
        Ok(&self.menu_tree)
    }

    /// Runs one API call. An expired session signs the user out locally
    /// before the error is returned.
    pub async fn call<T, F, Fut>(&mut self, request: F) -> Result<T, ApiError>
    where
        F: FnOnce(Arc<ApiClient>) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let result = request(self.client.clone()).await;
        result.map_err(|e| self.absorb(e))
    }

    /// Resolves `path` against the fixed routes, then the menu routes, and
    /// runs the gate on the result.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let (request, view, params) = match self.routes.resolve(path) {
            Some(resolved) => (
                resolved.navigation_request(),
                Some(resolved.definition.view),
                resolved.params,
            ),
            None => {
                let target = normalize_path(path);
                match self.menu_tree.find_route(&target) {
                    Some(route) => (
                        NavigationRequest::new(route.path.clone()).with_title(route.meta.title.clone()),
                        route.component.as_ref().map(|c| c.view),
                        BTreeMap::new(),
                    ),
                    None => (NavigationRequest::new(target), None, BTreeMap::new()),
                }
            }
        };

        let outcome = self.gate.decide(&request, &mut self.session);
        if !self.session.is_authenticated() {
            self.client.clear_token();
            self.menu_tree = MenuTree::default();
        }

        Navigation {
            path: normalize_path(&request.target_path),
            title: self.gate.document_title(&request),
            outcome,
            view,
            params,
        }
    }

    fn absorb(&mut self, err: ApiError) -> ApiError {
        if err.is_unauthorized() {
            warn!("session expired; signing out locally");
            self.reset();
        }
        err
    }

    fn reset(&mut self) {
        self.session.clear_session();
        self.client.clear_token();
        self.menu_tree = MenuTree::default();
    }
}
