//! Session state held for the lifetime of a login

use std::collections::BTreeSet;

use console_shared::EntityId;
use serde::{Deserialize, Serialize};

/// Set of permission or role codes.
pub type CodeSet = BTreeSet<String>;

/// Profile returned by the login endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    /// Remaining profile fields, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    pub permission_codes: CodeSet,
    pub role_codes: CodeSet,
}

impl SessionState {
    pub fn authenticated<P, R>(token: impl Into<String>, permissions: P, roles: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            token: Some(token.into()),
            user: None,
            permission_codes: permissions.into_iter().map(Into::into).collect(),
            role_codes: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// A session counts as authenticated once it carries a non-empty token.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn clear(&mut self) {
        *self = SessionState::default();
    }
}
