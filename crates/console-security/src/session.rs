// ============================================================================
// Console Security - Session Store
// File: crates/console-security/src/session.rs
// Description: Owns the signed-in session and mirrors it to storage
// ============================================================================

use console_core::repositories::SessionContext;
use console_core::{CodeSet, MenuRecord, SessionState, UserInfo};
use console_shared::constants::{
    ALL_STORAGE_KEYS, STORAGE_KEY_MENUS, STORAGE_KEY_PERMISSIONS, STORAGE_KEY_ROLES,
    STORAGE_KEY_TOKEN, STORAGE_KEY_USER_INFO,
};
use console_shared::utils::mask_token;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::SessionError;
use crate::storage::{MemoryStorage, SessionStorage};

/// What a successful login hands to the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginGrant {
    pub token: String,
    pub user: Option<UserInfo>,
    /// Absent lists mean no codes; nothing is granted by default.
    pub permissions: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
}

/// Single writer of [`SessionState`]
pub struct SessionStore {
    state: SessionState,
    menus: Vec<MenuRecord>,
    storage: Box<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.state.is_authenticated())
            .field("permissions", &self.state.permission_codes.len())
            .field("roles", &self.state.role_codes.len())
            .field("menus", &self.menus.len())
            .finish()
    }
}

impl SessionStore {
    /// Empty store over `storage`; nothing is read back.
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self { state: SessionState::default(), menus: Vec::new(), storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Rebuilds the session persisted by a previous run. Entries that fail
    /// to decode are dropped from storage.
    pub fn rehydrate(storage: Box<dyn SessionStorage>) -> Self {
        let mut store = Self::new(storage);

        store.state.token = store.read_raw(STORAGE_KEY_TOKEN).filter(|t| !t.is_empty());
        store.state.user = store.read_json::<UserInfo>(STORAGE_KEY_USER_INFO);
        store.state.permission_codes = store.read_json::<CodeSet>(STORAGE_KEY_PERMISSIONS).unwrap_or_default();
        store.state.role_codes = store.read_json::<CodeSet>(STORAGE_KEY_ROLES).unwrap_or_default();
        store.menus = store.read_json::<Vec<MenuRecord>>(STORAGE_KEY_MENUS).unwrap_or_default();

        if store.state.is_authenticated() {
            info!(
                permissions = store.state.permission_codes.len(),
                roles = store.state.role_codes.len(),
                menus = store.menus.len(),
                "session rehydrated"
            );
        }
        store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn menus(&self) -> &[MenuRecord] {
        &self.menus
    }

    /// Replaces the session with `grant` and persists it.
    ///
    /// The token is written last. If any write fails the whole session is
    /// cleared, in memory and on disk, so a new token never sits next to a
    /// previous user's codes.
    pub fn establish(&mut self, grant: LoginGrant) -> Result<(), SessionError> {
        if grant.token.is_empty() {
            return Err(SessionError::MissingToken);
        }

        let state = SessionState {
            token: Some(grant.token),
            user: grant.user,
            permission_codes: grant.permissions.unwrap_or_default().into_iter().collect(),
            role_codes: grant.roles.unwrap_or_default().into_iter().collect(),
        };

        if let Err(e) = self.persist(&state) {
            warn!("Failed to persist session, signing out: {}", e);
            if let Err(cleanup) = self.clear() {
                warn!("Storage cleanup after failed login also failed: {}", cleanup);
            }
            return Err(e);
        }

        info!(
            token = %mask_token(state.token.as_deref().unwrap_or_default()),
            permissions = state.permission_codes.len(),
            roles = state.role_codes.len(),
            "session established"
        );
        self.state = state;
        Ok(())
    }

    fn persist(&mut self, state: &SessionState) -> Result<(), SessionError> {
        // Drop the old token first so a partial write never reads back as signed in.
        self.storage.remove(STORAGE_KEY_TOKEN)?;
        match &state.user {
            Some(user) => self.storage.set(STORAGE_KEY_USER_INFO, &serde_json::to_string(user)?)?,
            None => self.storage.remove(STORAGE_KEY_USER_INFO)?,
        }
        self.storage.set(STORAGE_KEY_PERMISSIONS, &serde_json::to_string(&state.permission_codes)?)?;
        self.storage.set(STORAGE_KEY_ROLES, &serde_json::to_string(&state.role_codes)?)?;
        self.storage.set(STORAGE_KEY_TOKEN, state.token.as_deref().unwrap_or_default())
    }

    /// Replaces the menu list wholesale.
    pub fn set_menus(&mut self, menus: Vec<MenuRecord>) -> Result<(), SessionError> {
        self.storage.set(STORAGE_KEY_MENUS, &serde_json::to_string(&menus)?)?;
        self.menus = menus;
        Ok(())
    }

    /// Resets memory first, then removes every persisted key. Storage
    /// failures do not stop the remaining removals; the first one is
    /// returned.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.state.clear();
        self.menus.clear();

        let mut first_error = None;
        for key in ALL_STORAGE_KEYS {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, "Failed to remove persisted session key: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read_raw(&mut self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, "Failed to read persisted session key: {}", e);
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "Dropping undecodable session entry: {}", e);
                if let Err(e) = self.storage.remove(key) {
                    warn!(key, "Failed to remove undecodable session entry: {}", e);
                }
                None
            }
        }
    }
}

impl SessionContext for SessionStore {
    fn state(&self) -> &SessionState {
        &self.state
    }

    fn clear_session(&mut self) {
        if let Err(e) = self.clear() {
            warn!("Session cleared in memory but storage cleanup failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockSessionStorage;
    use console_core::MenuType;

    fn grant() -> LoginGrant {
        LoginGrant {
            token: "eyJhbGciOiJIUzI1NiJ9.payload".into(),
            user: Some(UserInfo { user_id: Some(1), user_name: Some("admin".into()), ..Default::default() }),
            permissions: Some(vec!["system:user:list".into(), "system:user:add".into()]),
            roles: Some(vec!["common".into()]),
        }
    }

    #[test]
    fn test_establish_and_rehydrate() {
        let mut storage = MemoryStorage::new();
        {
            // Build through a store, then hand the same data to a new one.
            let mut store = SessionStore::in_memory();
            store.establish(grant()).unwrap();
            store
                .set_menus(vec![MenuRecord::new(1, 0, "System", 1, "/system", MenuType::Directory)])
                .unwrap();
            for key in ALL_STORAGE_KEYS {
                if let Some(value) = store.storage.get(key).unwrap() {
                    storage.set(key, &value).unwrap();
                }
            }
        }

        let store = SessionStore::rehydrate(Box::new(storage));
        assert!(store.is_authenticated());
        assert_eq!(store.state().user.as_ref().and_then(|u| u.user_name.as_deref()), Some("admin"));
        assert!(store.state().permission_codes.contains("system:user:add"));
        assert!(store.state().role_codes.contains("common"));
        assert_eq!(store.menus().len(), 1);
    }

    #[test]
    fn test_missing_codes_grant_nothing() {
        let mut store = SessionStore::in_memory();
        store
            .establish(LoginGrant { token: "t".into(), ..Default::default() })
            .unwrap();
        assert!(store.is_authenticated());
        assert!(store.state().permission_codes.is_empty());
        assert!(store.state().role_codes.is_empty());
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut store = SessionStore::in_memory();
        assert!(matches!(store.establish(LoginGrant::default()), Err(SessionError::MissingToken)));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = SessionStore::in_memory();
        store.establish(grant()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.state(), &SessionState::default());
        for key in ALL_STORAGE_KEYS {
            assert!(store.storage.get(key).unwrap().is_none());
        }
        // idempotent
        store.clear().unwrap();
    }

    #[test]
    fn test_clear_continues_after_storage_failure() {
        let mut storage = MockSessionStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_remove()
            .withf(|key| key.to_string() == STORAGE_KEY_TOKEN)
            .times(1)
            .returning(|_| Err(SessionError::StorageIo(std::io::Error::other("disk full"))));
        storage
            .expect_remove()
            .withf(|key| key.to_string() != STORAGE_KEY_TOKEN)
            .times(4)
            .returning(|_| Ok(()));

        let mut store = SessionStore::rehydrate(Box::new(storage));
        store.state.token = Some("stale".into());
        assert!(store.clear().is_err());
        assert!(!store.is_authenticated());
    }

    /// Memory storage that refuses writes to one key.
    struct FailingStorage {
        inner: MemoryStorage,
        fail_on: &'static str,
    }

    impl SessionStorage for FailingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
            if key == self.fail_on {
                return Err(SessionError::StorageIo(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), SessionError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_failed_establish_does_not_mix_sessions() {
        let mut inner = MemoryStorage::new();
        inner.set(STORAGE_KEY_TOKEN, "admin-token").unwrap();
        inner.set(STORAGE_KEY_PERMISSIONS, "[\"*:*:*\"]").unwrap();
        inner.set(STORAGE_KEY_ROLES, "[\"admin\"]").unwrap();

        let storage = FailingStorage { inner, fail_on: STORAGE_KEY_PERMISSIONS };
        let mut store = SessionStore::rehydrate(Box::new(storage));
        assert!(store.state().permission_codes.contains("*:*:*"));

        let guest = LoginGrant {
            token: "guest-token".into(),
            permissions: Some(vec!["system:user:list".into()]),
            ..Default::default()
        };
        assert!(matches!(store.establish(guest), Err(SessionError::StorageIo(_))));
        assert!(!store.is_authenticated());
        assert!(store.state().permission_codes.is_empty());
        for key in ALL_STORAGE_KEYS {
            assert!(store.storage.get(key).unwrap().is_none(), "{} left behind", key);
        }
    }

    #[test]
    fn test_rehydrate_drops_corrupt_entries() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY_TOKEN, "t").unwrap();
        storage.set(STORAGE_KEY_PERMISSIONS, "{broken").unwrap();
        storage.set(STORAGE_KEY_ROLES, "[\"admin\"]").unwrap();

        let store = SessionStore::rehydrate(Box::new(storage));
        assert!(store.is_authenticated());
        assert!(store.state().permission_codes.is_empty());
        assert!(store.state().role_codes.contains("admin"));
        assert!(store.storage.get(STORAGE_KEY_PERMISSIONS).unwrap().is_none());
    }

    #[test]
    fn test_session_context_clear() {
        let mut store = SessionStore::in_memory();
        store.establish(grant()).unwrap();
        SessionContext::clear_session(&mut store);
        assert!(!SessionContext::state(&store).is_authenticated());
    }
}
