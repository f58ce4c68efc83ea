//! Session context trait (port)

use crate::domain::SessionState;

/// Read access to the current session plus the single mutation the
/// navigation gate is allowed to request.
#[cfg_attr(test, mockall::automock)]
pub trait SessionContext {
    fn state(&self) -> &SessionState;

    /// Drops all session data. Must be idempotent.
    fn clear_session(&mut self);
}

impl SessionContext for SessionState {
    fn state(&self) -> &SessionState {
        self
    }

    fn clear_session(&mut self) {
        self.clear();
    }
}
