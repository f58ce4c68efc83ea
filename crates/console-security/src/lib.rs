//! # Console Security
//! 
//! Session store with persistence backends, and the access guard used to
//! render permission-gated content.

pub mod error;
pub mod storage;
pub mod session;
pub mod guard;

pub use error::{SessionError, GuardError};
pub use storage::{SessionStorage, MemoryStorage, FileStorage};
pub use session::{SessionStore, LoginGrant};
pub use guard::{AccessGuard, Requirement};
