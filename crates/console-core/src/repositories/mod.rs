//! Repository traits (ports)

pub mod menu_source;
pub mod session_context;

pub use menu_source::MenuSource;
pub use session_context::SessionContext;

#[cfg(test)]
pub use menu_source::MockMenuSource;
#[cfg(test)]
pub use session_context::MockSessionContext;
