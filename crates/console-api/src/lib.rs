//! # Console API
//! 
//! REST client for the admin backend, typed endpoint wrappers, and the
//! console orchestrator tying session, menus and navigation together.

pub mod error;
pub mod response;
pub mod client;
pub mod endpoints;
pub mod console;

pub use error::ApiError;
pub use response::{Envelope, Page};
pub use client::ApiClient;
pub use console::{Console, Navigation};
