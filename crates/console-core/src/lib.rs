//! # Console Core
//! 
//! Domain types, menu/route derivation, permission checks, and the
//! navigation gate for the admin console.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
