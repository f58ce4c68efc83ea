//! Typed wrappers over the backend REST endpoints
//!
//! Each resource is reached through an accessor on [`ApiClient`], e.g.
//! `client.users().list(&query)`.
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod resource;
pub mod auth;
pub mod menu;
pub mod user;
pub mod role;
pub mod dept;
pub mod post;
pub mod dict;
pub mod config;
pub mod notice;

pub use resource::{ids_segment, Resource};
