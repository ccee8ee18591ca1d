//! Request middleware and extractors.

pub mod auth;

pub use auth::{AccessPolicy, AuthUser, Capability, RolePolicy, require};
