//! HTTP route modules, one per surface.

pub mod auth;
pub mod catalog;
pub mod cloned;
pub mod health;
pub mod media;
pub mod proposals;
pub mod stories;
