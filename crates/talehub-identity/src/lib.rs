//! TaleHub Identity — email+password sign-up and sign-in.
//!
//! Credentials and profiles live as documents in the same store as
//! everything else. The access token minted at login is a presence marker
//! for the route guard, not a server-validated credential — see
//! [`token`] for the honest details.

pub mod profile;
pub mod service;
pub mod token;
