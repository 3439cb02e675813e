//! TaleHub Core — shared domain abstractions.
//!
//! This crate defines the error taxonomy and the seams every other crate
//! depends on: the document store, the blob store, the clock, and the token
//! RNG. It contains no infrastructure code.

pub mod blob;
pub mod clock;
pub mod document;
pub mod error;
pub mod rng;
