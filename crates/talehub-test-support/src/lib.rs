//! Shared test doubles for the TaleHub backend.

mod blob;
mod clock;
mod rng;
mod store;

pub use blob::{FailingBlobStore, MemoryBlobStore};
pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingDocumentStore, MemoryDocumentStore};
