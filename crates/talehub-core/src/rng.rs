//! Randomness abstraction for token minting.
//!
//! Access tokens are short random strings. The trait exists so tests can
//! inject a fixed sequence and assert on the exact token produced.

use rand::Rng;

/// Source of random indices into a bounded range.
pub trait TokenRng: Send {
    /// Returns a uniformly random index in `[0, bound)`.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Fills `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Production RNG backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRng;

impl TokenRng for SystemRng {
    fn next_index(&mut self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::RngCore::fill_bytes(&mut rand::rng(), dest);
    }
}
