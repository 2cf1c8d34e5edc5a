//! Time and randomness, injected so handshakes are reproducible in tests.
//!
//! Mirrors the teacher's `Environment` abstraction (see `DESIGN.md`), but
//! trimmed to this protocol's fully synchronous, single-threaded model
//! (`SPEC_FULL.md` §5): no `sleep`, no async trait methods, just a clock
//! and an RNG hook.

use std::time::Instant;

/// Abstracts wall-clock time and randomness away from `Connection`.
///
/// # Invariants
///
/// - `now()` never goes backwards within a single execution context.
/// - `random_bytes()` uses cryptographically secure entropy in production;
///   test environments may substitute a seeded PRNG for determinism.
pub trait Environment {
    /// Current time (monotonic), used for the connection's statistics.
    fn now(&self) -> Instant;

    /// Fill `buffer` with random bytes, used for SRP ephemeral secrets.
    fn random_bytes(&self, buffer: &mut [u8]);
}

/// The production [`Environment`]: the real clock and the OS CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        use rand::RngCore;
        rand::rngs::OsRng.fill_bytes(buffer);
    }
}
