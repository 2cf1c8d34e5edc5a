//! A deterministic stand-in for [`sidp_core::Environment`].

use std::{
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sidp_core::Environment;

/// A fixed-origin clock plus a seeded RNG, so a handshake driven through
/// this environment replays identically given the same seed.
///
/// `now()` advances by one nanosecond per call from a base `Instant`
/// captured at construction, rather than reading the real clock — tests
/// that assert on `bytes_read`/`last_read_at` ordering don't race the
/// scheduler.
pub struct DeterministicEnvironment {
    base: Instant,
    tick_nanos: AtomicU64,
    rng: Mutex<ChaCha8Rng>,
}

impl DeterministicEnvironment {
    /// Build an environment whose randomness is entirely determined by
    /// `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { base: Instant::now(), tick_nanos: AtomicU64::new(0), rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)) }
    }
}

impl Environment for DeterministicEnvironment {
    fn now(&self) -> Instant {
        let nanos = self.tick_nanos.fetch_add(1, Ordering::Relaxed);
        self.base + Duration::from_nanos(nanos)
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        let mut rng = self.rng.lock().expect("rng mutex poisoned");
        rng.fill_bytes(buffer);
    }
}
