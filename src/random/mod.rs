//! Randomness providers used during asset generation.
//!
//! Assets never reach for process-wide random state directly. The resolver
//! owns an `Arc<dyn RandomSource>` and hands it to every `generate` call
//! through [`Parents::random`](crate::asset::Parents::random), so tests can
//! substitute [`SequenceRandom`] and get reproducible output.
//!
//! Two independent draws are offered:
//! - [`RandomSource::uuid`] - a 36-character canonical RFC-4122 v4 token
//! - [`RandomSource::alphanumeric`] - a short lowercase string drawn from
//!   [`SUFFIX_ALPHABET`]

use rand::Rng;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::SUFFIX_ALPHABET;

/// Source of random tokens for asset generation.
///
/// Implementations must be safe to share across threads; every call returns
/// an independent draw.
pub trait RandomSource: Send + Sync {
    /// A fresh random unique token in canonical hyphenated form.
    fn uuid(&self) -> String;

    /// A random string of `len` characters from [`SUFFIX_ALPHABET`].
    fn alphanumeric(&self, len: usize) -> String;
}

/// Production randomness: `uuid` v4 tokens and the thread-local `rand` RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn uuid(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn alphanumeric(&self, len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| {
                let idx = rng.random_range(0..SUFFIX_ALPHABET.len());
                SUFFIX_ALPHABET[idx] as char
            })
            .collect()
    }
}

/// Deterministic source replaying queued values.
///
/// Queued UUIDs and suffixes are returned in order. Once a queue runs dry
/// the source falls back to counter-based values
/// (`00000000-0000-4000-8000-000000000001`, `bbbbc`, ...) that stay unique
/// within the instance.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    uuids: Mutex<VecDeque<String>>,
    suffixes: Mutex<VecDeque<String>>,
    uuid_counter: AtomicU64,
    suffix_counter: AtomicU64,
}

impl SequenceRandom {
    /// Create a source with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue UUID values to be returned in order.
    #[must_use]
    pub fn with_uuids<I, S>(self, uuids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.uuids).extend(uuids.into_iter().map(Into::into));
        self
    }

    /// Queue suffix values to be returned in order.
    ///
    /// Queued suffixes are returned as-is regardless of the requested length.
    #[must_use]
    pub fn with_suffixes<I, S>(self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.suffixes).extend(suffixes.into_iter().map(Into::into));
        self
    }

    /// Number of UUIDs handed out so far.
    pub fn uuid_draws(&self) -> u64 {
        self.uuid_counter.load(Ordering::SeqCst)
    }

    /// Number of suffixes handed out so far.
    pub fn suffix_draws(&self) -> u64 {
        self.suffix_counter.load(Ordering::SeqCst)
    }
}

impl RandomSource for SequenceRandom {
    fn uuid(&self) -> String {
        let n = self.uuid_counter.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.uuids)
            .pop_front()
            .unwrap_or_else(|| format!("00000000-0000-4000-8000-{n:012x}"))
    }

    fn alphanumeric(&self, len: usize) -> String {
        let n = self.suffix_counter.fetch_add(1, Ordering::SeqCst);
        if let Some(queued) = lock(&self.suffixes).pop_front() {
            return queued;
        }
        counter_suffix(n, len)
    }
}

/// Encode `n` in base-`SUFFIX_ALPHABET.len()`, most significant digit first,
/// left-padded to `len` characters with the alphabet's first letter.
fn counter_suffix(mut n: u64, len: usize) -> String {
    let base = SUFFIX_ALPHABET.len() as u64;
    let mut out = vec![SUFFIX_ALPHABET[0]; len];
    for slot in out.iter_mut().rev() {
        *slot = SUFFIX_ALPHABET[(n % base) as usize];
        n /= base;
    }
    out.into_iter().map(char::from).collect()
}

// A poisoned queue only means another test thread panicked mid-push;
// the queue contents are still usable.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
