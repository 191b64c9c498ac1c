//! Memoized mean-centering of numeric sequences.
//!
//! [`Normalizer`] owns an explicit cache keyed by the exact input sequence. Two equal inputs
//! share one entry regardless of where they live, so repeated calls skip recomputation and
//! hand back the same shared result.
//!
//! The cache is pluggable through [`NormalizeCache`]:
//!
//! - [`UnboundedCache`] never evicts. It grows for as long as its owner lives, matching a
//!   classic unbounded memo table.
//! - [`LruNormalizeCache`] holds at most `capacity` entries and evicts the least recently used.
//!
//! The free function [`normalize()`] uses one process-wide unbounded [`Normalizer`]; prefer an
//! owned `Normalizer` in long-running processes so the cache can be bounded or cleared.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use crate::error::{TransformError, TransformResult};
use crate::instrument::timed;
use crate::types::Number;

/// Storage for memoized normalization results.
pub trait NormalizeCache: Send {
    /// Look up a previously stored result for exactly `key`.
    fn get(&mut self, key: &[Number]) -> Option<Arc<[f64]>>;

    /// Store the result for `key`.
    fn insert(&mut self, key: Vec<Number>, value: Arc<[f64]>);

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    fn clear(&mut self);
}

/// A cache that never evicts.
#[derive(Debug, Default)]
pub struct UnboundedCache {
    entries: HashMap<Vec<Number>, Arc<[f64]>>,
}

impl NormalizeCache for UnboundedCache {
    fn get(&mut self, key: &[Number]) -> Option<Arc<[f64]>> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: Vec<Number>, value: Arc<[f64]>) {
        self.entries.insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A bounded cache evicting the least recently used entry.
pub struct LruNormalizeCache {
    entries: LruCache<Vec<Number>, Arc<[f64]>>,
}

impl LruNormalizeCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.entries.cap()
    }
}

impl fmt::Debug for LruNormalizeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruNormalizeCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .finish()
    }
}

impl NormalizeCache for LruNormalizeCache {
    fn get(&mut self, key: &[Number]) -> Option<Arc<[f64]>> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: Vec<Number>, value: Arc<[f64]>) {
        self.entries.put(key, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Hit/miss counters of a [`Normalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Calls answered from the cache.
    pub hits: u64,
    /// Calls that computed a fresh result.
    pub misses: u64,
    /// Entries currently held.
    pub entries: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, entries={}",
            self.hits, self.misses, self.entries
        )
    }
}

/// Mean-centers numeric sequences, memoizing results in a [`NormalizeCache`].
///
/// Lookup, computation, and insertion happen under one lock, so concurrent callers with the
/// same input never compute it twice.
pub struct Normalizer<C = UnboundedCache> {
    cache: Mutex<C>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Normalizer<UnboundedCache> {
    /// Create a normalizer with an unbounded cache.
    pub fn new() -> Self {
        Self::with_cache(UnboundedCache::default())
    }
}

impl Default for Normalizer<UnboundedCache> {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer<LruNormalizeCache> {
    /// Create a normalizer whose cache holds at most `capacity` inputs.
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self::with_cache(LruNormalizeCache::new(capacity))
    }
}

impl<C: NormalizeCache> Normalizer<C> {
    /// Create a normalizer backed by `cache`.
    pub fn with_cache(cache: C) -> Self {
        Self {
            cache: Mutex::new(cache),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Subtract the arithmetic mean of `values` from every element.
    ///
    /// The output has the same length and order as the input. A repeated call with an equal
    /// input returns the stored result without recomputing it.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::EmptyInput`] if `values` is empty. Errors are not cached.
    pub fn normalize(&self, values: &[Number]) -> TransformResult<Arc<[f64]>> {
        let mut cache = self.lock_cache();
        if let Some(hit) = cache.get(values) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(len = values.len(), "normalize cache hit");
            return Ok(hit);
        }

        let out = timed("normalize", || mean_center(values))?;
        self.misses.fetch_add(1, Ordering::Relaxed);
        cache.insert(values.to_vec(), Arc::clone(&out));
        Ok(out)
    }

    /// Current hit/miss counters and cache size.
    pub fn stats(&self) -> CacheStats {
        let entries = self.lock_cache().len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }

    /// Drop all cached results and reset the counters.
    pub fn clear(&self) {
        self.lock_cache().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    // The cache only ever holds finished pure results, so a poisoned lock is still consistent.
    fn lock_cache(&self) -> MutexGuard<'_, C> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C> fmt::Debug for Normalizer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

fn mean_center(values: &[Number]) -> TransformResult<Arc<[f64]>> {
    if values.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    let mean = values.iter().map(|v| v.as_f64()).sum::<f64>() / values.len() as f64;
    tracing::info!("Normalizing numeric records with mean {mean} ...");

    let out: Arc<[f64]> = values.iter().map(|v| v.as_f64() - mean).collect();
    tracing::debug!("Numeric records were successfully normalized!");
    Ok(out)
}

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::new);

/// The process-wide normalizer used by [`normalize()`].
pub fn default_normalizer() -> &'static Normalizer {
    &DEFAULT_NORMALIZER
}

/// Mean-center `values` using the process-wide unbounded cache.
///
/// # Example
///
/// ```rust
/// use record_utils::processing::normalize;
/// use record_utils::types::Number;
///
/// let input: Vec<Number> = [1, 2, 3].into_iter().map(Number::from).collect();
/// let out = normalize(&input).unwrap();
/// assert_eq!(&*out, &[-1.0, 0.0, 1.0]);
/// ```
///
/// # Errors
///
/// Returns [`TransformError::EmptyInput`] if `values` is empty.
pub fn normalize(values: &[Number]) -> TransformResult<Arc<[f64]>> {
    DEFAULT_NORMALIZER.normalize(values)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;
    use std::sync::Arc;
    use std::thread;

    use super::{CacheStats, Normalizer};
    use crate::error::TransformError;
    use crate::types::Number;

    fn nums(values: &[i64]) -> Vec<Number> {
        values.iter().copied().map(Number::Int).collect()
    }

    #[test]
    fn normalize_subtracts_mean() {
        let n = Normalizer::new();
        let out = n.normalize(&nums(&[1, 2, 3, 4])).unwrap();
        assert_eq!(&*out, &[-1.5, -0.5, 0.5, 1.5]);
    }

    #[test]
    fn normalize_mixed_ints_and_floats() {
        let n = Normalizer::new();
        let out = n
            .normalize(&[Number::Int(1), Number::Float(2.5), Number::Int(4)])
            .unwrap();
        assert_eq!(out.len(), 3);
        assert!((out.iter().sum::<f64>()).abs() < 1e-12);
        assert_eq!(out[0], -1.5);
    }

    #[test]
    fn normalize_rejects_empty_input_and_does_not_cache_it() {
        let n = Normalizer::new();
        assert_eq!(n.normalize(&[]).unwrap_err(), TransformError::EmptyInput);
        assert_eq!(n.stats(), CacheStats::default());
    }

    #[test]
    fn repeated_equal_input_hits_cache_and_shares_result() {
        let n = Normalizer::new();
        let first = n.normalize(&nums(&[1, 2, 3])).unwrap();
        // A distinct but equal sequence, spelled with floats.
        let equal = [Number::Float(1.0), Number::Float(2.0), Number::Float(3.0)];
        let second = n.normalize(&equal).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            n.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );

        n.clear();
        assert_eq!(n.stats(), CacheStats::default());
        let third = n.normalize(&nums(&[1, 2, 3])).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first, third);
    }

    #[test]
    fn bounded_cache_evicts_least_recently_used() {
        let n = Normalizer::bounded(NonZeroUsize::new(2).unwrap());
        n.normalize(&nums(&[1])).unwrap();
        n.normalize(&nums(&[2])).unwrap();
        n.normalize(&nums(&[1])).unwrap(); // refresh [1]
        n.normalize(&nums(&[3])).unwrap(); // evicts [2]
        assert_eq!(n.stats().entries, 2);

        n.normalize(&nums(&[1])).unwrap();
        n.normalize(&nums(&[2])).unwrap();
        let stats = n.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 4);
    }

    #[test]
    fn concurrent_callers_compute_once() {
        let n = Arc::new(Normalizer::new());
        let input: Vec<Number> = (1..=1000).map(Number::Int).collect();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let n = Arc::clone(&n);
                let input = input.clone();
                thread::spawn(move || n.normalize(&input).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().len(), 1000);
        }

        let stats = n.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 7);
    }
}
